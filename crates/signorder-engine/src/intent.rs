//! Edit intents
//!
//! One [`EditIntent`] per discrete user interaction: typing into an order
//! box, finishing a drag, flipping the ordering toggle, adding or deleting a
//! row.

use serde::{Deserialize, Serialize};
use signorder_types::{OrderingMode, SignerDraft};
use std::fmt;

/// A single recipient edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditIntent {
    /// Raw text typed into the order box of the signer at `index`
    ManualOrder {
        /// Signer being edited
        index: usize,
        /// Raw input text
        value: String,
    },

    /// Drag-and-drop completed
    Move {
        /// Dragged signer
        source: usize,
        /// Drop position (`None` = cancelled)
        #[serde(default)]
        destination: Option<usize>,
    },

    /// Ordering toggle changed
    SetMode {
        /// New mode
        mode: OrderingMode,
    },

    /// Dictate-next-signer checkbox changed
    SetDictateNextSigner {
        /// New value
        enabled: bool,
    },

    /// Add-signer button
    Add {
        /// Initial values
        #[serde(default)]
        draft: SignerDraft,
    },

    /// Delete button of the signer at `index`
    Remove {
        /// Signer to delete
        index: usize,
    },
}

impl EditIntent {
    /// Short name for logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ManualOrder { .. } => "manual_order",
            Self::Move { .. } => "move",
            Self::SetMode { .. } => "set_mode",
            Self::SetDictateNextSigner { .. } => "set_dictate_next_signer",
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
        }
    }

    /// Parse a JSON array of intents
    ///
    /// # Errors
    /// Returns the JSON error for malformed scripts.
    pub fn parse_script(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl fmt::Display for EditIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ManualOrder { index, value } => write!(f, "manual_order[{index}] = {value:?}"),
            Self::Move {
                source,
                destination: Some(destination),
            } => write!(f, "move {source} -> {destination}"),
            Self::Move {
                source,
                destination: None,
            } => write!(f, "move {source} -> (cancelled)"),
            Self::SetMode { mode } => write!(f, "set_mode {mode}"),
            Self::SetDictateNextSigner { enabled } => {
                write!(f, "set_dictate_next_signer {enabled}")
            }
            Self::Add { draft } => write!(f, "add {} <{}>", draft.role, draft.email),
            Self::Remove { index } => write!(f, "remove {index}"),
        }
    }
}
