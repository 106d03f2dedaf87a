//! Recipient editing session
//!
//! [`RecipientEditor`] owns the recipient list of one editing session and
//! applies [`EditIntent`]s to it one at a time. It is the call site where
//! edits the UI should never offer are refused, and it tells registered
//! [`ListObserver`]s about every change so a persistence layer can follow
//! along.

use crate::intent::EditIntent;
use crate::renumber;
use signorder_types::{
    EditorConfig, OrderingMode, RecipientError, RecipientList, RecipientRole,
};
use std::borrow::Cow;
use std::fmt;

/// Receives every applied change
///
/// The list passed in is the complete new state; observers replace whatever
/// they hold wholesale.
pub trait ListObserver: Send {
    /// Called after `intent` produced revision `revision`
    fn on_change(&mut self, revision: u64, intent: &EditIntent, list: &RecipientList);
}

/// Result of applying an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// List changed; observers were notified
    Applied {
        /// New revision
        revision: u64,
    },

    /// Intent left the list as it was
    Unchanged,
}

impl EditOutcome {
    /// Check if the list changed
    #[inline]
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Single editing session over one recipient list
pub struct RecipientEditor {
    /// Current state
    list: RecipientList,
    /// Feature toggles and limits
    config: EditorConfig,
    /// Bumped on every applied change
    revision: u64,
    /// Change subscribers
    observers: Vec<Box<dyn ListObserver>>,
}

impl RecipientEditor {
    /// Start a session at revision 0
    #[must_use]
    pub fn new(list: RecipientList, config: EditorConfig) -> Self {
        Self {
            list,
            config,
            revision: 0,
            observers: Vec::new(),
        }
    }

    /// Current list
    #[inline]
    #[must_use]
    pub fn list(&self) -> &RecipientList {
        &self.list
    }

    /// Session configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Number of applied changes
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// End the session, keeping the list
    #[must_use]
    pub fn into_list(self) -> RecipientList {
        self.list
    }

    /// Register a change observer
    pub fn subscribe(&mut self, observer: Box<dyn ListObserver>) {
        self.observers.push(observer);
    }

    /// Apply one edit
    ///
    /// Either the whole edit is applied or none of it.
    ///
    /// # Errors
    /// - refusals ([`RecipientError::is_refusal`]) for edits the session
    ///   does not allow: disabled signers, last signer, recipient cap,
    ///   features turned off
    /// - [`RecipientError::IndexOutOfBounds`] for indices not in the list
    pub fn apply(&mut self, intent: EditIntent) -> Result<EditOutcome, RecipientError> {
        let next = match self.next_list(&intent) {
            Ok(next) => next,
            Err(err) => {
                if err.is_refusal() {
                    tracing::warn!(op = intent.kind(), %err, "edit refused");
                } else {
                    tracing::error!(op = intent.kind(), %err, "invalid edit");
                }
                return Err(err);
            }
        };

        let Some(next) = next.filter(|next| *next != self.list) else {
            tracing::debug!(op = intent.kind(), "edit left list unchanged");
            return Ok(EditOutcome::Unchanged);
        };

        self.list = next;
        self.revision += 1;
        tracing::debug!(
            op = intent.kind(),
            revision = self.revision,
            signers = self.list.len(),
            mode = %self.list.mode(),
            "applied {}",
            intent
        );

        for observer in &mut self.observers {
            observer.on_change(self.revision, &intent, &self.list);
        }

        Ok(EditOutcome::Applied {
            revision: self.revision,
        })
    }

    /// Compute the list `intent` leads to; `None` when it is a no-op
    fn next_list(&self, intent: &EditIntent) -> Result<Option<RecipientList>, RecipientError> {
        match intent {
            EditIntent::ManualOrder { index, value } => {
                self.list.signer_at(*index)?;
                if renumber::parse_requested_order(value).is_none() {
                    return Ok(None);
                }
                self.ensure_movable(*index)?;
                renumber::renumber_by_manual_entry(&self.list, *index, value).map(owned)
            }
            EditIntent::Move {
                source,
                destination,
            } => {
                self.list.signer_at(*source)?;
                if destination.is_none() {
                    return Ok(None);
                }
                self.ensure_movable(*source)?;
                renumber::renumber_by_move(&self.list, *source, *destination).map(owned)
            }
            EditIntent::SetMode { mode } => Ok(Some(self.switch_mode(*mode)?)),
            EditIntent::SetDictateNextSigner { enabled } => {
                if *enabled {
                    if !self.config.features.dictate_next_signer {
                        return Err(RecipientError::FeatureDisabled("dictate next signer"));
                    }
                    if !self.list.mode().is_sequential() {
                        return Err(RecipientError::RequiresSequential("dictate next signer"));
                    }
                }
                let mut next = self.list.clone();
                next.set_allow_dictate_next_signer(*enabled);
                Ok(Some(next))
            }
            EditIntent::Add { draft } => {
                if !self.config.allows_recipient_count(self.list.len() + 1) {
                    return Err(RecipientError::RecipientLimit {
                        max: self.config.max_recipients.unwrap_or(self.list.len()),
                    });
                }
                if draft.role.requires_sequence() && !self.list.mode().is_sequential() {
                    return Err(RecipientError::RequiresSequential("assistant role"));
                }
                Ok(Some(renumber::add_signer(&self.list, draft.clone())))
            }
            EditIntent::Remove { index } => renumber::remove_signer(&self.list, *index).map(Some),
        }
    }

    /// Disabled signers keep their place
    fn ensure_movable(&self, index: usize) -> Result<(), RecipientError> {
        if self.list.signer_at(index)?.disabled {
            return Err(RecipientError::SignerDisabled { index });
        }
        Ok(())
    }

    fn switch_mode(&self, mode: OrderingMode) -> Result<RecipientList, RecipientError> {
        if mode.is_sequential() && !self.config.features.signing_order {
            return Err(RecipientError::FeatureDisabled("signing order"));
        }

        let mut next = renumber::set_ordering_mode(&self.list, mode);
        if !mode.is_sequential() && self.config.features.demote_assistants_on_parallel {
            for signer in next.signers_mut() {
                if signer.role == RecipientRole::Assistant {
                    tracing::debug!(form_id = %signer.form_id, "assistant demoted to signer");
                    signer.role = RecipientRole::Signer;
                }
            }
        }
        Ok(next)
    }
}

fn owned(list: Cow<'_, RecipientList>) -> Option<RecipientList> {
    match list {
        Cow::Borrowed(_) => None,
        Cow::Owned(list) => Some(list),
    }
}

impl fmt::Debug for RecipientEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipientEditor")
            .field("list", &self.list)
            .field("config", &self.config)
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}
