//! Signorder Engine
//!
//! Keeps recipient signing orders dense while a recipient list is edited.
//!
//! # Core Concepts
//!
//! - [`renumber`]: pure list transforms (manual order entry, drag-and-drop
//!   move, mode switch, add, remove) sharing one renumbering postlude
//! - [`EditIntent`]: one discrete user interaction
//! - [`RecipientEditor`]: session that applies intents, refuses disallowed
//!   edits and notifies [`ListObserver`]s
//!
//! # Example
//!
//! ```
//! use signorder_engine::{EditIntent, RecipientEditor};
//! use signorder_types::{EditorConfig, OrderingMode, RecipientList, RecipientRole, Signer};
//!
//! let signers = ["A", "B", "C"]
//!     .iter()
//!     .map(|n| Signer::new(*n, format!("{n}@example.com"), RecipientRole::Signer))
//!     .collect();
//! let list = RecipientList::from_parts(signers, OrderingMode::Parallel, false)?;
//!
//! let mut editor = RecipientEditor::new(list, EditorConfig::default());
//! editor.apply(EditIntent::SetMode { mode: OrderingMode::Sequential })?;
//! editor.apply(EditIntent::Move { source: 0, destination: Some(2) })?;
//!
//! let names: Vec<_> = editor.list().signers().iter().map(|s| s.name.as_str()).collect();
//! assert_eq!(names, ["B", "C", "A"]);
//! assert!(editor.list().is_consistently_numbered());
//! assert_eq!(editor.revision(), 2);
//! # Ok::<(), signorder_types::RecipientError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod editor;
pub mod intent;
pub mod renumber;

// Re-exports
pub use editor::{EditOutcome, ListObserver, RecipientEditor};
pub use intent::EditIntent;
pub use renumber::{
    add_signer, assign_positions, remove_signer, renumber_by_manual_entry, renumber_by_move,
    set_ordering_mode,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
