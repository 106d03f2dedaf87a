//! Signorder Types
//!
//! Data model shared by the recipient editor:
//! - [`Signer`] records with stable [`SignerId`]s and a [`RecipientRole`]
//! - [`RecipientList`], the never-empty signer sequence plus its [`OrderingMode`]
//! - [`RecipientForm`] validation into a [`RecipientList`]
//! - [`EditorConfig`] feature toggles and limits
//!
//! # Example
//!
//! ```rust
//! use signorder_types::{RecipientForm, OrderingMode};
//!
//! let form = RecipientForm::from_json(r#"{
//!     "signingOrder": "SEQUENTIAL",
//!     "signers": [
//!         { "email": "b@example.com", "signingOrder": 2 },
//!         { "email": "a@example.com", "signingOrder": 1 }
//!     ]
//! }"#).unwrap();
//!
//! let list = form.validate().unwrap();
//! assert_eq!(list.mode(), OrderingMode::Sequential);
//! assert_eq!(list.signers()[0].email, "a@example.com");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod form;
pub mod list;
pub mod signer;

// Re-exports
pub use config::{ConfigError, EditorConfig, EditorFeatures};
pub use error::RecipientError;
pub use form::{FieldError, FieldErrorKind, RecipientForm, SignerForm, ValidationErrors, MAX_NAME_LEN};
pub use list::{OrderingMode, RecipientList};
pub use signer::{RecipientRole, Signer, SignerDraft, SignerId};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
