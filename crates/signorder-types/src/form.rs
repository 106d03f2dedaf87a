//! Recipient form validation
//!
//! [`RecipientForm`] mirrors the loosely typed shape a form submits.
//! [`RecipientForm::validate`] turns it into a [`RecipientList`] or reports
//! every problem at once as [`ValidationErrors`].

use crate::list::{OrderingMode, RecipientList};
use crate::signer::{RecipientRole, Signer, SignerId};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Maximum display name length, in characters
pub const MAX_NAME_LEN: usize = 255;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

/// Submitted recipient form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecipientForm {
    /// `"SEQUENTIAL"` or `"PARALLEL"`; absent means parallel
    pub signing_order: Option<String>,

    /// Dictate-next-signer checkbox
    pub allow_dictate_next_signer: bool,

    /// Signer rows in form order
    pub signers: Vec<SignerForm>,
}

/// One submitted signer row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignerForm {
    /// Existing form identifier, if the row has one
    pub form_id: Option<String>,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Role wire name; absent means signer
    pub role: Option<String>,

    /// Requested signing order
    pub signing_order: Option<i64>,

    /// Row is fixed in place
    pub disabled: bool,
}

impl RecipientForm {
    /// Parse a form from JSON
    ///
    /// # Errors
    /// Returns the JSON error when the document is not a form shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Validate into a recipient list
    ///
    /// Under sequential ordering the resulting list is sorted by signing
    /// order, ties keeping form order. Under parallel ordering orders and
    /// the dictate flag are dropped.
    ///
    /// # Errors
    /// Every problem found, keyed by field path (`signers[1].email`).
    pub fn validate(&self) -> Result<RecipientList, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let mode = match self.signing_order.as_deref() {
            None => OrderingMode::Parallel,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                errors.push("signingOrder", FieldErrorKind::UnknownOrderingMode(raw.to_string()));
                OrderingMode::Parallel
            }),
        };

        if self.signers.is_empty() {
            errors.push("signers", FieldErrorKind::NoSigners);
            return Err(errors);
        }

        let mut seen_emails = HashSet::new();
        let mut seen_ids = HashSet::new();
        let mut signers = Vec::with_capacity(self.signers.len());

        for (i, row) in self.signers.iter().enumerate() {
            let path = |field: &str| format!("signers[{i}].{field}");

            let form_id = row
                .form_id
                .as_deref()
                .and_then(|raw| raw.parse::<SignerId>().ok())
                .unwrap_or_default();
            if !seen_ids.insert(form_id) {
                errors.push(path("formId"), FieldErrorKind::DuplicateFormId);
            }

            if row.name.chars().count() > MAX_NAME_LEN {
                errors.push(path("name"), FieldErrorKind::NameTooLong { max: MAX_NAME_LEN });
            }

            let email = row.email.trim();
            if email.is_empty() {
                errors.push(path("email"), FieldErrorKind::EmailRequired);
            } else if !EMAIL_REGEX.is_match(email) {
                errors.push(path("email"), FieldErrorKind::InvalidEmail);
            } else if !seen_emails.insert(email.to_lowercase()) {
                errors.push(path("email"), FieldErrorKind::DuplicateEmail);
            }

            let role = match row.role.as_deref() {
                None => RecipientRole::Signer,
                Some(raw) => raw.parse().unwrap_or_else(|_| {
                    errors.push(path("role"), FieldErrorKind::UnknownRole(raw.to_string()));
                    RecipientRole::Signer
                }),
            };
            if role.requires_sequence() && !mode.is_sequential() {
                errors.push(path("role"), FieldErrorKind::AssistantRequiresSequential);
            }

            let signing_order = if mode.is_sequential() {
                match row.signing_order {
                    None => {
                        errors.push(path("signingOrder"), FieldErrorKind::MissingSigningOrder);
                        None
                    }
                    Some(order) => match u32::try_from(order) {
                        Ok(order) if order >= 1 => Some(order),
                        _ => {
                            errors.push(
                                path("signingOrder"),
                                FieldErrorKind::InvalidSigningOrder(order),
                            );
                            None
                        }
                    },
                }
            } else {
                None
            };

            signers.push(Signer {
                form_id,
                name: row.name.clone(),
                email: email.to_string(),
                role,
                signing_order,
                disabled: row.disabled,
            });
        }

        if mode.is_sequential() {
            check_dense(&signers, &mut errors);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        if mode.is_sequential() {
            signers.sort_by_key(|s| s.signing_order);
        }

        let dictate = self.allow_dictate_next_signer && mode.is_sequential();
        RecipientList::from_parts(signers, mode, dictate).map_err(|_| {
            let mut errors = ValidationErrors::default();
            errors.push("signers", FieldErrorKind::NoSigners);
            errors
        })
    }
}

/// Orders must be exactly `1..=N`
fn check_dense(signers: &[Signer], errors: &mut ValidationErrors) {
    let n = signers.len();
    let mut first_seen: HashMap<u32, usize> = HashMap::new();

    for (i, signer) in signers.iter().enumerate() {
        let Some(order) = signer.signing_order else {
            continue;
        };
        let path = format!("signers[{i}].signingOrder");

        if usize::try_from(order).map_or(true, |o| o > n) {
            errors.push(path, FieldErrorKind::SigningOrderOutOfRange { order, max: n });
        } else if first_seen.insert(order, i).is_some() {
            errors.push(path, FieldErrorKind::DuplicateSigningOrder(order));
        }
    }
}

/// A single field problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field path, e.g. `signers[0].email`
    pub path: String,

    /// What is wrong
    pub kind: FieldErrorKind,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// Kinds of field problems
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldErrorKind {
    /// No signer rows
    #[error("at least one signer is required")]
    NoSigners,

    /// Ordering mode not recognized
    #[error("unknown signing order mode '{0}'")]
    UnknownOrderingMode(String),

    /// Role not recognized
    #[error("unknown role '{0}'")]
    UnknownRole(String),

    /// Email empty
    #[error("email is required")]
    EmailRequired,

    /// Email malformed
    #[error("invalid email address")]
    InvalidEmail,

    /// Email used by an earlier row
    #[error("signers must have unique emails")]
    DuplicateEmail,

    /// Form id used by an earlier row
    #[error("duplicate form id")]
    DuplicateFormId,

    /// Name exceeds the length limit
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Limit in characters
        max: usize,
    },

    /// Sequential row without order
    #[error("signing order is required")]
    MissingSigningOrder,

    /// Order is not a positive integer
    #[error("signing order must be a positive integer, got {0}")]
    InvalidSigningOrder(i64),

    /// Order beyond the number of signers
    #[error("signing order {order} exceeds signer count {max}")]
    SigningOrderOutOfRange {
        /// Requested order
        order: u32,
        /// Number of signers
        max: usize,
    },

    /// Order used by an earlier row
    #[error("signing order {0} is used more than once")]
    DuplicateSigningOrder(u32),

    /// Assistant in a parallel list
    #[error("assistants require sequential signing order")]
    AssistantRequiresSequential,
}

/// All problems found in a form
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("invalid recipient form: {}", summarize(&.errors))]
pub struct ValidationErrors {
    /// Problems in discovery order
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Record a problem
    #[inline]
    pub fn push(&mut self, path: impl Into<String>, kind: FieldErrorKind) {
        self.errors.push(FieldError {
            path: path.into(),
            kind,
        });
    }

    /// No problems recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of problems
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Problems recorded against `path`
    pub fn for_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a FieldErrorKind> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.path == path)
            .map(|e| &e.kind)
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
