//! Signer records
//!
//! Provides [`Signer`], the per-recipient form record, together with its
//! stable [`SignerId`] and [`RecipientRole`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Stable form identifier of a signer (ULID for sortability)
///
/// Survives every reorder; two signers never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignerId(pub Ulid);

impl SignerId {
    /// Generate new signer ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SignerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SignerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SignerId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s).map(Self)
    }
}

/// What a recipient does with the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecipientRole {
    /// Must sign
    #[default]
    Signer,

    /// Receives a copy once complete
    #[serde(rename = "CC")]
    CarbonCopy,

    /// Must approve
    Approver,

    /// Must view
    Viewer,

    /// Fills fields on behalf of later signers
    Assistant,
}

impl RecipientRole {
    /// Wire name of the role
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Signer => "SIGNER",
            Self::CarbonCopy => "CC",
            Self::Approver => "APPROVER",
            Self::Viewer => "VIEWER",
            Self::Assistant => "ASSISTANT",
        }
    }

    /// Only meaningful inside a signing sequence
    #[inline]
    #[must_use]
    pub fn requires_sequence(&self) -> bool {
        matches!(self, Self::Assistant)
    }
}

impl fmt::Display for RecipientRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecipientRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SIGNER" => Ok(Self::Signer),
            "CC" | "CARBON_COPY" => Ok(Self::CarbonCopy),
            "APPROVER" => Ok(Self::Approver),
            "VIEWER" => Ok(Self::Viewer),
            "ASSISTANT" => Ok(Self::Assistant),
            other => Err(format!("unknown recipient role: {other}")),
        }
    }
}

/// A participant slated to receive or sign a document
///
/// `signing_order` is only present while the owning list is sequential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Signer {
    /// Stable form identifier
    pub form_id: SignerId,

    /// Display name (may be empty)
    pub name: String,

    /// Email address
    pub email: String,

    /// Recipient role
    pub role: RecipientRole,

    /// 1-based position in the signing sequence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_order: Option<u32>,

    /// Cannot be reordered or removed
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl Signer {
    /// Create signer with a fresh form id
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: RecipientRole) -> Self {
        Self {
            form_id: SignerId::new(),
            name: name.into(),
            email: email.into(),
            role,
            signing_order: None,
            disabled: false,
        }
    }

    /// Set signing order
    #[inline]
    #[must_use]
    pub fn with_order(mut self, order: u32) -> Self {
        self.signing_order = Some(order);
        self
    }

    /// Mark as disabled (fixed in place)
    #[inline]
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Values for a signer about to be added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignerDraft {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Role
    pub role: RecipientRole,
}

impl SignerDraft {
    /// Draft with name and email, role [`RecipientRole::Signer`]
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: RecipientRole::Signer,
        }
    }

    /// With role
    #[inline]
    #[must_use]
    pub fn with_role(mut self, role: RecipientRole) -> Self {
        self.role = role;
        self
    }

    /// Materialize into a signer with a fresh id and no order
    #[must_use]
    pub fn into_signer(self) -> Signer {
        Signer::new(self.name, self.email, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signer_ids_unique() {
        let a = SignerId::new();
        let b = SignerId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn signer_id_roundtrips_through_string() {
        let id = SignerId::new();
        let parsed: SignerId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn role_parse_accepts_wire_names() {
        assert_eq!("SIGNER".parse::<RecipientRole>(), Ok(RecipientRole::Signer));
        assert_eq!("cc".parse::<RecipientRole>(), Ok(RecipientRole::CarbonCopy));
        assert_eq!(" assistant ".parse::<RecipientRole>(), Ok(RecipientRole::Assistant));
        assert!("owner".parse::<RecipientRole>().is_err());
    }

    #[test]
    fn role_serializes_screaming_case() {
        let json = serde_json::to_string(&RecipientRole::CarbonCopy).unwrap();
        assert_eq!(json, "\"CC\"");
        let json = serde_json::to_string(&RecipientRole::Approver).unwrap();
        assert_eq!(json, "\"APPROVER\"");
    }

    #[test]
    fn only_assistant_requires_sequence() {
        assert!(RecipientRole::Assistant.requires_sequence());
        assert!(!RecipientRole::Signer.requires_sequence());
        assert!(!RecipientRole::Viewer.requires_sequence());
    }

    #[test]
    fn draft_defaults() {
        let draft = SignerDraft::default();
        assert!(draft.name.is_empty());
        assert!(draft.email.is_empty());
        assert_eq!(draft.role, RecipientRole::Signer);

        let signer = draft.into_signer();
        assert_eq!(signer.signing_order, None);
        assert!(!signer.disabled);
    }

    #[test]
    fn signer_skips_absent_order_and_false_disabled() {
        let signer = Signer::new("Ann", "ann@example.com", RecipientRole::Signer);
        let json = serde_json::to_value(&signer).unwrap();
        assert!(json.get("signingOrder").is_none());
        assert!(json.get("disabled").is_none());

        let json = serde_json::to_value(signer.with_order(2).disabled()).unwrap();
        assert_eq!(json["signingOrder"], 2);
        assert_eq!(json["disabled"], true);
    }
}
