//! Error types for recipient editing
//!
//! Two families:
//! - refusals, where the editor declines an edit the UI should not offer
//! - caller bugs, such as an index that does not belong to the list

/// Recipient list error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipientError {
    /// A recipient list must contain at least one signer
    #[error("recipient list must contain at least one signer")]
    EmptyList,

    /// Index does not address a signer of the current list
    #[error("index {index} out of bounds for {len} signers")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Current list length
        len: usize,
    },

    /// Removing the sole remaining signer
    #[error("cannot remove the last remaining signer")]
    LastSigner,

    /// Signer is fixed in place
    #[error("signer at index {index} is disabled")]
    SignerDisabled {
        /// Index of the disabled signer
        index: usize,
    },

    /// Configured recipient cap reached
    #[error("recipient limit of {max} reached")]
    RecipientLimit {
        /// Configured maximum
        max: usize,
    },

    /// Edit needs a feature the editor was configured without
    #[error("feature disabled: {0}")]
    FeatureDisabled(&'static str),

    /// Edit only makes sense under sequential ordering
    #[error("{0} requires sequential signing order")]
    RequiresSequential(&'static str),
}

impl RecipientError {
    /// Check if the editor declined the edit (as opposed to a caller bug)
    #[inline]
    #[must_use]
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            Self::LastSigner
                | Self::SignerDisabled { .. }
                | Self::RecipientLimit { .. }
                | Self::FeatureDisabled(_)
                | Self::RequiresSequential(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RecipientError::IndexOutOfBounds { index: 4, len: 2 };
        assert_eq!(err.to_string(), "index 4 out of bounds for 2 signers");

        let err = RecipientError::RequiresSequential("dictate next signer");
        assert!(err.to_string().contains("requires sequential"));
    }

    #[test]
    fn refusals_classified() {
        assert!(RecipientError::LastSigner.is_refusal());
        assert!(RecipientError::SignerDisabled { index: 0 }.is_refusal());
        assert!(RecipientError::RecipientLimit { max: 3 }.is_refusal());
        assert!(!RecipientError::EmptyList.is_refusal());
        assert!(!RecipientError::IndexOutOfBounds { index: 1, len: 1 }.is_refusal());
    }
}
