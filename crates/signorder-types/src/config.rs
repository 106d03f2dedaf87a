//! Editor configuration
//!
//! Feature toggles are passed explicitly to whoever needs them instead of
//! being looked up from ambient state.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Recipient editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of recipients (`None` = unlimited)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_recipients: Option<usize>,

    /// Feature toggles
    pub features: EditorFeatures,
}

impl EditorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With recipient cap
    #[inline]
    #[must_use]
    pub fn with_max_recipients(mut self, max: usize) -> Self {
        self.max_recipients = Some(max);
        self
    }

    /// With feature toggles
    #[inline]
    #[must_use]
    pub fn with_features(mut self, features: EditorFeatures) -> Self {
        self.features = features;
        self
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or `max_recipients` is zero.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check values serde cannot
    ///
    /// # Errors
    /// [`ConfigError::Validation`] when the recipient cap is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_recipients == Some(0) {
            return Err(ConfigError::Validation(
                "max_recipients must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Check whether a list of `count` recipients is within the cap
    #[inline]
    #[must_use]
    pub fn allows_recipient_count(&self, count: usize) -> bool {
        self.max_recipients.map_or(true, |max| count <= max)
    }
}

/// Feature toggles for the recipient editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorFeatures {
    /// Sequential signing order may be enabled
    pub signing_order: bool,

    /// Dictate-next-signer may be enabled
    pub dictate_next_signer: bool,

    /// Switching to parallel turns assistants into signers
    pub demote_assistants_on_parallel: bool,
}

impl Default for EditorFeatures {
    fn default() -> Self {
        Self {
            signing_order: true,
            dictate_next_signer: true,
            demote_assistants_on_parallel: true,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// TOML did not parse
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Values parsed but are not usable
    #[error("invalid config: {0}")]
    Validation(String),
}
