//! Reconciler configuration.
//!
//! [`ReconcilerConfig`] selects between the documented default contract and
//! the stricter alternatives for the two places where drift handling is a
//! policy choice: reads that find nothing, and which key a field delete uses.
//! It deserializes from JSON so the hosting runtime can pass it through as-is.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a read does when the remote entity does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotFoundPolicy {
    /// Surface a remote-call error naming the key
    #[default]
    Error,
    /// Clear the external identity and report the entity as absent
    MarkAbsent,
}

/// Which key a registration field delete addresses the remote entity by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteKeySource {
    /// The `field_key` currently declared in configuration
    #[default]
    Configuration,
    /// The identity captured when the entity was created
    CapturedIdentity,
}

/// Errors raised while building a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Failed to parse configuration: {message}")]
    Parse { message: String },
}

/// Behavior switches shared by the reconcilers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Read behavior for missing entities
    pub not_found: NotFoundPolicy,
    /// Key source for registration field deletes
    pub delete_key: DeleteKeySource,
    /// `base_data_type` written when a registration field is created
    pub default_base_data_type: String,
    /// Refresh server-computed registration field attributes right after create
    pub read_after_create: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            not_found: NotFoundPolicy::Error,
            delete_key: DeleteKeySource::Configuration,
            default_base_data_type: "string".to_string(),
            read_after_create: true,
        }
    }
}

impl ReconcilerConfig {
    pub fn builder() -> ReconcilerConfigBuilder {
        ReconcilerConfigBuilder::new()
    }

    /// Parse and validate a configuration passed by the hosting runtime.
    /// Missing keys take their defaults.
    pub fn from_json(value: Value) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_value(value).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_base_data_type.trim().is_empty() {
            return Err(ConfigError::InvalidConfiguration {
                message: "default_base_data_type cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`ReconcilerConfig`].
///
/// # Examples
///
/// ```rust
/// use cidaas_provider::config::{DeleteKeySource, NotFoundPolicy, ReconcilerConfig};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ReconcilerConfig::builder()
///     .with_not_found(NotFoundPolicy::MarkAbsent)
///     .with_delete_key(DeleteKeySource::CapturedIdentity)
///     .build()?;
/// assert!(config.read_after_create);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReconcilerConfigBuilder {
    config: ReconcilerConfig,
}

impl ReconcilerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_not_found(mut self, policy: NotFoundPolicy) -> Self {
        self.config.not_found = policy;
        self
    }

    pub fn with_delete_key(mut self, source: DeleteKeySource) -> Self {
        self.config.delete_key = source;
        self
    }

    pub fn with_default_base_data_type(mut self, base_data_type: impl Into<String>) -> Self {
        self.config.default_base_data_type = base_data_type.into();
        self
    }

    pub fn with_read_after_create(mut self, enabled: bool) -> Self {
        self.config.read_after_create = enabled;
        self
    }

    pub fn build(self) -> Result<ReconcilerConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
