//! Session Configuration
//!
//! Configuration types and defaults for a demo session.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Largest prime accepted before the generator search
    pub max_prime: u64,

    /// Presentational pause between steps (milliseconds)
    pub pause_ms: u64,

    /// Reject private keys outside [1, p-1]
    pub strict_private_keys: bool,

    /// Maximum message length in characters
    pub max_message_len: usize,

    /// Log level
    pub log_level: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_prime: 10_000,
            pause_ms: 2_000,
            strict_private_keys: false,
            max_message_len: 4_096,
            log_level: "warn".to_string(),
        }
    }
}

impl SessionConfig {
    /// Create a new configuration builder
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Self =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))
    }

    /// Get the presentational pause
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_prime < 2 {
            return Err(ConfigError::InvalidValue(
                "max_prime must be at least 2".into(),
            ));
        }

        if self.max_message_len == 0 {
            return Err(ConfigError::InvalidValue(
                "max_message_len cannot be 0".into(),
            ));
        }

        Ok(())
    }
}

/// Configuration builder
#[derive(Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Set the prime bound
    pub fn max_prime(mut self, max: u64) -> Self {
        self.config.max_prime = max;
        self
    }

    /// Set the pause in milliseconds
    pub fn pause_ms(mut self, ms: u64) -> Self {
        self.config.pause_ms = ms;
        self
    }

    /// Enable/disable strict private key checks
    pub fn strict_private_keys(mut self, enabled: bool) -> Self {
        self.config.strict_private_keys = enabled;
        self
    }

    /// Set maximum message length
    pub fn max_message_len(mut self, len: usize) -> Self {
        self.config.max_message_len = len;
        self
    }

    /// Set log level
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = level.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SessionConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
