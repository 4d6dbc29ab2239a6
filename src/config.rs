//! Encoder configuration.
//!
//! Controls the name of the produced model and the scheduling horizon
//! that bounds every time variable. Can be loaded from TOML so the
//! horizon is adjustable without code changes.
//!
//! # Examples
//!
//! ```
//! use u_schedule_cp::config::EncoderConfig;
//!
//! let config = EncoderConfig::from_toml_str(r#"
//!     model_name = "press_shop"
//!     horizon = 480
//! "#).unwrap();
//!
//! assert_eq!(config.horizon, 480);
//! assert_eq!(config.model_name, "press_shop");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default upper bound of all time variables.
pub const MAX_VALUE: i64 = 1 << 25;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Encoder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Name given to the produced model.
    pub model_name: String,

    /// Upper bound of every start, end and span variable.
    pub horizon: i64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            model_name: "schedule".to_string(),
            horizon: MAX_VALUE,
        }
    }
}

impl EncoderConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML or
    /// fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the model name.
    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = name.into();
        self
    }

    /// Sets the horizon.
    pub fn with_horizon(mut self, horizon: i64) -> Self {
        self.horizon = horizon;
        self
    }

    /// Checks that the horizon is positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon <= 0 {
            return Err(ConfigError::Invalid(format!(
                "horizon must be positive, got {}",
                self.horizon
            )));
        }
        Ok(())
    }
}
