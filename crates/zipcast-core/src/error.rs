//! Configuration error types.
//!
//! Forecast, render and logger errors live with their components in
//! `zipcast-weather`; this crate only fails while loading or saving settings.

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not available")]
    NoConfigDir,

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Configuration serialize error: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Configuration IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NoConfigDir => "No configuration directory found. Use --config.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::SerializeError(_) => "Configuration could not be saved.",
            ConfigError::Io(_) => "Configuration file could not be read or written.",
        }
    }
}
