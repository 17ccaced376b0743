pub mod config;
pub mod error;

pub use config::{
    Config, DisplayConfig, ForecastConfig, GeneralConfig, HttpConfig, LoggerConfig,
    ValidationResult, MAX_SLOT_COUNT,
};
pub use error::ConfigError;

use anyhow::Result;

/// Initialize tracing for the process.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (usually the configured
/// `general.log_level`) is used.
pub fn init(default_filter: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!("Zipcast core initialized");
    Ok(())
}
