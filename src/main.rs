use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use zipcast_core::{Config, ConfigError, MAX_SLOT_COUNT};
use zipcast_weather::{
    ForecastClient, ForecastPipeline, Notifier, QueryLogger, RequestOutcome, TextSlot,
};

/// Day and night forecast for a zip code
#[derive(Debug, Parser)]
#[command(name = "zipcast", version, about)]
struct Cli {
    /// Five-digit zip code
    zip: String,

    /// Two-letter country code (defaults to forecast.default_country)
    #[arg(short, long)]
    country: Option<String>,

    /// Number of days to show
    #[arg(short, long)]
    slots: Option<usize>,

    /// Config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Don't report this query to the log backend
    #[arg(long)]
    no_log: bool,
}

/// Alerts go to stderr; the forecast table goes to stdout
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = loaded.inspect_err(|e| eprintln!("{}", e.user_message()))?;

    zipcast_core::init(&config.general.log_level)?;

    let validation = config.validate();
    for warning in &validation.warnings {
        tracing::warn!("Config warning: {}", warning);
    }
    if !validation.is_valid() {
        return Err(ConfigError::Invalid(validation.error_summary()).into());
    }

    let slot_count = cli.slots.unwrap_or(config.display.slot_count);
    if slot_count == 0 || slot_count > MAX_SLOT_COUNT {
        bail!("--slots must be between 1 and {}", MAX_SLOT_COUNT);
    }

    let timeout = Duration::from_secs(config.http.timeout_secs);
    let client = ForecastClient::new(config.forecast.endpoint.clone(), timeout)?;
    let mut pipeline =
        ForecastPipeline::new(client, StderrNotifier, config.forecast.default_country.clone());

    if config.logger.enabled && !cli.no_log {
        pipeline = pipeline.with_logger(QueryLogger::new(config.logger.endpoint.clone(), timeout)?);
    }

    let mut slots = vec![TextSlot::default(); slot_count];
    let outcome = pipeline
        .run(&cli.zip, cli.country.as_deref(), &mut slots)
        .await;

    if let RequestOutcome::Rendered { place, logger, .. } = outcome {
        if !place.is_empty() {
            println!("{}", place);
        }
        for slot in &slots {
            println!("{}", slot);
        }

        // Output is done; give the detached log report a chance to finish
        // before the runtime shuts down.
        if let Some(handle) = logger {
            if tokio::time::timeout(timeout, handle).await.is_err() {
                tracing::debug!("Query log still pending at exit");
            }
        }
    }

    Ok(())
}
