//! Forecast service for Zipcast
//!
//! Validates a zip/country query, fetches the 3-hourly forecast, reduces it to
//! one day/night summary per display slot and renders it through the
//! [`DisplaySlot`] capability. Validated queries can be reported to a log
//! backend on a detached task.

pub mod error;
pub mod pipeline;
pub mod provider;
pub mod query_log;
pub mod reduce;
pub mod render;
pub mod types;
pub mod units;
pub mod validate;

pub use error::{
    ErrorKind, ForecastError, LoggerError, MalformedForecast, RenderError, SlotWriteError,
    ValidationError,
};
pub use pipeline::{ForecastPipeline, Notifier, RequestOutcome};
pub use provider::ForecastClient;
pub use query_log::QueryLogger;
pub use reduce::{reduce, ENTRIES_PER_DAY, NIGHT_OFFSET};
pub use render::{log_summaries, render, DisplaySlot, TextSlot};
pub use types::*;
pub use units::{kelvin_to_fahrenheit, to_display_unit};
pub use validate::{validate, validate_zip};
