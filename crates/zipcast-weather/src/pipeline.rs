//! One forecast request from raw input to filled display slots.

use tokio::task::JoinHandle;

use crate::error::{ErrorKind, ForecastError, LoggerError, RenderError, ValidationError};
use crate::provider::ForecastClient;
use crate::query_log::QueryLogger;
use crate::reduce::reduce;
use crate::render::{log_summaries, render, DisplaySlot};
use crate::types::{DaySummary, ValidatedQuery};
use crate::validate::{validate, validate_zip};

/// User-visible message sink
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// What happened to a request. No variant is fatal.
#[derive(Debug)]
pub enum RequestOutcome {
    /// Input rejected; nothing was fetched
    Rejected(ValidationError),

    /// Fetch or reduction failed; no slot was written
    Failed(ForecastError),

    /// Forecast reduced and handed to the slots
    Rendered {
        place: String,
        summaries: Vec<DaySummary>,
        /// Set when a slot write failed part way
        render_error: Option<RenderError>,
        /// Detached query log task, if logging is enabled
        logger: Option<JoinHandle<Result<(), LoggerError>>>,
    },
}

impl RequestOutcome {
    /// Failure kind for the request itself (logger outcome not included)
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Rejected(e) => Some(e.kind()),
            Self::Failed(e) => Some(e.kind()),
            Self::Rendered {
                render_error: Some(e),
                ..
            } => Some(e.kind()),
            Self::Rendered { .. } => None,
        }
    }
}

pub struct ForecastPipeline<N> {
    client: ForecastClient,
    logger: Option<QueryLogger>,
    notifier: N,
    default_country: String,
}

impl<N: Notifier> ForecastPipeline<N> {
    pub fn new(client: ForecastClient, notifier: N, default_country: impl Into<String>) -> Self {
        Self {
            client,
            logger: None,
            notifier,
            default_country: default_country.into(),
        }
    }

    /// Report each rendered query to `logger`
    pub fn with_logger(mut self, logger: QueryLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Validate, fetch, reduce and render into `slots`.
    ///
    /// One summary is produced per slot. Without `raw_country` the default
    /// country is used and only the zip is validated.
    pub async fn run<S: DisplaySlot>(
        &self,
        raw_zip: &str,
        raw_country: Option<&str>,
        slots: &mut [S],
    ) -> RequestOutcome {
        let query = match self.validate(raw_zip, raw_country) {
            Ok(q) => q,
            Err(e) => {
                tracing::warn!(kind = %e.kind(), error = %e, "Input rejected");
                self.notifier.alert(e.user_message());
                return RequestOutcome::Rejected(e);
            }
        };

        let forecast = match self.client.fetch(&query).await {
            Ok(f) => f,
            Err(e) => return self.fail(e),
        };

        let summaries = match reduce(&forecast, slots.len()) {
            Ok(s) => s,
            Err(e) => return self.fail(e.into()),
        };

        let place = forecast.place_name().to_string();
        let logger = self
            .logger
            .as_ref()
            .map(|l| l.spawn(query.zip.clone(), place.clone()));

        let render_error = match render(&summaries, slots) {
            Ok(()) => {
                log_summaries(&summaries);
                None
            }
            Err(e) => {
                tracing::error!(kind = %e.kind(), error = %e, "Error updating display");
                Some(e)
            }
        };

        RequestOutcome::Rendered {
            place,
            summaries,
            render_error,
            logger,
        }
    }

    fn validate(
        &self,
        raw_zip: &str,
        raw_country: Option<&str>,
    ) -> Result<ValidatedQuery, ValidationError> {
        match raw_country {
            Some(country) => validate(raw_zip, country),
            None => Ok(ValidatedQuery {
                zip: validate_zip(raw_zip)?,
                country: self.default_country.clone(),
            }),
        }
    }

    fn fail(&self, e: ForecastError) -> RequestOutcome {
        tracing::error!(kind = %e.kind(), error = %e, "Forecast request failed");
        self.notifier.alert(e.user_message());
        RequestOutcome::Failed(e)
    }
}
