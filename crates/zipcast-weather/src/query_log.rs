//! Best-effort reporting of validated queries to the log backend.
//!
//! The backend stores a hash of the zip and the encrypted place name; this
//! side only posts the pair and reads back a status. Failures are reported on
//! the diagnostic channel and never retried.

use crate::error::LoggerError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::instrument;

#[derive(Debug, Serialize)]
struct LogRecord<'a> {
    zip: &'a str,
    location: &'a str,
}

#[derive(Debug, Deserialize)]
struct LogResponse {
    status: String,
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct QueryLogger {
    client: Client,
    endpoint: String,
}

impl QueryLogger {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, LoggerError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Post `{ zip, location }` and check the backend's status reply.
    #[instrument(skip_all, level = "debug")]
    pub async fn log_query(&self, zip: &str, place: &str) -> Result<(), LoggerError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&LogRecord {
                zip,
                location: place,
            })
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(LoggerError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Err(LoggerError::EmptyBody);
        }

        let reply: LogResponse =
            serde_json::from_str(&text).map_err(|e| LoggerError::InvalidBody(e.to_string()))?;

        if reply.status == "success" {
            Ok(())
        } else {
            Err(LoggerError::Rejected(reply.message.unwrap_or(reply.status)))
        }
    }

    /// Run [`log_query`](Self::log_query) on a detached task.
    ///
    /// The handle only exists so the outcome can be observed; callers must
    /// not wait on it before rendering.
    pub fn spawn(&self, zip: String, place: String) -> JoinHandle<Result<(), LoggerError>> {
        let logger = self.clone();
        tokio::spawn(async move {
            let result = logger.log_query(&zip, &place).await;
            match &result {
                Ok(()) => tracing::debug!("Query logged"),
                Err(e) => tracing::warn!(kind = %e.kind(), error = %e, "Query log failed"),
            }
            result
        })
    }
}
