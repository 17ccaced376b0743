//! Forecast endpoint client.

use crate::error::ForecastError;
use crate::types::{RawForecastResponse, ValidatedQuery};
use reqwest::Client;
use std::time::Duration;
use tracing::instrument;

const USER_AGENT: &str = concat!("zipcast/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    endpoint: String,
}

impl ForecastClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ForecastError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Request URL for a validated query; both values are percent-encoded.
    pub fn request_url(&self, query: &ValidatedQuery) -> String {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{}{}zip={}&country={}",
            self.endpoint,
            separator,
            urlencoding::encode(&query.zip),
            urlencoding::encode(&query.country),
        )
    }

    /// Fetch the raw forecast for `query`.
    ///
    /// Network errors, non-2xx statuses and bodies that are not JSON are
    /// fetch failures. A JSON body of the wrong shape is malformed.
    #[instrument(skip_all, fields(country = %query.country), level = "info")]
    pub async fn fetch(&self, query: &ValidatedQuery) -> Result<RawForecastResponse, ForecastError> {
        let url = self.request_url(query);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Forecast endpoint returned status {}", status);
            return Err(ForecastError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| ForecastError::Decode(e.to_string()))?;

        let forecast = RawForecastResponse::from_json(value)?;
        tracing::debug!(
            entries = forecast.list.as_ref().map_or(0, Vec::len),
            "Forecast received"
        );

        Ok(forecast)
    }
}
