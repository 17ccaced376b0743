//! Error types for the forecast request path.
//!
//! Each component fails with its own enum. [`ErrorKind`] is the flat,
//! machine-readable tag every failure maps to; it is attached to each
//! diagnostic event so the kinds stay distinguishable in logs.

use std::fmt;
use thiserror::Error;

/// Machine-readable failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyInput,
    InvalidZipFormat,
    InvalidCountryFormat,
    FetchFailure,
    MalformedForecast,
    RenderFailure,
    LoggerFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::InvalidZipFormat => "invalid_zip_format",
            Self::InvalidCountryFormat => "invalid_country_format",
            Self::FetchFailure => "fetch_failure",
            Self::MalformedForecast => "malformed_forecast",
            Self::RenderFailure => "render_failure",
            Self::LoggerFailure => "logger_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Zip code is empty")]
    EmptyInput,

    #[error("Zip code {0:?} is not exactly five digits")]
    InvalidZipFormat(String),

    #[error("Country code {0:?} is not exactly two letters")]
    InvalidCountryFormat(String),
}

impl ValidationError {
    /// Message shown to the user; each kind has its own wording.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyInput => "Zip field cannot be empty.",
            Self::InvalidZipFormat(_) => "Invalid Zip Code. Please enter a 5-digit zip code.",
            Self::InvalidCountryFormat(_) => {
                "Invalid country code. Must be a 2-letter country code."
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput => ErrorKind::EmptyInput,
            Self::InvalidZipFormat(_) => ErrorKind::InvalidZipFormat,
            Self::InvalidCountryFormat(_) => ErrorKind::InvalidCountryFormat,
        }
    }
}

/// The forecast body cannot fill the display slots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedForecast {
    #[error("response has no forecast list")]
    MissingList,

    #[error("forecast endpoint rejected the query: {0}")]
    Upstream(String),

    #[error("response has an unexpected shape: {0}")]
    Shape(String),

    #[error("forecast list has {actual} entries, {required} required")]
    TooShort { required: usize, actual: usize },

    #[error("forecast entry {index} has no {field}")]
    MissingField { index: usize, field: &'static str },
}

/// Forecast fetch failures, transport or payload.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Forecast endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Forecast body is not valid JSON: {0}")]
    Decode(String),

    #[error("Malformed forecast: {0}")]
    Malformed(#[from] MalformedForecast),
}

impl ForecastError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Malformed(_) => ErrorKind::MalformedForecast,
            Self::Network(_) | Self::Status { .. } | Self::Decode(_) => ErrorKind::FetchFailure,
        }
    }

    /// Generic message shown to the user; provider detail goes to diagnostics.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "Error obtaining weather data, please enter a valid zip code.",
            _ => "Unable to fetch weather data. Please try again later.",
        }
    }
}

/// A display slot refused a write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SlotWriteError(pub String);

/// Rendering stopped part way. Writes made before the failure are kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("display slot {index} is missing ({available} available)")]
    MissingSlot { index: usize, available: usize },

    #[error("display slot {index} rejected {field}: {source}")]
    SlotWrite {
        index: usize,
        field: &'static str,
        source: SlotWriteError,
    },
}

impl RenderError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::RenderFailure
    }
}

/// Query log round trip failures. Never shown to the user.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Log endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Log endpoint returned an empty body")]
    EmptyBody,

    #[error("Log endpoint returned an unparsable body: {0}")]
    InvalidBody(String),

    #[error("Log endpoint reported an error: {0}")]
    Rejected(String),
}

impl LoggerError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::LoggerFailure
    }
}
