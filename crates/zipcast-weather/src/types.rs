use serde::{Deserialize, Deserializer};
use std::fmt;

use crate::error::MalformedForecast;

/// One 3-hour bucket of the upstream forecast.
///
/// Every field is optional at decode time; the reducer decides which gaps
/// make a response unusable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawForecastEntry {
    /// `"YYYY-MM-DD HH:MM:SS"`
    #[serde(rename = "dt_txt")]
    pub timestamp_text: Option<String>,
    pub main: Option<MainReadings>,
    #[serde(default)]
    pub weather: Vec<ConditionDescriptor>,
}

impl RawForecastEntry {
    /// Date portion of the timestamp (first whitespace-delimited token)
    pub fn date_part(&self) -> Option<&str> {
        self.timestamp_text
            .as_deref()
            .and_then(|t| t.split_whitespace().next())
    }

    /// Temperature in Kelvin, `None` when absent or non-numeric
    pub fn temperature(&self) -> Option<f64> {
        self.main.as_ref().and_then(|m| m.temp)
    }

    /// Label of the first condition descriptor
    pub fn condition_label(&self) -> Option<&str> {
        self.weather.first().and_then(|w| w.main.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MainReadings {
    #[serde(default, deserialize_with = "lenient_number")]
    pub temp: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConditionDescriptor {
    /// Short label such as "Clear", "Rain" or "Clouds"
    pub main: Option<String>,
}

/// Any JSON value; only numbers survive.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct City {
    pub name: Option<String>,
}

/// Body returned by the forecast endpoint: `{ list: [...], city: { name } }`.
///
/// The forecast proxy answers rejected queries with `{ "error": "..." }`
/// and a 200 status, so `error` is kept for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawForecastResponse {
    pub list: Option<Vec<RawForecastEntry>>,
    pub city: Option<City>,
    pub error: Option<String>,
}

impl RawForecastResponse {
    /// Decode an already parsed JSON body.
    ///
    /// A body that is not an object, or whose `list` is not an array of
    /// objects, is malformed rather than a transport failure.
    pub fn from_json(value: serde_json::Value) -> Result<Self, MalformedForecast> {
        serde_json::from_value(value).map_err(|e| MalformedForecast::Shape(e.to_string()))
    }

    /// Resolved place name, empty when the upstream did not send one
    pub fn place_name(&self) -> &str {
        self.city
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .unwrap_or_default()
    }
}

/// Day/night reading pair for one display slot.
///
/// Temperatures stay in the upstream unit (Kelvin); conversion happens at
/// render time.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: String,
    pub day_temperature: Option<f64>,
    pub night_temperature: Option<f64>,
    pub day_condition: String,
    pub night_condition: String,
}

impl DaySummary {
    pub fn temperature(&self, period: Period) -> Option<f64> {
        match period {
            Period::Day => self.day_temperature,
            Period::Night => self.night_temperature,
        }
    }

    pub fn condition(&self, period: Period) -> &str {
        match period {
            Period::Day => &self.day_condition,
            Period::Night => &self.night_condition,
        }
    }
}

/// Which half of a slot a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Day,
    Night,
}

impl Period {
    pub const ALL: [Period; 2] = [Period::Day, Period::Night];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Temperature as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTemperature {
    Fahrenheit(i64),
    NotAvailable,
}

impl fmt::Display for DisplayTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fahrenheit(degrees) => write!(f, "{}°F", degrees),
            Self::NotAvailable => f.write_str("N/A"),
        }
    }
}

/// A query that passed validation. Values are trimmed but not encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuery {
    pub zip: String,
    pub country: String,
}
