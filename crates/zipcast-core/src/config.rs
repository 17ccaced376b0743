use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Largest slot count the upstream 5-day / 3-hour feed can fill (40 entries).
pub const MAX_SLOT_COUNT: usize = 5;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Forecast proxy settings
    #[serde(default)]
    pub forecast: ForecastConfig,

    /// Query log backend settings
    #[serde(default)]
    pub logger: LoggerConfig,

    /// Render target settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Shared HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Forecast endpoint, queried as `?zip=..&country=..`
    #[serde(default = "default_forecast_endpoint")]
    pub endpoint: String,

    /// Country code used when only a zip code is given
    #[serde(default = "default_country")]
    pub default_country: String,
}

fn default_forecast_endpoint() -> String {
    "http://localhost:8080/weatherdata.php".to_string()
}

fn default_country() -> String {
    "us".to_string()
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            endpoint: default_forecast_endpoint(),
            default_country: default_country(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Report each validated query to the log backend
    #[serde(default)]
    pub enabled: bool,

    /// Log backend endpoint (JSON POST)
    #[serde(default = "default_logger_endpoint")]
    pub endpoint: String,
}

fn default_logger_endpoint() -> String {
    "http://localhost:8080/weatherlog.php".to_string()
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_logger_endpoint(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Number of day slots on the render target
    #[serde(default = "default_slot_count")]
    pub slot_count: usize,
}

fn default_slot_count() -> usize {
    3
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            slot_count: default_slot_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Fallback tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if the file is missing
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default config to {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.forecast.endpoint, "forecast.endpoint", &mut result);

        let country = self.forecast.default_country.trim();
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            result.add_error(
                "forecast.default_country",
                "Country code must be exactly two letters",
            );
        }

        if self.logger.enabled {
            self.validate_url(&self.logger.endpoint, "logger.endpoint", &mut result);
        } else {
            result.add_warning("logger", "Query logging disabled");
        }

        if self.display.slot_count == 0 {
            result.add_error("display.slot_count", "Slot count must be greater than 0");
        } else if self.display.slot_count > MAX_SLOT_COUNT {
            result.add_error(
                "display.slot_count",
                format!(
                    "Slot count {} exceeds the {} days the forecast feed covers",
                    self.display.slot_count, MAX_SLOT_COUNT
                ),
            );
        }

        if self.http.timeout_secs == 0 {
            result.add_error("http.timeout_secs", "Timeout must be greater than 0");
        } else if self.http.timeout_secs > 120 {
            result.add_warning("http.timeout_secs", "Timeout is unusually long (>120s)");
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("zipcast");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_invalid_forecast_url() {
        let mut config = Config::default();
        config.forecast.endpoint = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "forecast.endpoint"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.forecast.endpoint = "ftp://localhost:8080".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_url_with_port_and_path() {
        let mut config = Config::default();
        config.forecast.endpoint = "https://weather.example.com:8443/api/forecast.php".to_string();
        assert!(config.validate().is_valid());

        config.forecast.endpoint = "http://:8080/forecast".to_string();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "forecast.endpoint"));
    }

    #[test]
    fn test_logger_url_only_checked_when_enabled() {
        let mut config = Config::default();
        config.logger.endpoint = "nope".to_string();
        assert!(config.validate().is_valid());

        config.logger.enabled = true;
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "logger.endpoint"));
    }

    #[test]
    fn test_disabled_logger_is_warning() {
        let result = Config::default().validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "logger"));
    }

    #[test]
    fn test_slot_count_bounds() {
        let mut config = Config::default();
        config.display.slot_count = 0;
        assert!(!config.validate().is_valid());

        config.display.slot_count = MAX_SLOT_COUNT + 1;
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "display.slot_count"));

        config.display.slot_count = MAX_SLOT_COUNT;
        assert!(config.validate().is_valid());
    }

    #[test]
    fn test_bad_default_country() {
        let mut config = Config::default();
        config.forecast.default_country = "usa".to_string();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "forecast.default_country"));
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "http.timeout_secs"));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.display.slot_count, 3);
        assert_eq!(config.forecast.default_country, "us");
    }

    #[test]
    fn test_load_from_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[forecast]\nendpoint = \"https://example.com/forecast\"\n\n[display]\nslot_count = 5\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.forecast.endpoint, "https://example.com/forecast");
        assert_eq!(config.forecast.default_country, "us");
        assert_eq!(config.display.slot_count, 5);
        assert_eq!(config.http.timeout_secs, 10);
        assert!(!config.logger.enabled);
    }

    #[test]
    fn test_load_from_sections_without_endpoints() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[forecast]\ndefault_country = \"ca\"\n\n[logger]\nenabled = true\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.forecast.default_country, "ca");
        assert_eq!(config.forecast.endpoint, ForecastConfig::default().endpoint);
        assert!(config.logger.enabled);
        assert_eq!(config.logger.endpoint, LoggerConfig::default().endpoint);
        assert!(config.validate().is_valid());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display\nslot_count = 3").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
