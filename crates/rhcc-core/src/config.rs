use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

pub const API_KEY_ENV: &str = "RHCC_OWM_API_KEY";
pub const LOG_LEVEL_ENV: &str = "RHCC_LOG_LEVEL";
pub const LOCATION_ENV: &str = "RHCC_LOCATION";
pub const TIMEZONE_ENV: &str = "RHCC_TIMEZONE";
pub const BASE_URL_ENV: &str = "RHCC_OWM_BASE_URL";

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOCATION: &str = "Minneapolis,US";
pub const DEFAULT_TIMEZONE: &str = "America/Chicago";
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

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
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// All errors joined into one line
    #[must_use]
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub openweather: OpenWeatherConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherConfig {
    /// OpenWeatherMap API key. Usually supplied through the environment.
    #[serde(default)]
    pub api_key: String,

    /// API root, overridable for testing against a local server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// City query understood by OpenWeatherMap, e.g. "Minneapolis,US"
    #[serde(default = "default_location")]
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// IANA timezone the report is shown in
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Map logrus-style level names onto the ones `tracing` understands.
/// `warning` becomes `warn`; `fatal` and `panic` have no tracing
/// equivalent and become `error`.
fn normalize_log_level(level: &str) -> String {
    let level = level.trim().to_ascii_lowercase();
    match level.as_str() {
        "warning" => "warn".to_string(),
        "fatal" | "panic" => "error".to_string(),
        _ => level,
    }
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            location: default_location(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from the optional config file and the process
    /// environment, then validate it. Warnings are left for the caller to
    /// report once logging is up.
    ///
    /// # Errors
    ///
    /// Fails when the file is unreadable or malformed, when the API key is
    /// missing, or when any setting is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        Self::load_from(path.as_deref(), |key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`] with an explicit file and environment lookup.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from<F>(path: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(p) if p.exists() => {
                tracing::debug!("Reading config file {}", p.display());
                let contents = std::fs::read_to_string(p)?;
                Self::from_toml_str(&contents)?
            }
            _ => Self::default(),
        };

        config.apply_env(env);
        config.logging.level = normalize_log_level(&config.logging.level);

        if config.openweather.api_key.is_empty() {
            return Err(ConfigError::MissingSetting(API_KEY_ENV.to_string()));
        }

        let validation = config.validate();
        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        Ok(config)
    }

    /// Parse a TOML document; missing sections fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] on malformed TOML.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Override settings with non-empty environment values.
    pub fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup(API_KEY_ENV) {
            self.openweather.api_key = key;
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            self.logging.level = level;
        }
        if let Some(location) = lookup(LOCATION_ENV) {
            self.openweather.location = location;
        }
        if let Some(timezone) = lookup(TIMEZONE_ENV) {
            self.report.timezone = timezone;
        }
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            self.openweather.base_url = base_url;
        }
    }

    /// Validate the configuration
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.openweather.api_key.is_empty() {
            result.add_error("openweather.api_key", format!("set {}", API_KEY_ENV));
        }

        if self.openweather.location.trim().is_empty() {
            result.add_error("openweather.location", "Location must not be empty");
        }

        self.validate_url(&self.openweather.base_url, "openweather.base_url", &mut result);

        if let Err(e) = self.timezone() {
            result.add_error("report.timezone", e.to_string());
        }

        if self.logging.level.parse::<tracing::Level>().is_err() {
            result.add_error(
                "logging.level",
                format!("Unknown log level: {}", self.logging.level),
            );
        }

        result
    }

    /// The report timezone
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for names missing from the tz database.
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.report
            .timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::Invalid(format!("Unknown timezone: {}", self.report.timezone)))
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                } else if url.scheme() == "http" {
                    result.add_warning(field_name, "API key will be sent over plain http");
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

    /// Path to the optional configuration file
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rhcc").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_reference_deployment() {
        let config = Config::default();
        assert_eq!(config.openweather.location, "Minneapolis,US");
        assert_eq!(config.report.timezone, "America/Chicago");
        assert_eq!(config.logging.level, "info");
        assert!(config.openweather.api_key.is_empty());
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let err = Config::load_from(None, env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSetting(ref v) if v == API_KEY_ENV));
    }

    #[test]
    fn test_empty_api_key_counts_as_missing() {
        let err = Config::load_from(None, env_of(&[(API_KEY_ENV, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSetting(_)));
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::load_from(
            None,
            env_of(&[
                (API_KEY_ENV, "secret"),
                (LOG_LEVEL_ENV, "debug"),
                (LOCATION_ENV, "Duluth,US"),
                (TIMEZONE_ENV, "America/New_York"),
            ]),
        )
        .unwrap();

        assert_eq!(config.openweather.api_key, "secret");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.openweather.location, "Duluth,US");
        assert_eq!(config.timezone().unwrap(), chrono_tz::America::New_York);
    }

    #[test]
    fn test_invalid_log_level() {
        let err = Config::load_from(
            None,
            env_of(&[(API_KEY_ENV, "secret"), (LOG_LEVEL_ENV, "loud")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_logrus_level_aliases_are_accepted() {
        for (given, expected) in [
            ("warning", "warn"),
            ("fatal", "error"),
            ("panic", "error"),
            ("WARN", "warn"),
            ("Debug", "debug"),
        ] {
            let config = Config::load_from(
                None,
                env_of(&[(API_KEY_ENV, "secret"), (LOG_LEVEL_ENV, given)]),
            )
            .unwrap();
            assert_eq!(config.logging.level, expected, "level {given}");
        }
    }

    #[test]
    fn test_logrus_level_alias_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"warning\"\n").unwrap();

        let config = Config::load_from(Some(&path), env_of(&[(API_KEY_ENV, "k")])).unwrap();

        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_unknown_timezone() {
        let mut config = Config::default();
        config.openweather.api_key = "k".into();
        config.report.timezone = "Mars/Olympus_Mons".into();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "report.timezone"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.openweather.api_key = "k".into();
        config.openweather.base_url = "ftp://localhost:8080".into();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_plain_http_is_only_a_warning() {
        let mut config = Config::default();
        config.openweather.api_key = "k".into();
        config.openweather.base_url = "http://127.0.0.1:8080".into();
        let result = config.validate();
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_file_then_env_layering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[openweather]
api_key = "from-file"
location = "Fargo,US"

[report]
timezone = "America/Denver"
"#,
        )
        .unwrap();

        let config = Config::load_from(Some(&path), env_of(&[(LOCATION_ENV, "Bemidji,US")])).unwrap();

        assert_eq!(config.openweather.api_key, "from-file");
        assert_eq!(config.openweather.location, "Bemidji,US");
        assert_eq!(config.report.timezone, "America/Denver");
        assert_eq!(config.openweather.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = Config::load_from(Some(&path), env_of(&[(API_KEY_ENV, "k")])).unwrap();
        assert_eq!(config.openweather.location, DEFAULT_LOCATION);
    }

    #[test]
    fn test_malformed_file() {
        let err = Config::from_toml_str("[openweather\nlocation=").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
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
}
