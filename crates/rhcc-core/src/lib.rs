pub mod config;
pub mod error;

pub use config::{Config, LoggingConfig, OpenWeatherConfig, ReportConfig, ValidationResult};
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt, WeatherError};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialize logging.
///
/// `RUST_LOG` takes precedence when set; otherwise `level` is used. Logs go
/// to stderr so stdout stays reserved for the report.
///
/// # Errors
///
/// Fails if `level` is not a valid filter or a subscriber is already installed.
pub fn init(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))?;

    tracing::debug!("Logging initialized at level {}", level);
    Ok(())
}
