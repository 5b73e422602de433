//! OpenWeatherMap response shapes.
//!
//! Fields are optional on purpose: a sparse payload still deserializes and
//! the forecast extractor reports exactly which field was missing.

use chrono::{DateTime, Utc};
use rhcc_forecast::{DaylightWindow, RawSample};
use serde::Deserialize;

/// `GET /forecast` response
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ApiForecastEntry>,
}

/// One 3-hour slot of the 5-day forecast
#[derive(Debug, Deserialize)]
pub struct ApiForecastEntry {
    pub dt: Option<i64>,
    pub main: Option<ApiMain>,
    pub clouds: Option<ApiClouds>,
    pub rain: Option<ApiRain>,
}

#[derive(Debug, Deserialize)]
pub struct ApiMain {
    pub temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ApiClouds {
    pub all: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ApiRain {
    #[serde(rename = "3h")]
    pub three_hours: Option<f64>,
}

/// `GET /weather` response, only what sunrise/sunset needs
#[derive(Debug, Deserialize)]
pub struct CurrentResponse {
    pub sys: Option<ApiSys>,
}

#[derive(Debug, Deserialize)]
pub struct ApiSys {
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

/// Error body, e.g. `{"cod": 401, "message": "Invalid API key"}`
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}

fn from_unix(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(seconds, 0)
}

impl From<ApiForecastEntry> for RawSample {
    fn from(entry: ApiForecastEntry) -> Self {
        RawSample {
            timestamp: entry.dt.and_then(from_unix),
            temperature: entry.main.and_then(|m| m.temp),
            cloud_coverage: entry.clouds.and_then(|c| c.all),
            precipitation: entry.rain.and_then(|r| r.three_hours),
        }
    }
}

impl CurrentResponse {
    /// Today's daylight window, if both instants are present
    #[must_use]
    pub fn daylight(&self) -> Option<DaylightWindow> {
        let sys = self.sys.as_ref()?;
        let sunrise = sys.sunrise.and_then(from_unix)?;
        let sunset = sys.sunset.and_then(from_unix)?;
        Some(DaylightWindow::new(sunrise, sunset))
    }
}
