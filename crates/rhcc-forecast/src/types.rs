use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit the data source reported temperatures in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
    Kelvin,
}

impl TemperatureUnit {
    /// Convert a reading in this unit to degrees Fahrenheit
    #[must_use]
    pub fn to_fahrenheit(self, value: f64) -> f64 {
        match self {
            Self::Fahrenheit => value,
            Self::Celsius => value * 9.0 / 5.0 + 32.0,
            Self::Kelvin => (value - 273.15) * 9.0 / 5.0 + 32.0,
        }
    }
}

/// One forecast sample as handed over by a data source.
///
/// Every field is optional so that a partially populated provider payload can
/// still be represented; the extractor decides what is mandatory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub timestamp: Option<DateTime<Utc>>,
    pub temperature: Option<f64>,
    pub cloud_coverage: Option<i64>,
    /// Precipitation over the sample's 3-hour bucket. Providers omit it on dry slots.
    pub precipitation: Option<f64>,
}

/// Normalized forecast record the decision engine works on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelevantForecast {
    pub time: DateTime<Utc>,
    /// Degrees Fahrenheit
    pub temperature: f64,
    pub cloud_percentage: u8,
    pub rain: f64,
}

/// Sunrise and sunset for the current day.
///
/// A single window is applied to every sample of a report, even though the
/// report spans five days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaylightWindow {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

impl DaylightWindow {
    #[must_use]
    pub fn new(sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> Self {
        Self { sunrise, sunset }
    }

    /// True when `time` falls strictly between sunrise and sunset
    #[must_use]
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        time > self.sunrise && time < self.sunset
    }
}

/// Preferred way of reaching someone during a forecast slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Phone,
    Text,
    Email,
    Default,
}

impl ContactMethod {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Text => "text",
            Self::Email => "email",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A forecast record paired with its recommendation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedForecast {
    pub forecast: RelevantForecast,
    pub method: ContactMethod,
}

/// Everything a data source returns for one report run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBatch {
    pub samples: Vec<RawSample>,
    pub daylight: DaylightWindow,
    pub unit: TemperatureUnit,
}
