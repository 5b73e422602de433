//! OpenWeatherMap HTTP client.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use rhcc_core::{AppError, NetworkError, OpenWeatherConfig, WeatherError};
use rhcc_forecast::{DaylightWindow, ForecastBatch, RawSample, TemperatureUnit};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::types::{ApiErrorBody, CurrentResponse, ForecastResponse};

/// Five days of 3-hour slots
pub const FORECAST_SAMPLES: u32 = 5 * 8;

const UNITS: &str = "imperial";
const LANGUAGE: &str = "en";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("rhcc/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    location: String,
}

impl OpenWeatherClient {
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn new(config: &OpenWeatherConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            location: config.location.clone(),
        })
    }

    /// Temperatures are always requested in imperial units.
    #[must_use]
    pub fn unit(&self) -> TemperatureUnit {
        TemperatureUnit::Fahrenheit
    }

    /// Fetch today's sunrise and sunset from current conditions.
    ///
    /// # Errors
    ///
    /// Network, HTTP status and payload errors.
    #[instrument(skip(self), fields(location = %self.location), level = "info")]
    pub async fn current_daylight(&self) -> Result<DaylightWindow, AppError> {
        let current: CurrentResponse = self.get("weather", &[]).await?;

        current.daylight().ok_or_else(|| {
            NetworkError::InvalidResponse("missing sys.sunrise or sys.sunset".to_string()).into()
        })
    }

    /// Fetch the 5-day / 3-hour forecast as raw samples, in provider order.
    ///
    /// # Errors
    ///
    /// Network, HTTP status and payload errors.
    #[instrument(skip(self), fields(location = %self.location), level = "info")]
    pub async fn five_day_samples(&self) -> Result<Vec<RawSample>, AppError> {
        let count = FORECAST_SAMPLES.to_string();
        let forecast: ForecastResponse = self.get("forecast", &[("cnt", count.as_str())]).await?;

        tracing::debug!("Received {} forecast entries", forecast.list.len());
        Ok(forecast.list.into_iter().map(RawSample::from).collect())
    }

    /// Fetch the daylight window and forecast concurrently.
    ///
    /// # Errors
    ///
    /// The first failure of either request.
    pub async fn fetch_batch(&self) -> Result<ForecastBatch, AppError> {
        let (daylight, samples) =
            tokio::try_join!(self.current_daylight(), self.five_day_samples())?;

        Ok(ForecastBatch {
            samples,
            daylight,
            unit: self.unit(),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        extra: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", self.location.as_str()),
                ("units", UNITS),
                ("lang", LANGUAGE),
                ("appid", self.api_key.as_str()),
            ])
            .query(extra)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| NetworkError::InvalidResponse(format!("JSON parse error: {}", e)).into());
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or(text);

        tracing::warn!("OpenWeatherMap returned {}: {}", status, message);

        let err = match status {
            StatusCode::UNAUTHORIZED => WeatherError::InvalidApiKey,
            StatusCode::NOT_FOUND => WeatherError::LocationNotFound(self.location.clone()),
            StatusCode::TOO_MANY_REQUESTS => WeatherError::ServiceUnavailable,
            s if s.is_server_error() => WeatherError::ServiceUnavailable,
            s => WeatherError::ApiError(format!("{}: {}", s, message)),
        };
        Err(err.into())
    }
}
