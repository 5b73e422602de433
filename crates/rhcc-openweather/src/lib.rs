//! OpenWeatherMap data source for rhcc.
//!
//! Fetches today's sunrise/sunset and the 5-day / 3-hour forecast and hands
//! them over as an unvalidated [`rhcc_forecast::ForecastBatch`].

pub mod client;
pub mod types;

pub use client::{OpenWeatherClient, FORECAST_SAMPLES};
