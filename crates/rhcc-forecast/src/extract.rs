//! Normalize raw provider samples into [`RelevantForecast`] records.

use crate::error::ExtractError;
use crate::types::{RawSample, RelevantForecast, TemperatureUnit};

/// Convert every raw sample into a [`RelevantForecast`], one-to-one and in
/// the order given.
///
/// A missing precipitation amount is read as no rain. Any other missing or
/// out-of-range field aborts the whole extraction.
///
/// # Errors
///
/// Returns the first [`ExtractError`] encountered.
pub fn extract(
    samples: &[RawSample],
    unit: TemperatureUnit,
) -> Result<Vec<RelevantForecast>, ExtractError> {
    let forecasts = samples
        .iter()
        .enumerate()
        .map(|(index, sample)| extract_one(index, sample, unit))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("Extracted {} forecast records", forecasts.len());
    Ok(forecasts)
}

fn extract_one(
    index: usize,
    sample: &RawSample,
    unit: TemperatureUnit,
) -> Result<RelevantForecast, ExtractError> {
    let time = sample.timestamp.ok_or(ExtractError::MissingField {
        index,
        field: "timestamp",
    })?;

    let temperature = sample.temperature.ok_or(ExtractError::MissingField {
        index,
        field: "temperature",
    })?;
    if !temperature.is_finite() {
        return Err(ExtractError::InvalidTemperature { index });
    }

    let cloud = sample.cloud_coverage.ok_or(ExtractError::MissingField {
        index,
        field: "cloud_coverage",
    })?;
    let cloud_percentage = u8::try_from(cloud)
        .ok()
        .filter(|c| *c <= 100)
        .ok_or(ExtractError::CloudOutOfRange {
            index,
            value: cloud,
        })?;

    let rain = sample.precipitation.unwrap_or(0.0);
    if !rain.is_finite() || rain < 0.0 {
        return Err(ExtractError::InvalidPrecipitation { index, value: rain });
    }

    Ok(RelevantForecast {
        time,
        temperature: unit.to_fahrenheit(temperature),
        cloud_percentage,
        rain,
    })
}
