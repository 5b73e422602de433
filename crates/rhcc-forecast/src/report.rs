//! End-to-end pipeline: extract, classify, group.

use chrono_tz::Tz;
use serde::Serialize;

use crate::decision::classify_all;
use crate::error::ExtractError;
use crate::extract::extract;
use crate::grouping::{group_by_local_day, LocalSchedule};
use crate::types::{ClassifiedForecast, DaylightWindow, ForecastBatch};

/// Recommendations for one forecast run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Classified forecasts in source order, timestamps in UTC
    pub entries: Vec<ClassifiedForecast>,
    pub daylight: DaylightWindow,
    pub schedule: LocalSchedule,
}

/// Turn a fetched batch into a report localized to `timezone`.
///
/// # Errors
///
/// Fails only when a sample cannot be extracted.
pub fn build_report(batch: &ForecastBatch, timezone: Tz) -> Result<Report, ExtractError> {
    let forecasts = extract(&batch.samples, batch.unit)?;
    let entries = classify_all(&forecasts, &batch.daylight);
    let schedule = group_by_local_day(&entries, timezone);

    tracing::info!(
        "Built report with {} entries across {} days",
        entries.len(),
        schedule.day_groups().len()
    );

    Ok(Report {
        entries,
        daylight: batch.daylight,
        schedule,
    })
}
