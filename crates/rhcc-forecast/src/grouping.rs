//! Localize classified forecasts and split them into calendar-day groups.

use chrono::{DateTime, Datelike, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

use crate::types::{ClassifiedForecast, ContactMethod};

/// Date label format, e.g. "Monday, January 2, 2006"
const DATE_LABEL_FORMAT: &str = "%A, %B %-d, %Y";

/// A classified forecast shown in the report's local timezone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub local_time: DateTime<Tz>,
    pub method: ContactMethod,
    /// Set only on the first row of a day group
    pub date_label: Option<String>,
}

impl DisplayRow {
    #[must_use]
    pub fn starts_group(&self) -> bool {
        self.date_label.is_some()
    }
}

/// Rows of one local calendar day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayGroup<'a> {
    pub date_label: &'a str,
    pub rows: &'a [DisplayRow],
}

/// Day-grouped report rows plus the timezone abbreviation shown in headers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalSchedule {
    pub rows: Vec<DisplayRow>,
    /// Taken from the first row and assumed constant for the whole report.
    /// Empty when there are no rows.
    pub timezone_abbreviation: String,
}

impl LocalSchedule {
    /// Borrow the rows as day groups, in order.
    #[must_use]
    pub fn day_groups(&self) -> Vec<DayGroup<'_>> {
        let mut groups = Vec::new();
        let mut start = 0;

        for (i, row) in self.rows.iter().enumerate().skip(1) {
            if row.starts_group() {
                groups.push(self.group_at(start, i));
                start = i;
            }
        }
        if start < self.rows.len() {
            groups.push(self.group_at(start, self.rows.len()));
        }

        groups
    }

    fn group_at(&self, start: usize, end: usize) -> DayGroup<'_> {
        DayGroup {
            date_label: self.rows[start].date_label.as_deref().unwrap_or_default(),
            rows: &self.rows[start..end],
        }
    }
}

/// Convert every forecast to `timezone` and mark where a new local day begins.
///
/// A new group starts whenever the local weekday differs from the previous
/// row's. Rows are never reordered or dropped.
#[must_use]
pub fn group_by_local_day(records: &[ClassifiedForecast], timezone: Tz) -> LocalSchedule {
    let mut rows = Vec::with_capacity(records.len());
    let mut previous: Option<Weekday> = None;
    let mut timezone_abbreviation = String::new();

    for record in records {
        let local_time = record.forecast.time.with_timezone(&timezone);
        let weekday = local_time.weekday();

        let date_label = if previous != Some(weekday) {
            previous = Some(weekday);
            Some(local_time.format(DATE_LABEL_FORMAT).to_string())
        } else {
            None
        };

        if rows.is_empty() {
            timezone_abbreviation = local_time.format("%Z").to_string();
        }

        rows.push(DisplayRow {
            local_time,
            method: record.method,
            date_label,
        });
    }

    tracing::debug!(
        "Grouped {} rows in {} ({})",
        rows.len(),
        timezone.name(),
        timezone_abbreviation
    );

    LocalSchedule {
        rows,
        timezone_abbreviation,
    }
}
