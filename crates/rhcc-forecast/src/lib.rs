//! Forecast-to-contact-method decision engine.
//!
//! Normalizes raw forecast samples, classifies each one into a
//! [`ContactMethod`] and groups the results by local calendar day.

pub mod decision;
pub mod error;
pub mod extract;
pub mod grouping;
pub mod report;
pub mod types;

pub use decision::{classify, classify_all};
pub use error::ExtractError;
pub use extract::extract;
pub use grouping::{group_by_local_day, DayGroup, DisplayRow, LocalSchedule};
pub use report::{build_report, Report};
pub use types::*;
