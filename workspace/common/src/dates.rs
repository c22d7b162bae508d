//! Calendar helpers for the dates exchanged with the prediction service.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of days the service aggregates from `start_date` onwards.
pub const FORECAST_HORIZON_DAYS: u32 = 7;

/// Formats a date the way the service expects it (`YYYY-MM-DD`).
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Monday to Sunday span, both ends inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Returns the Monday-based week containing `date`.
///
/// The weekly endpoint aggregates exactly this span, so clients use it to
/// label the figure they receive. `None` when the week runs past the
/// representable calendar.
pub fn week_containing(date: NaiveDate) -> Option<WeekRange> {
    let start = date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))?;
    let end = start.checked_add_days(Days::new(6))?;
    Some(WeekRange { start, end })
}
