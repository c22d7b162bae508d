use std::fmt;

use common::{FORECAST_HORIZON_DAYS, WeekRange, format_iso_date};

/// Text shown for every failure to obtain a usable response.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data. Make sure the backend is running.";

/// What the output region shows after a request settles.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayMessage {
    Forecast { total_predicted_sales: f64 },
    WeeklyForecast { week: WeekRange, predicted_sales: f64 },
    Status { message: String },
    Rejected { detail: String },
    Unavailable,
}

impl fmt::Display for DisplayMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMessage::Forecast {
                total_predicted_sales,
            } => write!(
                f,
                "Total Predicted Sales for Next {} Days: {}",
                FORECAST_HORIZON_DAYS, total_predicted_sales
            ),
            DisplayMessage::WeeklyForecast {
                week,
                predicted_sales,
            } => write!(
                f,
                "Predicted Sales for Week of {} to {}: {}",
                format_iso_date(week.start),
                format_iso_date(week.end),
                predicted_sales
            ),
            DisplayMessage::Status { message } => f.write_str(message),
            DisplayMessage::Rejected { detail } => write!(f, "Error: {}", detail),
            DisplayMessage::Unavailable => f.write_str(FETCH_FAILED_MESSAGE),
        }
    }
}

/// The output region a handler writes into.
///
/// `show` replaces whatever was displayed before.
pub trait ResultView {
    fn show(&self, message: &DisplayMessage);

    /// Called when the submit trigger should be disabled or re-enabled.
    fn set_pending(&self, _pending: bool) {}
}

impl<V: ResultView + ?Sized> ResultView for &V {
    fn show(&self, message: &DisplayMessage) {
        (**self).show(message)
    }

    fn set_pending(&self, pending: bool) {
        (**self).set_pending(pending)
    }
}
