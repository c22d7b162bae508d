//! Common transport-layer types shared between the prediction service and its clients.
//! These structs mirror the service's request/response payloads so every host
//! (browser, terminal) serializes and deserializes the same shapes.

mod dates;

pub use dates::{FORECAST_HORIZON_DAYS, WeekRange, format_iso_date, week_containing};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ===================== Forecast =====================

/// Request body for `POST /predict/`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForecastRequest {
    /// Anchor date of the forecast window, serialized as `YYYY-MM-DD`
    pub start_date: NaiveDate,
}

/// Successful response of `POST /predict/`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ForecastResponse {
    /// Sum of the predicted sales over the forecast horizon
    pub total_predicted_sales: f64,
}

// ===================== Weekly forecast =====================

/// Request body for `POST /sales-forecast-week/`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyForecastRequest {
    /// Any date inside the week of interest
    pub order_date: NaiveDate,
}

/// Successful response of `POST /sales-forecast-week/`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeeklyForecastResponse {
    pub predicted_sales: f64,
}

// ===================== Service =====================

/// Welcome payload served on `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceStatus {
    pub message: String,
}

/// Error body returned with any non-2xx status.
///
/// `detail` is usually a string, but request validation failures carry a
/// list of objects instead, so it is kept as raw JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorDetail {
    /// Text shown to the user for this error.
    ///
    /// Strings are used verbatim, other JSON values in their compact form,
    /// and a missing detail falls back to the HTTP status.
    pub fn message(&self, status: u16) -> String {
        match &self.detail {
            Some(Value::String(detail)) => detail.clone(),
            Some(Value::Null) | None => format!("HTTP {}", status),
            Some(other) => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_forecast_request_wire_shape() {
        let request = ForecastRequest {
            start_date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        };

        let body = serde_json::to_string(&request).unwrap();
        assert_eq!(body, r#"{"start_date":"2026-10-19"}"#);
    }

    #[test]
    fn test_weekly_request_wire_shape() {
        let request = WeeklyForecastRequest {
            order_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        };

        let body = serde_json::to_value(request).unwrap();
        assert_eq!(body, json!({ "order_date": "2026-01-05" }));
    }

    #[test]
    fn test_forecast_response_accepts_integer_total() {
        let response: ForecastResponse =
            serde_json::from_str(r#"{"total_predicted_sales": 4821}"#).unwrap();
        assert_eq!(response.total_predicted_sales, 4821.0);
    }

    #[test]
    fn test_error_detail_string_is_verbatim() {
        let error: ErrorDetail =
            serde_json::from_str(r#"{"detail": "start_date is required"}"#).unwrap();
        assert_eq!(error.message(400), "start_date is required");
    }

    #[test]
    fn test_error_detail_validation_list_is_compact_json() {
        let error: ErrorDetail = serde_json::from_value(json!({
            "detail": [{ "loc": ["body", "start_date"], "msg": "field required" }]
        }))
        .unwrap();

        assert_eq!(
            error.message(422),
            r#"[{"loc":["body","start_date"],"msg":"field required"}]"#
        );
    }

    #[test]
    fn test_error_detail_missing_falls_back_to_status() {
        let error: ErrorDetail = serde_json::from_str("{}").unwrap();
        assert_eq!(error.message(503), "HTTP 503");

        let error: ErrorDetail = serde_json::from_str(r#"{"detail": null}"#).unwrap();
        assert_eq!(error.message(500), "HTTP 500");
    }
}
