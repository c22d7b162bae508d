use async_trait::async_trait;
use serde::Serialize;

use crate::error::{ForecastError, Result};

/// Content type sent with every request that carries a body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fully resolved HTTP request, independent of the client library that sends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Serialized JSON body, if any
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    /// Builds a POST request whose body is `body` encoded as JSON.
    pub fn post_json<B: Serialize>(url: impl Into<String>, body: &B) -> Result<Self> {
        let body = serde_json::to_string(body).map_err(|e| ForecastError::Encode(e.to_string()))?;
        Ok(Self {
            method: Method::Post,
            url: url.into(),
            body: Some(body),
        })
    }

    /// Value of the `Content-Type` header for this request.
    pub fn content_type(&self) -> Option<&'static str> {
        self.body.as_ref().map(|_| JSON_CONTENT_TYPE)
    }
}

/// Status and raw body of a response, read in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the prediction service.
///
/// Futures are not required to be `Send` so browser fetch bindings can
/// implement this directly. Implementations report every failure to obtain
/// a complete response as [`ForecastError::Transport`]; status codes are
/// not errors at this level.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::ForecastRequest;
    use chrono::NaiveDate;

    #[test]
    fn test_post_json_sets_body_and_content_type() {
        let payload = ForecastRequest {
            start_date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        };
        let request = ApiRequest::post_json("http://127.0.0.1:8000/predict/", &payload).unwrap();

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body.as_deref(), Some(r#"{"start_date":"2026-10-19"}"#));
        assert_eq!(request.content_type(), Some("application/json"));
    }

    #[test]
    fn test_get_has_no_body() {
        let request = ApiRequest::get("http://127.0.0.1:8000/");
        assert_eq!(request.body, None);
        assert_eq!(request.content_type(), None);
    }

    #[test]
    fn test_success_range() {
        let ok = |status| RawResponse { status, body: String::new() }.is_success();
        assert!(ok(200));
        assert!(ok(204));
        assert!(!ok(199));
        assert!(!ok(301));
        assert!(!ok(400));
        assert!(!ok(500));
    }
}
