//! Typed calls to the prediction service.
//!
//! The client owns the status-based branching: a 2xx body is decoded into
//! the expected payload, anything else is decoded as an [`ErrorDetail`].
//! Both bodies must be valid JSON; the status alone never decides whether
//! the body is parsed.

use chrono::NaiveDate;
use common::{
    ErrorDetail, ForecastRequest, ForecastResponse, ServiceStatus, WeeklyForecastRequest,
    WeeklyForecastResponse,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, trace, warn};

use crate::error::Result;
use crate::transport::{ApiRequest, RawResponse, Transport};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const PREDICT_PATH: &str = "/predict/";
pub const WEEKLY_FORECAST_PATH: &str = "/sales-forecast-week/";
pub const STATUS_PATH: &str = "/";

/// Where the prediction service lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Scheme, host and port, e.g. `http://127.0.0.1:8000`
    pub base_url: String,
    pub predict_path: String,
    pub weekly_path: String,
    pub status_path: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

impl Endpoints {
    /// Default paths under a different base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            predict_path: PREDICT_PATH.to_string(),
            weekly_path: WEEKLY_FORECAST_PATH.to_string(),
            status_path: STATUS_PATH.to_string(),
        }
    }

    /// Joins the base URL and `path` with exactly one slash between them.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn predict_url(&self) -> String {
        self.url(&self.predict_path)
    }

    pub fn weekly_url(&self) -> String {
        self.url(&self.weekly_path)
    }

    pub fn status_url(&self) -> String {
        self.url(&self.status_path)
    }
}

/// Outcome of a call that reached the service.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    /// 2xx with the expected payload
    Accepted(T),
    /// Any other status, with the message taken from `detail`
    Rejected { status: u16, detail: String },
}

pub struct ForecastClient<T> {
    transport: T,
    endpoints: Endpoints,
}

impl<T: Transport> ForecastClient<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Requests the aggregate forecast for the horizon starting at `start_date`.
    #[instrument(skip(self))]
    pub async fn predict(&self, start_date: NaiveDate) -> Result<Reply<ForecastResponse>> {
        let url = self.endpoints.predict_url();
        self.post(&url, &ForecastRequest { start_date }).await
    }

    /// Requests the aggregate forecast for the Monday-based week containing `order_date`.
    #[instrument(skip(self))]
    pub async fn weekly_forecast(&self, order_date: NaiveDate) -> Result<Reply<WeeklyForecastResponse>> {
        let url = self.endpoints.weekly_url();
        self.post(&url, &WeeklyForecastRequest { order_date }).await
    }

    /// Fetches the service's welcome message.
    #[instrument(skip(self))]
    pub async fn status(&self) -> Result<Reply<ServiceStatus>> {
        let url = self.endpoints.status_url();
        debug!("GET request to: {}", url);
        let response = self.transport.send(ApiRequest::get(url.as_str())).await?;
        interpret(&url, response)
    }

    async fn post<B, R>(&self, url: &str, body: &B) -> Result<Reply<R>>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        debug!("POST request to: {}", url);
        let request = ApiRequest::post_json(url, body)?;
        trace!(body = ?request.body, "Sending request body");
        let response = self.transport.send(request).await?;
        interpret(url, response)
    }
}

fn interpret<R: DeserializeOwned>(url: &str, response: RawResponse) -> Result<Reply<R>> {
    trace!("{} - Response received ({}), parsing JSON", url, response.status);

    if response.is_success() {
        let payload = serde_json::from_str::<R>(&response.body)?;
        info!("{} - Success", url);
        return Ok(Reply::Accepted(payload));
    }

    let error = serde_json::from_str::<ErrorDetail>(&response.body)?;
    let detail = error.message(response.status);
    warn!(status = response.status, detail = %detail, "{} - Service rejected request", url);
    Ok(Reply::Rejected {
        status: response.status,
        detail,
    })
}
