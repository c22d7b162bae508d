use std::time::Duration;

use async_trait::async_trait;
use forecast::{ApiRequest, ForecastError, JSON_CONTENT_TYPE, Method, RawResponse, Transport};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, error, trace};

/// Sends prediction requests with a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Option<Duration>) -> forecast::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            debug!("Request timeout: {:?}", timeout);
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ForecastError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> forecast::Result<RawResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body);
        }

        let response = builder.send().await.map_err(|e| {
            let error_msg = format!("Request failed: {}", e);
            error!("{:?} {} - {}", request.method, request.url, error_msg);
            ForecastError::Transport(error_msg)
        })?;

        let status = response.status().as_u16();
        trace!("{:?} {} - Status {}", request.method, request.url, status);

        let body = response.text().await.map_err(|e| {
            let error_msg = format!("Failed to read response body: {}", e);
            error!("{:?} {} - {}", request.method, request.url, error_msg);
            ForecastError::Transport(error_msg)
        })?;

        Ok(RawResponse { status, body })
    }
}
