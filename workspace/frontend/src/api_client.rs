use async_trait::async_trait;
use forecast::{ApiRequest, ForecastError, JSON_CONTENT_TYPE, Method, RawResponse, Transport};
use gloo_net::http::Request;

/// Sends prediction requests through the browser's fetch API.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> forecast::Result<RawResponse> {
        log::debug!("{:?} request to: {}", request.method, request.url);

        let builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };
        let prepared = match request.body {
            Some(body) => builder.header("Content-Type", JSON_CONTENT_TYPE).body(body),
            None => builder.build(),
        }
        .map_err(|e| {
            let error_msg = format!("Failed to build request: {}", e);
            log::error!("{} - {}", request.url, error_msg);
            ForecastError::Transport(error_msg)
        })?;

        let response = prepared.send().await.map_err(|e| {
            let error_msg = format!("Request failed: {}", e);
            log::error!("{} - {}", request.url, error_msg);
            ForecastError::Transport(error_msg)
        })?;

        let status = response.status();
        log::trace!("{} - Response received ({}), reading body", request.url, status);

        let body = response.text().await.map_err(|e| {
            let error_msg = format!("Failed to read response body: {}", e);
            log::error!("{} - {}", request.url, error_msg);
            ForecastError::Transport(error_msg)
        })?;

        Ok(RawResponse { status, body })
    }
}
