use serde_json::error::Category;
use thiserror::Error;
use tracing::error;

/// Error types for a forecast round trip
///
/// Every variant ends up as the same user-facing failure text; the variant
/// itself is what tells them apart in logs and in the returned submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForecastError {
    /// The request never produced a response (network, DNS, CORS, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body is not valid JSON
    #[error("Decode error: {0}")]
    Decode(String),

    /// The response body is JSON but not the expected shape
    #[error("Unexpected response body: {0}")]
    UnexpectedBody(String),

    /// The request body could not be serialized
    #[error("Encode error: {0}")]
    Encode(String),
}

impl ForecastError {
    /// Short, stable name of the failure class for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ForecastError::Transport(_) => "transport",
            ForecastError::Decode(_) => "decode",
            ForecastError::UnexpectedBody(_) => "unexpected_body",
            ForecastError::Encode(_) => "encode",
        }
    }
}

// Syntax and truncation problems mean the body was not JSON at all; data
// errors mean it was JSON with the wrong fields.
impl From<serde_json::Error> for ForecastError {
    fn from(error: serde_json::Error) -> Self {
        match error.classify() {
            Category::Syntax | Category::Eof => {
                let err = ForecastError::Decode(error.to_string());
                error!(?err, "Response body is not valid JSON");
                err
            }
            Category::Data => {
                let err = ForecastError::UnexpectedBody(error.to_string());
                error!(?err, "Response body has an unexpected shape");
                err
            }
            Category::Io => {
                let err = ForecastError::Decode(format!("I/O while decoding: {}", error));
                error!(?err, "Response body could not be read");
                err
            }
        }
    }
}

/// Type alias for Result with ForecastError
pub type Result<T> = std::result::Result<T, ForecastError>;
