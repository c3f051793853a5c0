//! Error types for elsar.
//!
//! Uses thiserror for ergonomic error definitions shared by the client,
//! search, and resource modules.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level request failure
    #[error("Request failed: {0}")]
    Request(String),

    /// Non-success response from the API
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rejected credentials or entitlements
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API quota exhausted
    #[error("Quota exceeded: {}", reset_at.as_deref().unwrap_or("no reset information"))]
    QuotaExceeded { reset_at: Option<String> },

    /// Response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Operation requires data that has not been retrieved
    #[error("No data: {0}")]
    MissingData(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience conversions
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(format!("HTTP request failed: {}", err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(format!("JSON error: {}", err))
    }
}
