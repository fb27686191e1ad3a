//! Error types for HR REST calls

use thiserror::Error;

/// HR client errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request failed before a complete response arrived
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Request failed ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// `error` field of the body, or the status reason
        message: String,
    },

    /// 2xx response carrying `{ error }` or `success: false`
    #[error("Server error: {0}")]
    Server(String),

    /// Body was not the JSON we expected
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Base URL or path could not be joined
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Server(_) => Some(200),
            _ => None,
        }
    }
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;
