//! drivemirror GCS - Google Cloud Storage JSON API client
//!
//! Provides async client for:
//! - Bucket existence checks
//! - Object existence checks
//! - Single-request media uploads
//!
//! ## Modules
//!
//! - [`client`] - Cloud Storage HTTP client
//! - [`store`] - [`IObjectStore`](drivemirror_core::ports::IObjectStore) implementation

pub mod client;
pub mod store;

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when communicating with the Cloud Storage API
#[derive(Debug, Error)]
pub enum GcsError {
    /// Authentication credentials are invalid or expired
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Insufficient permissions for the requested operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The requested bucket or object does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A precondition on the request failed
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// Rate limit exceeded
    #[error("Too many requests: {0}")]
    TooManyRequests(String),

    /// A server-side error occurred (5xx)
    #[error("Server error: {0}")]
    ServerError(String),

    /// Any other unexpected status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Error message reported by the API
        message: String,
    },

    /// A network-level error occurred
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The configured base URL cannot carry a request path
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error envelope returned by Google APIs
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl GcsError {
    /// Maps a status code and API message to an error variant
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => GcsError::Unauthorized(message),
            StatusCode::FORBIDDEN => GcsError::Forbidden(message),
            StatusCode::NOT_FOUND => GcsError::NotFound(message),
            StatusCode::PRECONDITION_FAILED => GcsError::PreconditionFailed(message),
            StatusCode::TOO_MANY_REQUESTS => GcsError::TooManyRequests(message),
            s if s.is_server_error() => GcsError::ServerError(message),
            s => GcsError::UnexpectedStatus {
                status: s.as_u16(),
                message,
            },
        }
    }

    /// Builds an error from a non-success response, reading its body
    pub async fn from_response(response: Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });
        Self::from_status(status, message)
    }
}
