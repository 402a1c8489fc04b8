//! drivemirror Drive - Google Drive v3 API client
//!
//! Provides async client for:
//! - Folder listings and exact-name folder search, one page at a time
//! - Ranged media downloads in fixed-size chunks
//! - Export of native Google documents to office formats
//!
//! ## Modules
//!
//! - [`client`] - Drive v3 HTTP client
//! - [`listing`] - `files.list` queries and response parsing
//! - [`download`] - Chunked media and export downloads
//! - [`provider`] - [`IDriveSource`](drivemirror_core::ports::IDriveSource) implementation

pub mod client;
pub mod download;
pub mod listing;
pub mod provider;

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when communicating with the Drive API
#[derive(Debug, Error)]
pub enum DriveError {
    /// Authentication credentials are invalid or expired
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Insufficient permissions for the requested operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

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

    /// The API response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
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

impl DriveError {
    /// Maps a status code and API message to an error variant
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => DriveError::Unauthorized(message),
            StatusCode::FORBIDDEN => DriveError::Forbidden(message),
            StatusCode::NOT_FOUND => DriveError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => DriveError::TooManyRequests(message),
            s if s.is_server_error() => DriveError::ServerError(message),
            s => DriveError::UnexpectedStatus {
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
