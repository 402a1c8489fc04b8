//! Google Drive v3 API client
//!
//! Provides an authenticated HTTP client for the Drive v3 REST API.
//! Handles authentication headers, base URL construction, status checking,
//! and the listing/download settings shared by every request.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use drivemirror_drive::client::DriveClient;
//!
//! let client = DriveClient::new("access-token-here")
//!     .with_page_size(500)
//!     .with_chunk_size(4 * 1024 * 1024);
//! ```

use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::debug;

use crate::DriveError;

/// Base URL for the Drive v3 API
pub const DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";

/// Default listing page size (the API maximum)
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Default download chunk size (10 MiB)
pub const DEFAULT_CHUNK_SIZE: u64 = 10 * 1024 * 1024;

// ============================================================================
// DriveClient
// ============================================================================

/// HTTP client for Drive v3 API calls
///
/// Wraps `reqwest::Client` with the bearer token and base URL. Cloning is
/// cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct DriveClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for API requests
    base_url: String,
    /// OAuth2 access token
    access_token: String,
    /// Entries requested per listing page
    page_size: u32,
    /// Whether listings cover shared drives
    include_shared_drives: bool,
    /// Bytes requested per download chunk
    chunk_size: u64,
}

impl DriveClient {
    /// Creates a new DriveClient with the given access token
    ///
    /// # Arguments
    /// * `access_token` - A valid OAuth2 access token with a Drive read scope
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(access_token, DRIVE_BASE_URL)
    }

    /// Creates a new DriveClient with a custom base URL (useful for testing)
    ///
    /// # Arguments
    /// * `access_token` - A valid OAuth2 access token
    /// * `base_url` - Custom base URL for API requests
    pub fn with_base_url(access_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            page_size: DEFAULT_PAGE_SIZE,
            include_shared_drives: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Sets the listing page size (clamped to 1..=1000)
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, DEFAULT_PAGE_SIZE);
        self
    }

    /// Sets whether listings include shared drive items
    pub fn with_shared_drives(mut self, include: bool) -> Self {
        self.include_shared_drives = include;
        self
    }

    /// Sets the download chunk size in bytes (at least 1)
    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Returns a reference to the access token
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Listing page size
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Whether listings include shared drive items
    pub fn include_shared_drives(&self) -> bool {
        self.include_shared_drives
    }

    /// Download chunk size in bytes
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Creates an authenticated request builder for the given method and path
    ///
    /// Automatically prepends the base URL and adds the Authorization header.
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - API path relative to base URL (e.g., "/files")
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .bearer_auth(&self.access_token)
    }

    /// Sends a request and converts non-success statuses into [`DriveError`]
    ///
    /// # Arguments
    /// * `request` - The request to send
    /// * `what` - Short description used in error context
    pub async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(DriveError::from)
            .with_context(|| format!("Failed to send {what} request"))?;

        if !response.status().is_success() {
            let status = response.status();
            let err = DriveError::from_response(response).await;
            debug!(status = status.as_u16(), what, "Drive request failed");
            return Err(err).with_context(|| format!("{what} request returned error status"));
        }

        Ok(response)
    }
}
