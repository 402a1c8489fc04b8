//! Cloud Storage JSON API client
//!
//! Provides an authenticated HTTP client for the Cloud Storage JSON API.
//! Object names are sent as single percent-encoded path segments, so a
//! `/` inside a name never splits the request path.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use drivemirror_gcs::client::GcsClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = GcsClient::new("access-token-here");
//! if client.bucket_exists("my-backups").await? {
//!     client
//!         .insert_object("my-backups", "reports/a.pdf", b"%PDF".to_vec(), "application/pdf")
//!         .await?;
//! }
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use tracing::debug;
use url::Url;

use crate::GcsError;

/// Base URL for the Cloud Storage JSON API
pub const STORAGE_BASE_URL: &str = "https://storage.googleapis.com";

// ============================================================================
// GcsClient
// ============================================================================

/// HTTP client for Cloud Storage JSON API calls
#[derive(Debug, Clone)]
pub struct GcsClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for API requests
    base_url: String,
    /// OAuth2 access token
    access_token: String,
}

impl GcsClient {
    /// Creates a new GcsClient with the given access token
    ///
    /// # Arguments
    /// * `access_token` - A valid OAuth2 access token with a storage write scope
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(access_token, STORAGE_BASE_URL)
    }

    /// Creates a new GcsClient with a custom base URL (useful for testing)
    ///
    /// # Arguments
    /// * `access_token` - A valid OAuth2 access token
    /// * `base_url` - Custom base URL for API requests
    pub fn with_base_url(access_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Returns a reference to the access token
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds a URL from the base URL and path segments
    ///
    /// Each segment is percent-encoded on its own, including any `/`.
    pub fn url(&self, segments: &[&str]) -> Result<Url, GcsError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| GcsError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| GcsError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Creates an authenticated request builder for the given method and URL
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.access_token)
    }

    /// Sends a GET and maps 200 to true and 404 to false
    async fn exists(&self, url: Url, what: &str) -> Result<bool> {
        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(GcsError::from)
            .with_context(|| format!("Failed to send {what} request"))?;

        match response.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(error_for(response).await).with_context(|| format!("{what} request failed")),
        }
    }

    /// Returns true if `bucket` exists and is visible to the caller
    ///
    /// Makes `GET /storage/v1/b/{bucket}`.
    pub async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        let url = self.url(&["storage", "v1", "b", bucket])?;
        debug!(bucket, "Checking bucket");
        self.exists(url, "buckets.get").await
    }

    /// Returns true if an object named `name` exists in `bucket`
    ///
    /// Makes `GET /storage/v1/b/{bucket}/o/{name}`.
    pub async fn object_exists(&self, bucket: &str, name: &str) -> Result<bool> {
        let url = self.url(&["storage", "v1", "b", bucket, "o", name])?;
        debug!(bucket, name, "Checking object");
        self.exists(url, "objects.get").await
    }

    /// Writes `data` as the full content of object `name`, replacing any existing object
    ///
    /// Makes `POST /upload/storage/v1/b/{bucket}/o?uploadType=media&name={name}`.
    ///
    /// # Arguments
    /// * `bucket` - Destination bucket
    /// * `name` - Object name
    /// * `data` - Object content
    /// * `content_type` - Content type stored on the object
    pub async fn insert_object(
        &self,
        bucket: &str,
        name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let mut url = self.url(&["upload", "storage", "v1", "b", bucket, "o"])?;
        url.query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", name);

        let size = data.len();
        debug!(bucket, name, size, content_type, "Uploading object");

        let response = self
            .request(Method::POST, url)
            .header(CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await
            .map_err(GcsError::from)
            .context("Failed to send objects.insert request")?;

        if !response.status().is_success() {
            return Err(error_for(response).await).context("objects.insert request failed");
        }

        Ok(())
    }
}

async fn error_for(response: Response) -> GcsError {
    GcsError::from_response(response).await
}
