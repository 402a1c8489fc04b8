//! GcsObjectStore - IObjectStore implementation for Cloud Storage

use anyhow::{Context, Result};

use drivemirror_core::domain::{BucketName, DestinationPath};
use drivemirror_core::ports::IObjectStore;

use crate::client::GcsClient;

/// Object store backed by the Cloud Storage JSON API
#[derive(Debug, Clone)]
pub struct GcsObjectStore {
    client: GcsClient,
}

impl GcsObjectStore {
    /// Creates a new `GcsObjectStore` wrapping the given [`GcsClient`]
    pub fn new(client: GcsClient) -> Self {
        Self { client }
    }

    /// Returns the underlying client
    pub fn client(&self) -> &GcsClient {
        &self.client
    }
}

#[async_trait::async_trait]
impl IObjectStore for GcsObjectStore {
    async fn bucket_exists(&self, bucket: &BucketName) -> Result<bool> {
        self.client
            .bucket_exists(bucket.as_str())
            .await
            .with_context(|| format!("Failed to check bucket {bucket}"))
    }

    async fn object_exists(&self, bucket: &BucketName, path: &DestinationPath) -> Result<bool> {
        self.client
            .object_exists(bucket.as_str(), path.as_str())
            .await
            .with_context(|| format!("Failed to check gs://{bucket}/{path}"))
    }

    async fn put_object(
        &self,
        bucket: &BucketName,
        path: &DestinationPath,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        self.client
            .insert_object(bucket.as_str(), path.as_str(), data, content_type)
            .await
            .with_context(|| format!("Failed to write gs://{bucket}/{path}"))
    }
}
