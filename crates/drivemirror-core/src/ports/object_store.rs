//! Object store port (driven/secondary port)
//!
//! Interface for the destination bucket. The production implementation
//! uses the Cloud Storage JSON API.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result`; the uploader maps failures to `UploadError`.
//! - `put_object` always replaces the whole object. Whether an existing
//!   object may be replaced is decided by the caller before writing.

use crate::domain::newtypes::BucketName;
use crate::domain::path::DestinationPath;

/// Port trait for the destination object store
#[async_trait::async_trait]
pub trait IObjectStore: Send + Sync {
    /// Returns true if the bucket exists and is visible to the caller
    async fn bucket_exists(&self, bucket: &BucketName) -> anyhow::Result<bool>;

    /// Returns true if an object exists at `path`
    async fn object_exists(&self, bucket: &BucketName, path: &DestinationPath)
        -> anyhow::Result<bool>;

    /// Writes `data` as the full content of the object at `path`
    ///
    /// # Arguments
    /// * `bucket` - Destination bucket
    /// * `path` - Object name
    /// * `data` - Object content
    /// * `content_type` - Content type recorded on the object
    async fn put_object(
        &self,
        bucket: &BucketName,
        path: &DestinationPath,
        data: Vec<u8>,
        content_type: &str,
    ) -> anyhow::Result<()>;
}
