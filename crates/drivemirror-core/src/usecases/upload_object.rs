//! Upload use case
//!
//! Writes fetched content to the destination bucket under the configured
//! collision policy.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entry::TransferUnit;
use crate::domain::errors::CopyError;
use crate::domain::newtypes::BucketName;
use crate::domain::path::DestinationPath;
use crate::domain::policy::CollisionPolicy;
use crate::ports::{ICopyObserver, IObjectStore};

/// Use case for writing objects to Cloud Storage
pub struct Uploader {
    store: Arc<dyn IObjectStore>,
    observer: Arc<dyn ICopyObserver>,
    collision: CollisionPolicy,
}

impl Uploader {
    /// Creates a new Uploader
    pub fn new(
        store: Arc<dyn IObjectStore>,
        observer: Arc<dyn ICopyObserver>,
        collision: CollisionPolicy,
    ) -> Self {
        Self {
            store,
            observer,
            collision,
        }
    }

    /// Fails with `BucketNotFound` unless the bucket exists
    pub async fn ensure_bucket(&self, bucket: &BucketName) -> Result<(), CopyError> {
        let exists = self
            .store
            .bucket_exists(bucket)
            .await
            .map_err(|err| CopyError::BucketCheckFailed {
                bucket: bucket.to_string(),
                message: format!("{err:#}"),
            })?;

        if !exists {
            return Err(CopyError::BucketNotFound(bucket.to_string()));
        }

        debug!(bucket = %bucket, "Bucket exists");
        Ok(())
    }

    /// Writes `data` to `path` and returns the number of bytes written
    ///
    /// Under `Overwrite`, uploading the same bytes twice leaves one object
    /// with that content.
    ///
    /// # Errors
    ///
    /// - `ObjectExists` under `FailIfExists` when the path is taken
    /// - `UploadError` if the existence check or the write fails
    pub async fn upload(
        &self,
        bucket: &BucketName,
        path: &DestinationPath,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<usize, CopyError> {
        if self.collision == CollisionPolicy::FailIfExists {
            let exists = self
                .store
                .object_exists(bucket, path)
                .await
                .map_err(|err| CopyError::upload(bucket.as_str(), path.as_str(), &err))?;
            if exists {
                return Err(CopyError::ObjectExists {
                    bucket: bucket.to_string(),
                    path: path.to_string(),
                });
            }
        }

        let bytes = data.len();
        self.store
            .put_object(bucket, path, data, content_type)
            .await
            .map_err(|err| CopyError::upload(bucket.as_str(), path.as_str(), &err))?;

        info!(
            bucket = %bucket,
            path = %path,
            bytes,
            content_type,
            "Uploaded object"
        );
        self.observer.on_uploaded(bucket, path, bytes);

        Ok(bytes)
    }

    /// Writes a fetched unit to its destination path, consuming it
    pub async fn upload_unit(
        &self,
        bucket: &BucketName,
        unit: TransferUnit,
    ) -> Result<usize, CopyError> {
        let TransferUnit {
            destination,
            payload,
            content_type,
            ..
        } = unit;
        self.upload(bucket, &destination, payload, &content_type).await
    }
}
