//! Domain error types
//!
//! [`DomainError`] covers validation of identifiers and names.
//! [`CopyError`] is the error vocabulary of a copy run: every failure a
//! use case can report is one of its variants, so the CLI can decide the
//! exit code from the variant alone.

use thiserror::Error;

/// Errors raised while constructing validated domain values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid Drive item identifier
    #[error("Invalid remote ID: {0}")]
    InvalidRemoteId(String),

    /// Invalid Cloud Storage bucket name
    #[error("Invalid bucket name: {0}")]
    InvalidBucketName(String),

    /// Generic validation failure
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

/// Errors that can occur while copying a Drive folder into a bucket
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CopyError {
    /// No usable credentials were provided for one of the services
    #[error("Credential error: {0}")]
    CredentialError(String),

    /// The destination bucket does not exist
    #[error("Bucket '{0}' does not exist")]
    BucketNotFound(String),

    /// The bucket existence check itself failed
    #[error("Failed to check bucket '{bucket}': {message}")]
    BucketCheckFailed {
        /// Bucket being checked
        bucket: String,
        /// Formatted cause chain
        message: String,
    },

    /// No folder with the requested name exists in Drive
    #[error("Folder '{0}' not found in Google Drive")]
    FolderNotFound(String),

    /// More than one folder matched the requested name
    #[error("Folder name '{name}' is ambiguous: {} matches ({})", .candidates.len(), .candidates.join(", "))]
    AmbiguousFolderName {
        /// The requested folder name
        name: String,
        /// IDs of every matching folder
        candidates: Vec<String>,
    },

    /// Listing the children of a folder failed
    #[error("Failed to list folder {folder_id}: {message}")]
    ListingError {
        /// Folder whose listing failed
        folder_id: String,
        /// Formatted cause chain
        message: String,
    },

    /// Downloading or exporting a file failed
    #[error("Failed to transfer '{path}': {message}")]
    TransferError {
        /// Destination path of the file being transferred
        path: String,
        /// Formatted cause chain
        message: String,
    },

    /// Writing an object to the bucket failed
    #[error("Failed to upload '{path}' to gs://{bucket}: {message}")]
    UploadError {
        /// Target bucket
        bucket: String,
        /// Object path
        path: String,
        /// Formatted cause chain
        message: String,
    },

    /// An object already exists and the collision policy forbids overwriting
    #[error("Object gs://{bucket}/{path} already exists")]
    ObjectExists {
        /// Target bucket
        bucket: String,
        /// Object path
        path: String,
    },

    /// Export was requested for a content type with no export target
    #[error("Unsupported MIME type for export: {0}")]
    UnsupportedExportType(String),

    /// An identifier or name failed validation
    #[error(transparent)]
    InvalidIdentifier(#[from] DomainError),
}

impl CopyError {
    /// Wraps a port-level error as a listing failure for `folder_id`
    pub fn listing(folder_id: impl Into<String>, err: &anyhow::Error) -> Self {
        CopyError::ListingError {
            folder_id: folder_id.into(),
            message: format!("{err:#}"),
        }
    }

    /// Wraps a port-level error as a transfer failure for `path`
    pub fn transfer(path: impl Into<String>, err: &anyhow::Error) -> Self {
        CopyError::TransferError {
            path: path.into(),
            message: format!("{err:#}"),
        }
    }

    /// Wraps a port-level error as an upload failure
    pub fn upload(bucket: impl Into<String>, path: impl Into<String>, err: &anyhow::Error) -> Self {
        CopyError::UploadError {
            bucket: bucket.into(),
            path: path.into(),
            message: format!("{err:#}"),
        }
    }

    /// Returns true for errors scoped to a single file or subfolder.
    ///
    /// These are the errors an isolating error policy may record and
    /// continue past; everything else ends the run.
    pub fn is_isolatable(&self) -> bool {
        matches!(
            self,
            CopyError::ListingError { .. }
                | CopyError::TransferError { .. }
                | CopyError::UploadError { .. }
                | CopyError::ObjectExists { .. }
                | CopyError::InvalidIdentifier(_)
        )
    }
}
