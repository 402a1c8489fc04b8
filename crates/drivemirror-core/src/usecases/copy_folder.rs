//! Copy orchestration use case
//!
//! Entry points for the two copy modes:
//!
//! - [`CopyFolderUseCase::copy_flat`] copies the immediate children of a
//!   folder addressed by ID, after checking that the bucket exists.
//! - [`CopyFolderUseCase::copy_recursive`] resolves a folder by name and
//!   mirrors its whole subtree under the destination prefix.

use std::sync::Arc;

use tracing::info;

use crate::domain::errors::CopyError;
use crate::domain::newtypes::{BucketName, RemoteId};
use crate::domain::path::{DestinationPath, NameEncoding, PathMapper, SEPARATOR};
use crate::domain::policy::{AmbiguityPolicy, CollisionPolicy, ErrorPolicy, WalkMode};
use crate::ports::{ICopyObserver, IDriveSource, IObjectStore};

use super::fetch_content::ContentFetcher;
use super::resolve_folder::FolderResolver;
use super::upload_object::Uploader;
use super::walk_tree::{CopyReport, TreeWalker};

/// Per-run settings shared by both copy modes
#[derive(Debug, Clone, Default)]
pub struct CopyOptions {
    /// Error policy; None uses the mode's default
    pub error_policy: Option<ErrorPolicy>,
    /// Behavior when an object already exists
    pub collision: CollisionPolicy,
    /// Behavior when a folder name matches several folders
    pub ambiguity: AmbiguityPolicy,
    /// How Drive names become path segments
    pub names: NameEncoding,
    /// Path under which a recursive copy is rooted
    pub destination_prefix: String,
}

impl CopyOptions {
    /// The destination prefix with surrounding separators removed
    pub fn destination_root(&self) -> DestinationPath {
        DestinationPath::new(self.destination_prefix.trim_matches(SEPARATOR))
    }
}

/// Use case for copying a Drive folder into a bucket
pub struct CopyFolderUseCase {
    source: Arc<dyn IDriveSource>,
    store: Arc<dyn IObjectStore>,
    observer: Arc<dyn ICopyObserver>,
}

impl CopyFolderUseCase {
    /// Creates a new CopyFolderUseCase
    ///
    /// # Arguments
    ///
    /// * `source` - Drive source for listings and downloads
    /// * `store` - Destination object store
    /// * `observer` - Receives progress and status events
    pub fn new(
        source: Arc<dyn IDriveSource>,
        store: Arc<dyn IObjectStore>,
        observer: Arc<dyn ICopyObserver>,
    ) -> Self {
        Self {
            source,
            store,
            observer,
        }
    }

    /// Copies the immediate children of `folder_id` to the bucket root
    ///
    /// Subfolders are skipped. Nothing is downloaded or written if the
    /// bucket does not exist.
    ///
    /// # Errors
    ///
    /// `BucketNotFound` for a missing bucket, otherwise the first error
    /// not isolated by the error policy.
    pub async fn copy_flat(
        &self,
        folder_id: &RemoteId,
        bucket: &BucketName,
        options: &CopyOptions,
    ) -> Result<CopyReport, CopyError> {
        let mut report = CopyReport::new();
        let walker = self.walker(bucket, WalkMode::Flat, options);

        self.uploader(options).ensure_bucket(bucket).await?;

        info!(
            folder_id = %folder_id,
            bucket = %bucket,
            error_policy = %walker.error_policy(),
            "Starting flat copy"
        );
        walker
            .walk(folder_id, &DestinationPath::root(), &mut report)
            .await?;

        report.finish();
        log_report(&report);
        Ok(report)
    }

    /// Resolves `folder_name` and copies its whole subtree
    ///
    /// # Errors
    ///
    /// `FolderNotFound` when no folder has the name, `AmbiguousFolderName`
    /// under the strict ambiguity policy, otherwise the first error not
    /// isolated by the error policy.
    pub async fn copy_recursive(
        &self,
        folder_name: &str,
        bucket: &BucketName,
        options: &CopyOptions,
    ) -> Result<CopyReport, CopyError> {
        let mut report = CopyReport::new();

        let folder_id = FolderResolver::new(Arc::clone(&self.source), options.ambiguity)
            .resolve(folder_name)
            .await?;

        let walker = self.walker(bucket, WalkMode::Recursive, options);
        let root = options.destination_root();

        info!(
            folder = folder_name,
            folder_id = %folder_id,
            bucket = %bucket,
            prefix = %root,
            error_policy = %walker.error_policy(),
            "Starting recursive copy"
        );
        walker.walk(&folder_id, &root, &mut report).await?;

        report.finish();
        log_report(&report);
        Ok(report)
    }

    fn uploader(&self, options: &CopyOptions) -> Uploader {
        Uploader::new(
            Arc::clone(&self.store),
            Arc::clone(&self.observer),
            options.collision,
        )
    }

    fn walker(&self, bucket: &BucketName, mode: WalkMode, options: &CopyOptions) -> TreeWalker {
        let fetcher = ContentFetcher::new(Arc::clone(&self.source), Arc::clone(&self.observer));
        let walker = TreeWalker::new(
            Arc::clone(&self.source),
            fetcher,
            self.uploader(options),
            Arc::clone(&self.observer),
            bucket.clone(),
        )
        .with_mode(mode)
        .with_mapper(PathMapper::new(options.names));

        match options.error_policy {
            Some(policy) => walker.with_error_policy(policy),
            None => walker,
        }
    }
}

fn log_report(report: &CopyReport) {
    info!(
        files_copied = report.files_copied,
        bytes_uploaded = report.bytes_uploaded,
        folders_visited = report.folders_visited,
        skipped = report.skipped,
        errors = report.errors.len(),
        duration_ms = report.duration_ms,
        "Copy finished"
    );
}
