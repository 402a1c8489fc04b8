//! Folder walking use case
//!
//! Lists a Drive folder, copies every transferable file into the bucket and,
//! in recursive mode, descends into subfolders depth-first.
//!
//! ## Design Notes
//!
//! - Strictly sequential: one listing, download or upload in flight at a time.
//! - Children are processed in the order Drive lists them.
//! - Every page of a listing is consumed before any child is processed.
//! - Failures go through the error policy. Errors scoped to one file or
//!   subfolder may be isolated; anything else ends the walk.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::domain::entry::RemoteEntry;
use crate::domain::errors::CopyError;
use crate::domain::mime::Handling;
use crate::domain::newtypes::{BucketName, RemoteId};
use crate::domain::path::{DestinationPath, PathMapper};
use crate::domain::policy::{ErrorPolicy, WalkMode};
use crate::ports::{ICopyObserver, IDriveSource, SkipReason};

use super::fetch_content::ContentFetcher;
use super::upload_object::Uploader;

type WalkFuture<'a> = Pin<Box<dyn Future<Output = Result<(), CopyError>> + Send + 'a>>;

// ============================================================================
// CopyReport
// ============================================================================

/// Outcome of a copy run
#[derive(Debug, Clone)]
pub struct CopyReport {
    /// Objects written
    pub files_copied: u64,
    /// Total payload bytes written
    pub bytes_uploaded: u64,
    /// Folders listed, including the root
    pub folders_visited: u64,
    /// Entries skipped without error (folders in flat mode, unsupported types)
    pub skipped: u64,
    /// Errors isolated under `IsolateAndContinue`
    pub errors: Vec<CopyError>,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the run
    pub duration_ms: u64,
}

impl CopyReport {
    /// Creates an empty report stamped with the current time
    pub fn new() -> Self {
        Self {
            files_copied: 0,
            bytes_uploaded: 0,
            folders_visited: 0,
            skipped: 0,
            errors: Vec::new(),
            started_at: Utc::now(),
            duration_ms: 0,
        }
    }

    /// Returns true if no error was isolated
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Sets `duration_ms` from `started_at` to now
    pub fn finish(&mut self) {
        let elapsed = Utc::now() - self.started_at;
        self.duration_ms = elapsed.num_milliseconds().max(0) as u64;
    }
}

impl Default for CopyReport {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TreeWalker
// ============================================================================

/// Walks a Drive folder and copies its files into one bucket
pub struct TreeWalker {
    source: Arc<dyn IDriveSource>,
    fetcher: ContentFetcher,
    uploader: Uploader,
    observer: Arc<dyn ICopyObserver>,
    bucket: BucketName,
    mode: WalkMode,
    error_policy: Option<ErrorPolicy>,
    mapper: PathMapper,
}

impl TreeWalker {
    /// Creates a recursive walker with the default error policy and name encoding
    ///
    /// # Arguments
    ///
    /// * `source` - Drive source for listings
    /// * `fetcher` - Downloads file content
    /// * `uploader` - Writes objects to `bucket`
    /// * `observer` - Receives per-entry events
    /// * `bucket` - Destination bucket
    pub fn new(
        source: Arc<dyn IDriveSource>,
        fetcher: ContentFetcher,
        uploader: Uploader,
        observer: Arc<dyn ICopyObserver>,
        bucket: BucketName,
    ) -> Self {
        Self {
            source,
            fetcher,
            uploader,
            observer,
            bucket,
            mode: WalkMode::Recursive,
            error_policy: None,
            mapper: PathMapper::default(),
        }
    }

    /// Sets the walk mode
    pub fn with_mode(mut self, mode: WalkMode) -> Self {
        self.mode = mode;
        self
    }

    /// Overrides the error policy (defaults to the mode's policy)
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = Some(policy);
        self
    }

    /// Sets how entry names become path segments
    pub fn with_mapper(mut self, mapper: PathMapper) -> Self {
        self.mapper = mapper;
        self
    }

    /// The effective error policy
    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
            .unwrap_or_else(|| self.mode.default_error_policy())
    }

    /// Lists every child of `folder_id`, following page tokens to the end
    pub async fn list_all(&self, folder_id: &RemoteId) -> Result<Vec<RemoteEntry>, CopyError> {
        let mut entries = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0u32;

        loop {
            let page = self
                .source
                .list_children(folder_id, page_token.as_deref())
                .await
                .map_err(|err| CopyError::listing(folder_id.as_str(), &err))?;
            pages += 1;
            entries.extend(page.entries);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(
            folder_id = %folder_id,
            pages,
            entries = entries.len(),
            "Listed folder"
        );

        Ok(entries)
    }

    /// Copies the contents of `folder_id` to paths under `parent`
    ///
    /// Boxed because recursive mode calls itself for each subfolder.
    pub fn walk<'a>(
        &'a self,
        folder_id: &'a RemoteId,
        parent: &'a DestinationPath,
        report: &'a mut CopyReport,
    ) -> WalkFuture<'a> {
        Box::pin(async move {
            report.folders_visited += 1;

            let entries = match self.list_all(folder_id).await {
                Ok(entries) => entries,
                Err(err) => return self.handle_error(err, report),
            };

            if entries.is_empty() {
                warn!(folder_id = %folder_id, "No files found in folder");
            }

            for entry in entries {
                let destination = self.mapper.child(parent, &entry.name);
                self.observer.on_entry(&entry, &destination);

                match entry.handling() {
                    Handling::Folder => match self.mode {
                        WalkMode::Recursive => {
                            debug!(folder_id = %entry.id, path = %destination, "Descending into folder");
                            self.walk(&entry.id, &destination, report).await?;
                        }
                        WalkMode::Flat => self.skip(&entry, SkipReason::FolderInFlatMode, report),
                    },
                    Handling::Unsupported => self.skip(&entry, SkipReason::UnsupportedType, report),
                    handling => {
                        if let Err(err) = self.copy_file(&entry, handling, destination, report).await {
                            self.handle_error(err, report)?;
                        }
                    }
                }
            }

            Ok(())
        })
    }

    async fn copy_file(
        &self,
        entry: &RemoteEntry,
        handling: Handling,
        destination: DestinationPath,
        report: &mut CopyReport,
    ) -> Result<(), CopyError> {
        let unit = self.fetcher.fetch(entry, handling, destination).await?;
        let bytes = self.uploader.upload_unit(&self.bucket, unit).await?;
        report.files_copied += 1;
        report.bytes_uploaded += bytes as u64;
        Ok(())
    }

    fn skip(&self, entry: &RemoteEntry, reason: SkipReason, report: &mut CopyReport) {
        info!(
            name = %entry.name,
            content_type = %entry.content_type,
            reason = %reason,
            "Skipping entry"
        );
        report.skipped += 1;
        self.observer.on_skipped(entry, reason);
    }

    fn handle_error(&self, err: CopyError, report: &mut CopyReport) -> Result<(), CopyError> {
        match self.error_policy() {
            ErrorPolicy::IsolateAndContinue if err.is_isolatable() => {
                error!(error = %err, "Isolated error, continuing");
                self.observer.on_isolated_error(&err);
                report.errors.push(err);
                Ok(())
            }
            _ => Err(err),
        }
    }
}
