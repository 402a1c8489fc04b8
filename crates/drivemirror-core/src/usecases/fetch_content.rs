//! Content fetching use case
//!
//! Downloads the bytes of one file in chunks, choosing between a raw media
//! download and a server-side export from the entry's classification.
//!
//! ## Design Notes
//!
//! - The whole file is accumulated in memory before it is handed on.
//! - Progress reported to the observer never decreases and always ends at 1.0,
//!   whatever the adapter reports per chunk.

use std::sync::Arc;

use anyhow::Context;
use tracing::debug;

use crate::domain::entry::{RemoteEntry, TransferUnit};
use crate::domain::errors::CopyError;
use crate::domain::mime::Handling;
use crate::domain::newtypes::RemoteId;
use crate::domain::path::DestinationPath;
use crate::ports::{DownloadKind, ICopyObserver, IDriveSource};

/// Use case for fetching file content from Drive
pub struct ContentFetcher {
    source: Arc<dyn IDriveSource>,
    observer: Arc<dyn ICopyObserver>,
}

impl ContentFetcher {
    /// Creates a new ContentFetcher
    ///
    /// # Arguments
    ///
    /// * `source` - Drive source used to open downloads
    /// * `observer` - Receives per-chunk progress
    pub fn new(source: Arc<dyn IDriveSource>, observer: Arc<dyn ICopyObserver>) -> Self {
        Self { source, observer }
    }

    /// Fetches the full content of `entry`
    ///
    /// Native binaries are downloaded as-is. Exportable documents are
    /// converted by Drive to the target type, which also becomes the
    /// content type of the returned unit.
    ///
    /// # Errors
    ///
    /// - `UnsupportedExportType` if `handling` has no download strategy
    /// - `TransferError` if opening the download or any chunk fails
    pub async fn fetch(
        &self,
        entry: &RemoteEntry,
        handling: Handling,
        destination: DestinationPath,
    ) -> Result<TransferUnit, CopyError> {
        let (kind, content_type) = match handling {
            Handling::NativeBinary => (DownloadKind::Media, entry.content_type.clone()),
            Handling::Exportable(target) => (
                DownloadKind::Export {
                    mime_type: target.to_string(),
                },
                target.to_string(),
            ),
            Handling::Folder | Handling::Unsupported => {
                return Err(CopyError::UnsupportedExportType(entry.content_type.clone()));
            }
        };

        debug!(
            file_id = %entry.id,
            destination = %destination,
            kind = ?kind,
            "Fetching file content"
        );

        let payload = self
            .download(&entry.id, &kind, &destination)
            .await
            .map_err(|err| CopyError::transfer(destination.as_str(), &err))?;

        Ok(TransferUnit {
            source: entry.clone(),
            destination,
            payload,
            content_type,
        })
    }

    async fn download(
        &self,
        file_id: &RemoteId,
        kind: &DownloadKind,
        destination: &DestinationPath,
    ) -> anyhow::Result<Vec<u8>> {
        let mut download = self
            .source
            .open_download(file_id, kind)
            .await
            .context("Failed to start download")?;

        let mut buffer = Vec::new();
        let mut progress = ProgressTracker::default();
        let mut chunks = 0u32;

        loop {
            let chunk = download
                .next_chunk()
                .await
                .with_context(|| format!("Failed to fetch chunk {}", chunks + 1))?;
            chunks += 1;
            buffer.extend_from_slice(&chunk.data);

            let fraction = progress.advance(chunk.progress, chunk.done);
            self.observer.on_progress(destination, fraction);

            if chunk.done {
                break;
            }
        }

        debug!(
            file_id = %file_id,
            chunks,
            bytes = buffer.len(),
            "Download complete"
        );

        Ok(buffer)
    }
}

/// Turns raw per-chunk progress into a non-decreasing sequence ending at 1.0
#[derive(Debug, Default)]
pub(crate) struct ProgressTracker {
    last: f64,
}

impl ProgressTracker {
    pub(crate) fn advance(&mut self, reported: f64, done: bool) -> f64 {
        let next = if done {
            1.0
        } else if reported.is_finite() {
            reported.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if next > self.last {
            self.last = next;
        }
        self.last
    }
}
