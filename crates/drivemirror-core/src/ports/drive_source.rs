//! Drive source port (driven/secondary port)
//!
//! This module defines the interface for reading folder listings and file
//! content from Google Drive. The production implementation talks to the
//! Drive v3 REST API; tests use in-memory fakes.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are adapter-specific
//!   and are classified by the use cases (`ListingError`, `TransferError`).
//! - Listing is exposed one page at a time. Callers own the pagination loop,
//!   so exhausting every page is a property of the use case, not of a
//!   particular adapter.
//! - Downloads are pull-based: the caller asks for the next chunk until the
//!   download reports completion.

use serde::{Deserialize, Serialize};

use crate::domain::entry::RemoteEntry;
use crate::domain::newtypes::RemoteId;

// ============================================================================
// Listing
// ============================================================================

/// One page of a folder listing or search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPage {
    /// Entries on this page
    pub entries: Vec<RemoteEntry>,
    /// Token for the next page (None on the last page)
    pub next_page_token: Option<String>,
}

impl ListPage {
    /// A final page holding `entries`
    pub fn last(entries: Vec<RemoteEntry>) -> Self {
        Self {
            entries,
            next_page_token: None,
        }
    }
}

// ============================================================================
// Downloads
// ============================================================================

/// Which Drive endpoint supplies the bytes of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadKind {
    /// Raw content, byte-for-byte
    Media,
    /// Server-side conversion of a native Google document
    Export {
        /// Target content type of the conversion
        mime_type: String,
    },
}

/// Result of one chunk request
#[derive(Debug, Clone, Default)]
pub struct DownloadChunk {
    /// Bytes received in this chunk (may be empty)
    pub data: Vec<u8>,
    /// Fraction of the file received so far, in `[0, 1]`
    pub progress: f64,
    /// True once the whole file has been received
    pub done: bool,
}

/// A download in progress
#[async_trait::async_trait]
pub trait IChunkedDownload: Send {
    /// Requests the next chunk
    ///
    /// Must not be called again after a chunk with `done == true`.
    async fn next_chunk(&mut self) -> anyhow::Result<DownloadChunk>;
}

// ============================================================================
// IDriveSource trait
// ============================================================================

/// Port trait for reading from Google Drive
///
/// All methods assume the implementation already holds valid credentials;
/// acquiring them is the caller's concern.
#[async_trait::async_trait]
pub trait IDriveSource: Send + Sync {
    /// Lists one page of the immediate children of `parent`
    ///
    /// # Arguments
    /// * `parent` - The folder whose children are listed
    /// * `page_token` - Token from the previous page (None for the first page)
    async fn list_children(
        &self,
        parent: &RemoteId,
        page_token: Option<&str>,
    ) -> anyhow::Result<ListPage>;

    /// Lists one page of folders whose name is exactly `name`
    ///
    /// # Arguments
    /// * `name` - The folder name to match
    /// * `page_token` - Token from the previous page (None for the first page)
    async fn find_folders(&self, name: &str, page_token: Option<&str>)
        -> anyhow::Result<ListPage>;

    /// Starts a chunked download of a file
    ///
    /// # Arguments
    /// * `file_id` - The file to download
    /// * `kind` - Raw media or export conversion
    async fn open_download(
        &self,
        file_id: &RemoteId,
        kind: &DownloadKind,
    ) -> anyhow::Result<Box<dyn IChunkedDownload>>;
}
