//! Entries listed from Drive and the units handed to the uploader

use serde::{Deserialize, Serialize};

use super::mime::{classify, Handling};
use super::newtypes::RemoteId;
use super::path::DestinationPath;

/// A file or folder as listed from Drive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    /// Drive item ID
    pub id: RemoteId,
    /// Display name (not unique within a folder)
    pub name: String,
    /// Drive content type (`mimeType`)
    pub content_type: String,
    /// IDs of the folders containing this item; empty when not requested
    #[serde(default)]
    pub parent_ids: Vec<RemoteId>,
}

impl RemoteEntry {
    /// Creates an entry with no parent information
    pub fn new(id: RemoteId, name: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            content_type: content_type.into(),
            parent_ids: Vec::new(),
        }
    }

    /// Sets the parent IDs
    pub fn with_parents(mut self, parent_ids: Vec<RemoteId>) -> Self {
        self.parent_ids = parent_ids;
        self
    }

    /// Classifies this entry by its content type
    pub fn handling(&self) -> Handling {
        classify(&self.content_type)
    }

    /// Returns true if Drive lists `folder_id` among this entry's parents
    pub fn is_child_of(&self, folder_id: &RemoteId) -> bool {
        self.parent_ids.contains(folder_id)
    }
}

/// Bytes fetched for one entry, ready to be written to the bucket
///
/// Created by the content fetcher and moved into the uploader, which drops
/// it once the object is written.
#[derive(Debug)]
pub struct TransferUnit {
    /// Entry the bytes were fetched for
    pub source: RemoteEntry,
    /// Object path in the bucket
    pub destination: DestinationPath,
    /// Full content
    pub payload: Vec<u8>,
    /// Content type of `payload` (the export target for exported documents)
    pub content_type: String,
}
