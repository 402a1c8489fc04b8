//! DriveSource - IDriveSource implementation for the Drive v3 API
//!
//! Wraps the [`DriveClient`] and delegates to the listing and download
//! modules to fulfil the [`IDriveSource`] port contract.
//!
//! ## Design Notes
//!
//! - Holds no mutable state; the client is cloned into each download.
//! - Pagination is left to the caller: each call returns exactly one page.

use anyhow::{Context, Result};

use drivemirror_core::domain::RemoteId;
use drivemirror_core::ports::{DownloadKind, IChunkedDownload, IDriveSource, ListPage};

use crate::client::DriveClient;
use crate::download::ChunkedDownload;
use crate::listing;

/// Drive source backed by the Drive v3 REST API
#[derive(Debug, Clone)]
pub struct DriveSource {
    client: DriveClient,
}

impl DriveSource {
    /// Creates a new `DriveSource` wrapping the given [`DriveClient`]
    pub fn new(client: DriveClient) -> Self {
        Self { client }
    }

    /// Returns the underlying client
    pub fn client(&self) -> &DriveClient {
        &self.client
    }
}

#[async_trait::async_trait]
impl IDriveSource for DriveSource {
    async fn list_children(&self, parent: &RemoteId, page_token: Option<&str>) -> Result<ListPage> {
        listing::list_page(&self.client, &listing::children_query(parent), page_token)
            .await
            .with_context(|| format!("Failed to list children of {parent}"))
    }

    async fn find_folders(&self, name: &str, page_token: Option<&str>) -> Result<ListPage> {
        listing::list_page(&self.client, &listing::folder_query(name), page_token)
            .await
            .with_context(|| format!("Failed to search for folder '{name}'"))
    }

    async fn open_download(
        &self,
        file_id: &RemoteId,
        kind: &DownloadKind,
    ) -> Result<Box<dyn IChunkedDownload>> {
        Ok(Box::new(ChunkedDownload::new(
            self.client.clone(),
            file_id.clone(),
            kind.clone(),
        )))
    }
}
