//! In-memory fakes for the core ports
//!
//! `FakeDrive` serves listings page by page and content in fixed-size
//! chunks; `FakeStore` keeps objects in a map; `RecordingObserver` keeps
//! every event it receives.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail};

use drivemirror_core::domain::mime::FOLDER_MIME_TYPE;
use drivemirror_core::domain::{
    BucketName, CopyError, DestinationPath, RemoteEntry, RemoteId,
};
use drivemirror_core::ports::{
    DownloadChunk, DownloadKind, IChunkedDownload, ICopyObserver, IDriveSource, IObjectStore,
    ListPage, SkipReason,
};
use drivemirror_core::usecases::CopyFolderUseCase;

// ============================================================================
// Helpers
// ============================================================================

pub fn id(s: &str) -> RemoteId {
    RemoteId::new(s.to_string()).unwrap()
}

pub fn bucket(s: &str) -> BucketName {
    BucketName::new(s.to_string()).unwrap()
}

pub fn file(file_id: &str, name: &str, content_type: &str) -> RemoteEntry {
    RemoteEntry::new(id(file_id), name, content_type)
}

pub fn folder(folder_id: &str, name: &str) -> RemoteEntry {
    RemoteEntry::new(id(folder_id), name, FOLDER_MIME_TYPE)
}

pub fn use_case(
    drive: &Arc<FakeDrive>,
    store: &Arc<FakeStore>,
    observer: &Arc<RecordingObserver>,
) -> CopyFolderUseCase {
    CopyFolderUseCase::new(drive.clone(), store.clone(), observer.clone())
}

// ============================================================================
// FakeDrive
// ============================================================================

#[derive(Default)]
pub struct FakeDrive {
    listings: HashMap<String, Vec<Vec<RemoteEntry>>>,
    searches: HashMap<String, Vec<Vec<RemoteEntry>>>,
    media: HashMap<String, Vec<u8>>,
    exports: HashMap<String, Vec<u8>>,
    failing_listings: HashSet<String>,
    failing_downloads: HashSet<String>,
    chunk_size: usize,
    pub downloads: Mutex<Vec<(String, DownloadKind)>>,
    pub listed: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeDrive {
    pub fn new() -> Self {
        Self {
            chunk_size: 4,
            ..Default::default()
        }
    }

    /// Children of `folder_id`, served as a single page
    pub fn with_children(self, folder_id: &str, entries: Vec<RemoteEntry>) -> Self {
        self.with_pages(folder_id, vec![entries])
    }

    /// Children of `folder_id`, served as the given pages in order
    pub fn with_pages(mut self, folder_id: &str, pages: Vec<Vec<RemoteEntry>>) -> Self {
        self.listings.insert(folder_id.to_string(), pages);
        self
    }

    /// Folder search results for `name`, served as the given pages
    pub fn with_search(mut self, name: &str, pages: Vec<Vec<RemoteEntry>>) -> Self {
        self.searches.insert(name.to_string(), pages);
        self
    }

    pub fn with_media(mut self, file_id: &str, content: &[u8]) -> Self {
        self.media.insert(file_id.to_string(), content.to_vec());
        self
    }

    pub fn with_export(mut self, file_id: &str, content: &[u8]) -> Self {
        self.exports.insert(file_id.to_string(), content.to_vec());
        self
    }

    pub fn with_failing_listing(mut self, folder_id: &str) -> Self {
        self.failing_listings.insert(folder_id.to_string());
        self
    }

    pub fn with_failing_download(mut self, file_id: &str) -> Self {
        self.failing_downloads.insert(file_id.to_string());
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn download_count(&self) -> usize {
        self.downloads.lock().unwrap().len()
    }

    fn page(pages: Option<&Vec<Vec<RemoteEntry>>>, page_token: Option<&str>) -> anyhow::Result<ListPage> {
        let pages = match pages {
            Some(pages) if !pages.is_empty() => pages,
            _ => return Ok(ListPage::default()),
        };
        let index = match page_token {
            None => 0,
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| anyhow!("bad page token {token}"))?,
        };
        let entries = pages
            .get(index)
            .cloned()
            .ok_or_else(|| anyhow!("page {index} out of range"))?;
        let next_page_token = if index + 1 < pages.len() {
            Some(format!("page-{}", index + 1))
        } else {
            None
        };
        Ok(ListPage {
            entries,
            next_page_token,
        })
    }
}

#[async_trait::async_trait]
impl IDriveSource for FakeDrive {
    async fn list_children(
        &self,
        parent: &RemoteId,
        page_token: Option<&str>,
    ) -> anyhow::Result<ListPage> {
        self.listed
            .lock()
            .unwrap()
            .push((parent.to_string(), page_token.map(str::to_string)));
        if self.failing_listings.contains(parent.as_str()) {
            bail!("listing of {parent} refused");
        }
        Self::page(self.listings.get(parent.as_str()), page_token)
    }

    async fn find_folders(&self, name: &str, page_token: Option<&str>) -> anyhow::Result<ListPage> {
        Self::page(self.searches.get(name), page_token)
    }

    async fn open_download(
        &self,
        file_id: &RemoteId,
        kind: &DownloadKind,
    ) -> anyhow::Result<Box<dyn IChunkedDownload>> {
        self.downloads
            .lock()
            .unwrap()
            .push((file_id.to_string(), kind.clone()));

        let content = match kind {
            DownloadKind::Media => self.media.get(file_id.as_str()),
            DownloadKind::Export { .. } => self.exports.get(file_id.as_str()),
        }
        .cloned()
        .ok_or_else(|| anyhow!("no content for {file_id}"))?;

        Ok(Box::new(FakeDownload {
            content,
            position: 0,
            chunk_size: self.chunk_size,
            fail_after_first: self.failing_downloads.contains(file_id.as_str()),
            calls: 0,
        }))
    }
}

struct FakeDownload {
    content: Vec<u8>,
    position: usize,
    chunk_size: usize,
    fail_after_first: bool,
    calls: u32,
}

#[async_trait::async_trait]
impl IChunkedDownload for FakeDownload {
    async fn next_chunk(&mut self) -> anyhow::Result<DownloadChunk> {
        self.calls += 1;
        if self.fail_after_first && self.calls > 1 {
            bail!("connection reset");
        }
        if self.content.is_empty() {
            return Ok(DownloadChunk {
                data: Vec::new(),
                progress: 1.0,
                done: true,
            });
        }
        let end = (self.position + self.chunk_size).min(self.content.len());
        let data = self.content[self.position..end].to_vec();
        self.position = end;
        Ok(DownloadChunk {
            data,
            progress: self.position as f64 / self.content.len() as f64,
            done: self.position == self.content.len(),
        })
    }
}

// ============================================================================
// FakeStore
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
pub struct FakeStore {
    buckets: HashSet<String>,
    failing_paths: HashSet<String>,
    pub objects: Mutex<HashMap<(String, String), StoredObject>>,
    pub puts: Mutex<Vec<String>>,
}

impl FakeStore {
    pub fn with_bucket(name: &str) -> Self {
        let mut store = Self::default();
        store.buckets.insert(name.to_string());
        store
    }

    pub fn with_failing_path(mut self, path: &str) -> Self {
        self.failing_paths.insert(path.to_string());
        self
    }

    pub fn object(&self, bucket: &str, path: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), path.to_string()))
            .cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .objects
            .lock()
            .unwrap()
            .keys()
            .map(|(_, path)| path.clone())
            .collect();
        paths.sort();
        paths
    }

    pub fn put_order(&self) -> Vec<String> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IObjectStore for FakeStore {
    async fn bucket_exists(&self, bucket: &BucketName) -> anyhow::Result<bool> {
        Ok(self.buckets.contains(bucket.as_str()))
    }

    async fn object_exists(
        &self,
        bucket: &BucketName,
        path: &DestinationPath,
    ) -> anyhow::Result<bool> {
        Ok(self
            .objects
            .lock()
            .unwrap()
            .contains_key(&(bucket.to_string(), path.to_string())))
    }

    async fn put_object(
        &self,
        bucket: &BucketName,
        path: &DestinationPath,
        data: Vec<u8>,
        content_type: &str,
    ) -> anyhow::Result<()> {
        if self.failing_paths.contains(path.as_str()) {
            bail!("403 Forbidden");
        }
        self.puts.lock().unwrap().push(path.to_string());
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), path.to_string()),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }
}

// ============================================================================
// RecordingObserver
// ============================================================================

#[derive(Default)]
pub struct RecordingObserver {
    pub entries: Mutex<Vec<String>>,
    pub progress: Mutex<Vec<(String, f64)>>,
    pub uploaded: Mutex<Vec<String>>,
    pub skipped: Mutex<Vec<(String, SkipReason)>>,
    pub isolated: Mutex<Vec<CopyError>>,
}

impl RecordingObserver {
    pub fn progress_for(&self, path: &str) -> Vec<f64> {
        self.progress
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, fraction)| *fraction)
            .collect()
    }
}

impl ICopyObserver for RecordingObserver {
    fn on_entry(&self, _entry: &RemoteEntry, destination: &DestinationPath) {
        self.entries.lock().unwrap().push(destination.to_string());
    }

    fn on_progress(&self, destination: &DestinationPath, fraction: f64) {
        self.progress
            .lock()
            .unwrap()
            .push((destination.to_string(), fraction));
    }

    fn on_uploaded(&self, _bucket: &BucketName, destination: &DestinationPath, _bytes: usize) {
        self.uploaded.lock().unwrap().push(destination.to_string());
    }

    fn on_skipped(&self, entry: &RemoteEntry, reason: SkipReason) {
        self.skipped.lock().unwrap().push((entry.name.clone(), reason));
    }

    fn on_isolated_error(&self, error: &CopyError) {
        self.isolated.lock().unwrap().push(error.clone());
    }
}
