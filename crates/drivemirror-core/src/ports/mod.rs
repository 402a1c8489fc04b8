//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the domain core
//! depends on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IDriveSource`] - Folder listings and chunked downloads from Google Drive
//! - [`IObjectStore`] - Bucket checks and object writes in Cloud Storage
//! - [`ICopyObserver`] - Progress and status reporting

pub mod drive_source;
pub mod object_store;
pub mod observer;

pub use drive_source::{DownloadChunk, DownloadKind, IChunkedDownload, IDriveSource, ListPage};
pub use object_store::IObjectStore;
pub use observer::{ICopyObserver, NoopObserver, SkipReason};
