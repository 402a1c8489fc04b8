//! Copy observer port (driving side, for progress reporting)
//!
//! The use cases report what they are doing through this trait; the CLI
//! renders it as status lines. Observation never affects control flow.
//!
//! ## Design Notes
//!
//! - Methods are synchronous and fire-and-forget.
//! - Every method has a no-op default so observers implement only what
//!   they display.

use std::fmt::{self, Display, Formatter};

use crate::domain::entry::RemoteEntry;
use crate::domain::errors::CopyError;
use crate::domain::newtypes::BucketName;
use crate::domain::path::DestinationPath;

/// Why an entry was not copied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A folder encountered in flat mode
    FolderInFlatMode,
    /// A content type with no download or export strategy
    UnsupportedType,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::FolderInFlatMode => "folder",
            SkipReason::UnsupportedType => "unsupported MIME type",
        };
        write!(f, "{}", s)
    }
}

/// Receives progress and status events from a copy run
pub trait ICopyObserver: Send + Sync {
    /// An entry is about to be processed
    fn on_entry(&self, _entry: &RemoteEntry, _destination: &DestinationPath) {}

    /// Download progress for the file bound for `destination`
    fn on_progress(&self, _destination: &DestinationPath, _fraction: f64) {}

    /// An object was written
    fn on_uploaded(&self, _bucket: &BucketName, _destination: &DestinationPath, _bytes: usize) {}

    /// An entry was skipped without error
    fn on_skipped(&self, _entry: &RemoteEntry, _reason: SkipReason) {}

    /// An error was isolated and the run continues
    fn on_isolated_error(&self, _error: &CopyError) {}
}

/// Observer that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ICopyObserver for NoopObserver {}
