//! Domain entities and business logic
//!
//! This module contains the core domain types for drivemirror:
//! - Newtypes for validated Drive IDs and bucket names
//! - Content-type classification
//! - Destination path mapping
//! - Per-run policies
//! - Listed entries and transfer units
//! - Domain-specific error types

pub mod entry;
pub mod errors;
pub mod mime;
pub mod newtypes;
pub mod path;
pub mod policy;

// Re-export commonly used types
pub use entry::{RemoteEntry, TransferUnit};
pub use errors::{CopyError, DomainError};
pub use mime::{classify, export_mime_type, Handling};
pub use newtypes::{BucketName, RemoteId};
pub use path::{DestinationPath, NameEncoding, PathMapper};
pub use policy::{AmbiguityPolicy, CollisionPolicy, ErrorPolicy, WalkMode};
