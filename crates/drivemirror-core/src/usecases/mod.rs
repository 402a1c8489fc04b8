//! Use cases (interactors) for drivemirror
//!
//! This module contains the application use cases that orchestrate
//! domain entities and port interfaces. Use cases are thin coordinators
//! that delegate business rules to domain methods and I/O to ports.
//!
//! ## Use Cases
//!
//! - [`CopyFolderUseCase`] - Flat and recursive copy entry points
//! - [`TreeWalker`] - Listing, classification and traversal
//! - [`FolderResolver`] - Folder name to ID resolution
//! - [`ContentFetcher`] - Chunked download and export
//! - [`Uploader`] - Object writes under a collision policy

pub mod copy_folder;
pub mod fetch_content;
pub mod resolve_folder;
pub mod upload_object;
pub mod walk_tree;

pub use copy_folder::{CopyFolderUseCase, CopyOptions};
pub use fetch_content::ContentFetcher;
pub use resolve_folder::FolderResolver;
pub use upload_object::Uploader;
pub use walk_tree::{CopyReport, TreeWalker};
