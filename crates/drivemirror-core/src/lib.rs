//! drivemirror Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain types** - `RemoteEntry`, `TransferUnit`, `DestinationPath`, `CopyError`, policies
//! - **Use cases** - `CopyFolderUseCase`, `TreeWalker`, `FolderResolver`, `ContentFetcher`, `Uploader`
//! - **Port definitions** - Traits for adapters: `IDriveSource`, `IObjectStore`, `ICopyObserver`
//! - **Configuration** - YAML configuration with defaults and validation
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no external dependencies.
//! Ports define trait interfaces that adapter crates implement.
//! Use cases orchestrate domain entities through port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
