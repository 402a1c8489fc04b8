//! CLI subcommands and the wiring they share
//!
//! `flat` and `mirror` both take explicit access tokens, the same copy
//! policy flags, and end by mapping the outcome of the run to an exit code.

pub mod config;
pub mod flat;
pub mod mirror;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};

use drivemirror_core::config::Config;
use drivemirror_core::domain::{
    AmbiguityPolicy, BucketName, CollisionPolicy, CopyError, ErrorPolicy, NameEncoding, WalkMode,
};
use drivemirror_core::ports::ICopyObserver;
use drivemirror_core::usecases::{CopyFolderUseCase, CopyOptions, CopyReport};
use drivemirror_drive::client::DriveClient;
use drivemirror_drive::provider::DriveSource;
use drivemirror_gcs::client::GcsClient;
use drivemirror_gcs::store::GcsObjectStore;

use crate::output::{print_report, ConsoleObserver, OutputFormat, OutputFormatter};

/// Settings shared by every subcommand
#[derive(Debug, Clone)]
pub struct RunContext {
    pub format: OutputFormat,
    pub quiet: bool,
    pub config_path: PathBuf,
    pub config: Config,
}

/// Loads the configuration file
///
/// An explicit `--config` path must exist and parse. The default path
/// falls back to built-in defaults when the file is missing.
pub fn load_config(explicit: Option<&str>) -> Result<(PathBuf, Config)> {
    match explicit {
        Some(path) => {
            let path = PathBuf::from(path);
            let config = Config::load(&path)?;
            Ok((path, config))
        }
        None => {
            let path = Config::default_path();
            let config = Config::load_or_default(&path);
            Ok((path, config))
        }
    }
}

/// Fails with every validation error when the effective config is invalid
pub fn validate_config(config: &Config, path: &Path) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    bail!(
        "Invalid configuration ({}): {}",
        path.display(),
        messages.join("; ")
    )
}

// ============================================================================
// Credentials
// ============================================================================

/// Access tokens for the two services
#[derive(Debug, Clone, Default, Args)]
pub struct TokenArgs {
    /// OAuth2 access token for Google Drive
    #[arg(long, env = "DRIVEMIRROR_DRIVE_TOKEN", hide_env_values = true)]
    pub drive_token: Option<String>,

    /// OAuth2 access token for Cloud Storage
    #[arg(long, env = "DRIVEMIRROR_STORAGE_TOKEN", hide_env_values = true)]
    pub storage_token: Option<String>,

    /// Access token used for either service when its own token is absent
    #[arg(long, env = "GOOGLE_OAUTH_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,
}

/// Resolved tokens, one per service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    pub drive: String,
    pub storage: String,
}

impl TokenArgs {
    /// Picks each service's token, falling back to `--access-token`
    ///
    /// Empty values count as missing.
    pub fn resolve(&self) -> Result<Tokens, CopyError> {
        Ok(Tokens {
            drive: pick(&self.drive_token, &self.access_token).ok_or_else(|| {
                CopyError::CredentialError(
                    "no Google Drive token; pass --drive-token or --access-token \
                     (or set DRIVEMIRROR_DRIVE_TOKEN / GOOGLE_OAUTH_ACCESS_TOKEN)"
                        .to_string(),
                )
            })?,
            storage: pick(&self.storage_token, &self.access_token).ok_or_else(|| {
                CopyError::CredentialError(
                    "no Cloud Storage token; pass --storage-token or --access-token \
                     (or set DRIVEMIRROR_STORAGE_TOKEN / GOOGLE_OAUTH_ACCESS_TOKEN)"
                        .to_string(),
                )
            })?,
        })
    }
}

fn pick(own: &Option<String>, shared: &Option<String>) -> Option<String> {
    [own, shared]
        .into_iter()
        .flatten()
        .map(|t| t.trim())
        .find(|t| !t.is_empty())
        .map(str::to_string)
}

// ============================================================================
// Copy policy flags
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnError {
    /// Stop at the first failure
    FailFast,
    /// Record the failure and continue with the next entry
    Isolate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnConflict {
    /// Replace existing objects
    Overwrite,
    /// Treat an existing object as an error
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnAmbiguous {
    /// Use the first matching folder
    First,
    /// Refuse to copy when several folders match
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Names {
    /// Use Drive names as-is
    Verbatim,
    /// Escape characters that would change the object path
    Encoded,
}

impl From<OnError> for ErrorPolicy {
    fn from(value: OnError) -> Self {
        match value {
            OnError::FailFast => ErrorPolicy::FailFast,
            OnError::Isolate => ErrorPolicy::IsolateAndContinue,
        }
    }
}

impl From<OnConflict> for CollisionPolicy {
    fn from(value: OnConflict) -> Self {
        match value {
            OnConflict::Overwrite => CollisionPolicy::Overwrite,
            OnConflict::Fail => CollisionPolicy::FailIfExists,
        }
    }
}

impl From<OnAmbiguous> for AmbiguityPolicy {
    fn from(value: OnAmbiguous) -> Self {
        match value {
            OnAmbiguous::First => AmbiguityPolicy::First,
            OnAmbiguous::Fail => AmbiguityPolicy::Fail,
        }
    }
}

impl From<Names> for NameEncoding {
    fn from(value: Names) -> Self {
        match value {
            Names::Verbatim => NameEncoding::Verbatim,
            Names::Encoded => NameEncoding::Encoded,
        }
    }
}

/// Policy overrides shared by both copy commands
#[derive(Debug, Clone, Default, Args)]
pub struct CopyArgs {
    /// What to do when a file or folder fails
    #[arg(long, value_enum)]
    pub on_error: Option<OnError>,

    /// What to do when an object already exists
    #[arg(long, value_enum)]
    pub on_conflict: Option<OnConflict>,

    /// How Drive names become object path segments
    #[arg(long, value_enum)]
    pub names: Option<Names>,
}

impl CopyArgs {
    /// Overrides the configured options with any flags given
    pub fn apply(&self, options: &mut CopyOptions) {
        if let Some(on_error) = self.on_error {
            options.error_policy = Some(on_error.into());
        }
        if let Some(on_conflict) = self.on_conflict {
            options.collision = on_conflict.into();
        }
        if let Some(names) = self.names {
            options.names = names.into();
        }
    }
}

// ============================================================================
// Wiring
// ============================================================================

/// Builds the copy use case on top of the Drive and Cloud Storage adapters
pub fn build_use_case(
    config: &Config,
    tokens: Tokens,
    observer: Arc<dyn ICopyObserver>,
) -> CopyFolderUseCase {
    let drive_client = DriveClient::with_base_url(tokens.drive, &config.drive.base_url)
        .with_page_size(config.drive.page_size)
        .with_shared_drives(config.drive.include_shared_drives)
        .with_chunk_size(config.drive.chunk_size_bytes());
    let gcs_client = GcsClient::with_base_url(tokens.storage, &config.storage.base_url);

    CopyFolderUseCase::new(
        Arc::new(DriveSource::new(drive_client)),
        Arc::new(GcsObjectStore::new(gcs_client)),
        observer,
    )
}

/// Observer printing events for this invocation
pub fn console_observer(ctx: &RunContext) -> Arc<dyn ICopyObserver> {
    Arc::new(ConsoleObserver::new(ctx.format, ctx.quiet))
}

/// Exit status for a run that ended in `err`
///
/// A recursive run whose folder does not exist copies nothing and still
/// exits 0. Every other error that ends a run is fatal.
pub fn exit_status(mode: WalkMode, err: &CopyError) -> u8 {
    match (mode, err) {
        (WalkMode::Recursive, CopyError::FolderNotFound(_)) => 0,
        _ => 1,
    }
}

/// Prints the outcome of a run and returns the process exit code
pub fn finish(
    formatter: &dyn OutputFormatter,
    format: OutputFormat,
    mode: WalkMode,
    outcome: Result<(BucketName, CopyReport), CopyError>,
) -> ExitCode {
    match outcome {
        Ok((bucket, report)) => {
            print_report(formatter, format, mode, &bucket, &report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let status = exit_status(mode, &err);
            if status == 0 {
                formatter.warn(&format!("{err}; nothing was copied"));
            } else {
                formatter.error(&err.to_string());
            }
            ExitCode::from(status)
        }
    }
}
