//! Configuration module for drivemirror.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.
//! Every section is optional in the file; missing fields take their defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::domain::path::NameEncoding;
use crate::domain::policy::{AmbiguityPolicy, CollisionPolicy, ErrorPolicy, WalkMode};
use crate::usecases::CopyOptions;

/// Default Drive v3 API base URL.
pub const DEFAULT_DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";

/// Default Cloud Storage API base URL.
pub const DEFAULT_STORAGE_BASE_URL: &str = "https://storage.googleapis.com";

/// Largest page size Drive accepts for `files.list`.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Largest download chunk accepted in `drive.chunk_size_kb` (1 GiB).
pub const MAX_CHUNK_SIZE_KB: u64 = 1024 * 1024;

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for drivemirror.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub drive: DriveConfig,
    pub storage: StorageConfig,
    pub copy: CopyConfig,
    pub logging: LoggingConfig,
}

/// Google Drive API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Base URL of the Drive v3 API.
    pub base_url: String,
    /// Size of each ranged download request (in KiB).
    pub chunk_size_kb: u64,
    /// Entries requested per listing page.
    pub page_size: u32,
    /// Whether listings include items from shared drives.
    pub include_shared_drives: bool,
}

/// Cloud Storage API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base URL of the Cloud Storage JSON API.
    pub base_url: String,
}

/// Copy behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    /// Error policy for `flat` runs.
    pub flat_error_policy: ErrorPolicy,
    /// Error policy for `mirror` runs.
    pub recursive_error_policy: ErrorPolicy,
    /// Behavior when an object already exists.
    pub collision: CollisionPolicy,
    /// Behavior when a folder name matches several folders.
    pub ambiguity: AmbiguityPolicy,
    /// How Drive names become object path segments.
    pub names: NameEncoding,
    /// Path under which `mirror` runs are rooted.
    pub destination_prefix: String,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/drivemirror/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("drivemirror")
            .join("config.yaml")
    }

    /// Copy options for a run in `mode`, before CLI overrides.
    pub fn copy_options(&self, mode: WalkMode) -> CopyOptions {
        let error_policy = match mode {
            WalkMode::Flat => self.copy.flat_error_policy,
            WalkMode::Recursive => self.copy.recursive_error_policy,
        };
        CopyOptions {
            error_policy: Some(error_policy),
            collision: self.copy.collision,
            ambiguity: self.copy.ambiguity,
            names: self.copy.names,
            destination_prefix: match mode {
                WalkMode::Flat => String::new(),
                WalkMode::Recursive => self.copy.destination_prefix.clone(),
            },
        }
    }
}

impl DriveConfig {
    /// Download chunk size in bytes.
    pub fn chunk_size_bytes(&self) -> u64 {
        self.chunk_size_kb.saturating_mul(1024)
    }
}

// ---------------------------------------------------------------------------
// Config::default()
// ---------------------------------------------------------------------------

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DRIVE_BASE_URL.to_string(),
            chunk_size_kb: 10 * 1024,
            page_size: MAX_PAGE_SIZE,
            include_shared_drives: true,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_STORAGE_BASE_URL.to_string(),
        }
    }
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            flat_error_policy: WalkMode::Flat.default_error_policy(),
            recursive_error_policy: WalkMode::Recursive.default_error_policy(),
            collision: CollisionPolicy::default(),
            ambiguity: AmbiguityPolicy::default(),
            names: NameEncoding::default(),
            destination_prefix: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"drive.page_size"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- drive ---
        if !is_http_url(&self.drive.base_url) {
            errors.push(ValidationError {
                field: "drive.base_url".into(),
                message: format!("not an http(s) URL: {}", self.drive.base_url),
            });
        }
        if self.drive.chunk_size_kb == 0 || self.drive.chunk_size_kb > MAX_CHUNK_SIZE_KB {
            errors.push(ValidationError {
                field: "drive.chunk_size_kb".into(),
                message: format!("must be in range 1..={MAX_CHUNK_SIZE_KB}"),
            });
        }
        if self.drive.page_size == 0 || self.drive.page_size > MAX_PAGE_SIZE {
            errors.push(ValidationError {
                field: "drive.page_size".into(),
                message: format!("must be in range 1..={MAX_PAGE_SIZE}"),
            });
        }

        // --- storage ---
        if !is_http_url(&self.storage.base_url) {
            errors.push(ValidationError {
                field: "storage.base_url".into(),
                message: format!("not an http(s) URL: {}", self.storage.base_url),
            });
        }

        // --- copy ---
        if self
            .copy
            .destination_prefix
            .split('/')
            .any(|segment| segment == "." || segment == "..")
        {
            errors.push(ValidationError {
                field: "copy.destination_prefix".into(),
                message: "must not contain '.' or '..' segments".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust,no_run
/// use drivemirror_core::config::ConfigBuilder;
/// use drivemirror_core::domain::CollisionPolicy;
///
/// let config = ConfigBuilder::new()
///     .drive_chunk_size_kb(4096)
///     .copy_collision(CollisionPolicy::FailIfExists)
///     .logging_level("debug")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- drive ---

    pub fn drive_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.drive.base_url = url.into();
        self
    }

    pub fn drive_chunk_size_kb(mut self, kb: u64) -> Self {
        self.config.drive.chunk_size_kb = kb;
        self
    }

    pub fn drive_page_size(mut self, n: u32) -> Self {
        self.config.drive.page_size = n;
        self
    }

    pub fn drive_include_shared_drives(mut self, include: bool) -> Self {
        self.config.drive.include_shared_drives = include;
        self
    }

    // --- storage ---

    pub fn storage_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.storage.base_url = url.into();
        self
    }

    // --- copy ---

    pub fn copy_flat_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.config.copy.flat_error_policy = policy;
        self
    }

    pub fn copy_recursive_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.config.copy.recursive_error_policy = policy;
        self
    }

    pub fn copy_collision(mut self, policy: CollisionPolicy) -> Self {
        self.config.copy.collision = policy;
        self
    }

    pub fn copy_ambiguity(mut self, policy: AmbiguityPolicy) -> Self {
        self.config.copy.ambiguity = policy;
        self
    }

    pub fn copy_names(mut self, encoding: NameEncoding) -> Self {
        self.config.copy.names = encoding;
        self
    }

    pub fn copy_destination_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.copy.destination_prefix = prefix.into();
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
