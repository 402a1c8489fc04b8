//! Domain newtypes with validation
//!
//! Strongly-typed wrappers for the identifiers that cross the Drive and
//! Cloud Storage boundaries. Each newtype ensures validity at construction
//! time, so adapters can embed the values in URLs and query strings
//! without further escaping.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

// ============================================================================
// RemoteId
// ============================================================================

/// Google Drive item identifier
///
/// Drive IDs are opaque strings made of ASCII letters, digits, `-` and `_`.
/// Rejecting anything else keeps IDs safe to interpolate into a Drive
/// search query such as `'<id>' in parents`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RemoteId(String);

impl RemoteId {
    /// Create a new RemoteId
    ///
    /// # Errors
    /// Returns error if the ID is empty or contains characters outside
    /// `[A-Za-z0-9_-]`
    pub fn new(id: String) -> Result<Self, DomainError> {
        if id.is_empty() {
            return Err(DomainError::InvalidRemoteId(
                "Remote ID cannot be empty".to_string(),
            ));
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::InvalidRemoteId(format!(
                "Remote ID contains invalid characters: {id}"
            )));
        }

        Ok(Self(id))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RemoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RemoteId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for RemoteId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RemoteId> for String {
    fn from(id: RemoteId) -> Self {
        id.0
    }
}

// ============================================================================
// BucketName
// ============================================================================

/// Google Cloud Storage bucket name
///
/// Follows the GCS naming rules: lowercase letters, digits, `-`, `_` and
/// `.`; must start and end with a letter or digit; 3-63 characters, or up
/// to 222 characters when dotted with no dot-separated component longer
/// than 63.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BucketName(String);

impl BucketName {
    const MIN_LEN: usize = 3;
    const MAX_LEN: usize = 63;
    const MAX_DOTTED_LEN: usize = 222;

    /// Create a new BucketName
    ///
    /// # Errors
    /// Returns error if the name violates the GCS naming rules
    pub fn new(name: String) -> Result<Self, DomainError> {
        let max_len = if name.contains('.') {
            Self::MAX_DOTTED_LEN
        } else {
            Self::MAX_LEN
        };

        if name.len() < Self::MIN_LEN || name.len() > max_len {
            return Err(DomainError::InvalidBucketName(format!(
                "'{name}' must be between {} and {max_len} characters",
                Self::MIN_LEN
            )));
        }

        if !name.chars().all(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_' || c == '.'
        }) {
            return Err(DomainError::InvalidBucketName(format!(
                "'{name}' may only contain lowercase letters, digits, '-', '_' and '.'"
            )));
        }

        let is_edge_ok = |c: Option<char>| c.is_some_and(|c| c.is_ascii_alphanumeric());
        if !is_edge_ok(name.chars().next()) || !is_edge_ok(name.chars().last()) {
            return Err(DomainError::InvalidBucketName(format!(
                "'{name}' must start and end with a letter or digit"
            )));
        }

        if name.split('.').any(|part| part.len() > Self::MAX_LEN) {
            return Err(DomainError::InvalidBucketName(format!(
                "'{name}' has a dot-separated component longer than {}",
                Self::MAX_LEN
            )));
        }

        Ok(Self(name))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BucketName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BucketName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for BucketName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BucketName> for String {
    fn from(name: BucketName) -> Self {
        name.0
    }
}
