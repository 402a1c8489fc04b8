//! Destination path mapping
//!
//! Object paths in the bucket mirror the Drive folder chain below the copy
//! root. A child's path is its parent's path joined with the child's name
//! by a single `/`.
//!
//! Drive names may contain characters that mean something to an object
//! path (`/` most of all). [`NameEncoding`] selects whether names are used
//! verbatim or percent-encoded first:
//!
//! | input                    | `Encoded` output        |
//! |--------------------------|-------------------------|
//! | `%`                      | `%25`                   |
//! | `/`                      | `%2F`                   |
//! | `\`                      | `%5C`                   |
//! | ASCII control characters | `%XX` (uppercase hex)   |
//! | exactly `.` or `..`      | `%2E` / `%2E%2E`        |
//! | empty name               | `_`                     |
//!
//! Everything else, including leading dots and spaces, passes through.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Separator between path segments
pub const SEPARATOR: char = '/';

/// Destination object path inside a bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationPath(String);

impl DestinationPath {
    /// The empty path: the bucket root
    #[must_use]
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Wraps a path string without modification
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns this path joined with `name`
    #[must_use]
    pub fn join(&self, name: &str) -> Self {
        Self(join(&self.0, name))
    }

    /// Returns true for the bucket root
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DestinationPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DestinationPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Joins a parent path and a child name with one separator
///
/// An empty parent yields `name`; an empty name yields `parent`. No
/// normalization is applied to either side.
pub fn join(parent: &str, name: &str) -> String {
    match (parent.is_empty(), name.is_empty()) {
        (true, _) => name.to_string(),
        (false, true) => parent.to_string(),
        (false, false) => format!("{parent}{SEPARATOR}{name}"),
    }
}

/// How Drive names are turned into path segments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameEncoding {
    /// Use names exactly as listed; a `/` inside a name creates nesting
    Verbatim,
    /// Percent-encode characters that would change the path structure
    #[default]
    Encoded,
}

/// Turns a single Drive name into one path segment
pub fn encode_segment(name: &str, encoding: NameEncoding) -> String {
    match encoding {
        NameEncoding::Verbatim => name.to_string(),
        NameEncoding::Encoded => encode_name(name),
    }
}

fn encode_name(name: &str) -> String {
    match name {
        "" => return "_".to_string(),
        "." => return "%2E".to_string(),
        ".." => return "%2E%2E".to_string(),
        _ => {}
    }

    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '%' | '/' | '\\' => push_escaped(&mut out, c),
            c if c.is_ascii_control() => push_escaped(&mut out, c),
            c => out.push(c),
        }
    }
    out
}

fn push_escaped(out: &mut String, c: char) {
    out.push_str(&format!("%{:02X}", c as u32));
}

/// Maps Drive names under a parent path to destination paths
#[derive(Debug, Clone, Copy, Default)]
pub struct PathMapper {
    encoding: NameEncoding,
}

impl PathMapper {
    /// Creates a mapper with the given name encoding
    pub fn new(encoding: NameEncoding) -> Self {
        Self { encoding }
    }

    /// Destination path for the child `name` of `parent`
    pub fn child(&self, parent: &DestinationPath, name: &str) -> DestinationPath {
        parent.join(&encode_segment(name, self.encoding))
    }
}
