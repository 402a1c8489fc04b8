//! Per-run behavior switches
//!
//! Each policy is chosen per invocation (config file, then CLI flags) and
//! handed to the use cases explicitly.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// What a walk does after a per-file or per-folder failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Stop at the first failure and report it
    FailFast,
    /// Log the failure, record it in the report and continue with the next sibling
    #[serde(rename = "isolate")]
    IsolateAndContinue,
}

/// What an upload does when an object already exists at the path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Replace the existing object
    #[default]
    Overwrite,
    /// Fail with `ObjectExists`
    #[serde(rename = "fail")]
    FailIfExists,
}

/// What folder resolution does when several folders share the name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// Take the first match returned by Drive and log the others
    #[default]
    First,
    /// Fail with `AmbiguousFolderName`
    Fail,
}

/// Whether a walk descends into subfolders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkMode {
    /// Immediate children only; subfolders are skipped
    Flat,
    /// The whole subtree
    Recursive,
}

impl WalkMode {
    /// Error policy used when none is configured
    pub fn default_error_policy(self) -> ErrorPolicy {
        match self {
            WalkMode::Flat => ErrorPolicy::FailFast,
            WalkMode::Recursive => ErrorPolicy::IsolateAndContinue,
        }
    }
}

macro_rules! policy_strings {
    ($ty:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                let s = match self {
                    $($ty::$variant => $s,)+
                };
                write!(f, "{}", s)
            }
        }

        impl FromStr for $ty {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok($ty::$variant),)+
                    other => Err(DomainError::ValidationFailed(format!(
                        "invalid {} '{}'; valid options: {}",
                        stringify!($ty),
                        other,
                        [$($s),+].join(", ")
                    ))),
                }
            }
        }
    };
}

policy_strings!(ErrorPolicy {
    FailFast => "fail_fast",
    IsolateAndContinue => "isolate",
});

policy_strings!(CollisionPolicy {
    Overwrite => "overwrite",
    FailIfExists => "fail",
});

policy_strings!(AmbiguityPolicy {
    First => "first",
    Fail => "fail",
});

policy_strings!(WalkMode {
    Flat => "flat",
    Recursive => "recursive",
});
