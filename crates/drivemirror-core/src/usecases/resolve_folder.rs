//! Folder resolution use case
//!
//! Turns a human-readable folder name into a Drive folder ID. Drive names
//! are not unique, so the ambiguity policy decides what several matches mean.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entry::RemoteEntry;
use crate::domain::errors::CopyError;
use crate::domain::mime::Handling;
use crate::domain::newtypes::RemoteId;
use crate::domain::policy::AmbiguityPolicy;
use crate::ports::IDriveSource;

/// Use case for resolving a folder name to its ID
pub struct FolderResolver {
    source: Arc<dyn IDriveSource>,
    policy: AmbiguityPolicy,
}

impl FolderResolver {
    /// Creates a new FolderResolver
    pub fn new(source: Arc<dyn IDriveSource>, policy: AmbiguityPolicy) -> Self {
        Self { source, policy }
    }

    /// Resolves `name` to the ID of a folder with exactly that name
    ///
    /// Every page of the search is read before deciding, so ambiguity is
    /// detected even when the matches are split across pages.
    ///
    /// # Errors
    ///
    /// - `FolderNotFound` when nothing matches
    /// - `AmbiguousFolderName` when several folders match under `Fail`
    /// - `ListingError` if the search itself fails
    pub async fn resolve(&self, name: &str) -> Result<RemoteId, CopyError> {
        let matches = self.search_all(name).await?;

        let mut matches = matches.into_iter();
        let first = match matches.next() {
            Some(entry) => entry,
            None => return Err(CopyError::FolderNotFound(name.to_string())),
        };
        let others: Vec<RemoteEntry> = matches.collect();

        if others.is_empty() {
            debug!(name, folder_id = %first.id, "Resolved folder");
            return Ok(first.id);
        }

        let candidates: Vec<String> = std::iter::once(&first)
            .chain(others.iter())
            .map(|entry| entry.id.to_string())
            .collect();

        match self.policy {
            AmbiguityPolicy::First => {
                warn!(
                    name,
                    chosen = %first.id,
                    candidates = %candidates.join(", "),
                    "Several folders share this name, using the first"
                );
                Ok(first.id)
            }
            AmbiguityPolicy::Fail => Err(CopyError::AmbiguousFolderName {
                name: name.to_string(),
                candidates,
            }),
        }
    }

    async fn search_all(&self, name: &str) -> Result<Vec<RemoteEntry>, CopyError> {
        let mut found = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self
                .source
                .find_folders(name, page_token.as_deref())
                .await
                .map_err(|err| CopyError::listing(format!("named '{name}'"), &err))?;

            // The query already filters; this guards against loose matches
            found.extend(
                page.entries
                    .into_iter()
                    .filter(|entry| entry.name == name && entry.handling() == Handling::Folder),
            );

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(found)
    }
}
