//! Drive `files.list` queries
//!
//! Builds the search queries for folder listings and folder-name lookups,
//! fetches one page at a time and converts the response into port-level
//! [`ListPage`] values.
//!
//! ## Query Language
//!
//! String literals in Drive queries are single-quoted. A quote or backslash
//! inside a literal must be escaped with a backslash, so names are passed
//! through [`escape_query_value`] before being embedded.

use anyhow::{Context, Result};
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, warn};

use drivemirror_core::domain::mime::FOLDER_MIME_TYPE;
use drivemirror_core::domain::{RemoteEntry, RemoteId};
use drivemirror_core::ports::ListPage;

use crate::client::DriveClient;

/// Path of the listing endpoint relative to the API base URL
const FILES_PATH: &str = "/files";

/// Fields requested for each listed file
const LIST_FIELDS: &str = "nextPageToken,files(id,name,mimeType,parents)";

// ============================================================================
// Drive API response types (JSON deserialization)
// ============================================================================

/// Raw response from `GET /files`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    /// Files on this page
    #[serde(default)]
    files: Vec<DriveFile>,
    /// Token for the next page (absent on the last page)
    next_page_token: Option<String>,
}

/// A file resource with the requested fields
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    parents: Vec<String>,
}

// ============================================================================
// Queries
// ============================================================================

/// Escapes a value for use inside a single-quoted query literal
pub fn escape_query_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '\\' || c == '\'' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Query matching the non-trashed children of `parent`
pub fn children_query(parent: &RemoteId) -> String {
    format!(
        "'{}' in parents and trashed = false",
        escape_query_value(parent.as_str())
    )
}

/// Query matching non-trashed folders named exactly `name`
pub fn folder_query(name: &str) -> String {
    format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        escape_query_value(name),
        FOLDER_MIME_TYPE
    )
}

// ============================================================================
// Listing
// ============================================================================

/// Fetches one page of files matching `query`
///
/// # Arguments
///
/// * `client` - Authenticated Drive client
/// * `query` - Drive search query
/// * `page_token` - Token from the previous page (None for the first page)
///
/// # Errors
///
/// Returns an error if the request fails, the API returns a non-success
/// status, or the response cannot be parsed.
pub async fn list_page(
    client: &DriveClient,
    query: &str,
    page_token: Option<&str>,
) -> Result<ListPage> {
    let mut params: Vec<(&str, String)> = vec![
        ("q", query.to_string()),
        ("fields", LIST_FIELDS.to_string()),
        ("pageSize", client.page_size().to_string()),
    ];
    if let Some(token) = page_token {
        params.push(("pageToken", token.to_string()));
    }
    if client.include_shared_drives() {
        params.push(("supportsAllDrives", "true".to_string()));
        params.push(("includeItemsFromAllDrives", "true".to_string()));
    }

    debug!(query, has_token = page_token.is_some(), "Listing files");

    let list: FileList = client
        .send(
            client.request(Method::GET, FILES_PATH).query(&params),
            "files.list",
        )
        .await?
        .json()
        .await
        .context("Failed to parse files.list response")?;

    let page = parse_file_list(list);

    debug!(
        entries = page.entries.len(),
        has_next = page.next_page_token.is_some(),
        "Received listing page"
    );

    Ok(page)
}

/// Converts a raw listing into port-level entries
///
/// Files whose ID is not a valid [`RemoteId`] are dropped with a warning.
fn parse_file_list(list: FileList) -> ListPage {
    let entries = list
        .files
        .into_iter()
        .filter_map(|file| match RemoteId::new(file.id.clone()) {
            Ok(id) => {
                let parents = file
                    .parents
                    .into_iter()
                    .filter_map(|p| RemoteId::new(p).ok())
                    .collect();
                Some(RemoteEntry::new(id, file.name, file.mime_type).with_parents(parents))
            }
            Err(err) => {
                warn!(id = %file.id, name = %file.name, error = %err, "Skipping listed file");
                None
            }
        })
        .collect();

    ListPage {
        entries,
        next_page_token: list.next_page_token.filter(|t| !t.is_empty()),
    }
}
