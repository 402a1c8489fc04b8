//! Integration tests for folder listings and folder search
//!
//! Verifies the `files.list` requests sent for children listings and
//! exact-name folder lookups, including pagination tokens and error
//! statuses.

use drivemirror_core::domain::mime::FOLDER_MIME_TYPE;
use drivemirror_core::domain::RemoteId;
use drivemirror_core::ports::IDriveSource;
use drivemirror_drive::client::DriveClient;
use drivemirror_drive::listing::{children_query, folder_query};
use drivemirror_drive::provider::DriveSource;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common;

fn root() -> RemoteId {
    RemoteId::new("root-folder".to_string()).unwrap()
}

#[tokio::test]
async fn test_list_children_single_page() {
    let (server, source) = common::setup_drive_mock(1024).await;

    common::mount_list_page(
        &server,
        &children_query(&root()),
        None,
        serde_json::json!([
            common::drive_file("file-1", "a.pdf", "application/pdf"),
            common::drive_file("folder-1", "c", FOLDER_MIME_TYPE),
        ]),
        None,
    )
    .await;

    let page = source
        .list_children(&root(), None)
        .await
        .expect("listing failed");

    assert_eq!(page.entries.len(), 2);
    assert!(page.next_page_token.is_none());
    assert_eq!(page.entries[0].id.as_str(), "file-1");
    assert_eq!(page.entries[0].name, "a.pdf");
    assert!(page.entries[0].is_child_of(&root()));
    assert_eq!(page.entries[1].content_type, FOLDER_MIME_TYPE);
}

#[tokio::test]
async fn test_list_children_follows_page_token() {
    let (server, source) = common::setup_drive_mock(1024).await;
    let query = children_query(&root());

    common::mount_list_page(
        &server,
        &query,
        None,
        serde_json::json!([common::drive_file("file-1", "one.pdf", "application/pdf")]),
        Some("page-two"),
    )
    .await;
    common::mount_list_page(
        &server,
        &query,
        Some("page-two"),
        serde_json::json!([common::drive_file("file-2", "two.pdf", "application/pdf")]),
        None,
    )
    .await;

    let first = source.list_children(&root(), None).await.unwrap();
    assert_eq!(first.entries[0].name, "one.pdf");
    assert_eq!(first.next_page_token.as_deref(), Some("page-two"));

    let second = source
        .list_children(&root(), first.next_page_token.as_deref())
        .await
        .unwrap();
    assert_eq!(second.entries[0].name, "two.pdf");
    assert!(second.next_page_token.is_none());
}

#[tokio::test]
async fn test_list_requests_fields_and_page_size() {
    let server = MockServer::start().await;
    let source = DriveSource::new(
        DriveClient::with_base_url("test-access-token", server.uri()).with_page_size(250),
    );

    Mock::given(method("GET"))
        .and(path("/files"))
        .and(query_param("fields", "nextPageToken,files(id,name,mimeType,parents)"))
        .and(query_param("pageSize", "250"))
        .and(query_param("supportsAllDrives", "true"))
        .and(query_param("includeItemsFromAllDrives", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "files": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let page = source.list_children(&root(), None).await.unwrap();
    assert!(page.entries.is_empty());
}

#[tokio::test]
async fn test_find_folders_escapes_name() {
    let (server, source) = common::setup_drive_mock(1024).await;

    common::mount_list_page(
        &server,
        "name = 'Bob\\'s Reports' and mimeType = 'application/vnd.google-apps.folder' and trashed = false",
        None,
        serde_json::json!([common::drive_file("folder-9", "Bob's Reports", FOLDER_MIME_TYPE)]),
        None,
    )
    .await;

    let page = source.find_folders("Bob's Reports", None).await.unwrap();
    assert_eq!(page.entries.len(), 1);
    assert_eq!(page.entries[0].id.as_str(), "folder-9");
    assert_eq!(
        folder_query("Bob's Reports"),
        "name = 'Bob\\'s Reports' and mimeType = 'application/vnd.google-apps.folder' and trashed = false"
    );
}

#[tokio::test]
async fn test_listing_error_status() {
    let (server, source) = common::setup_drive_mock(1024).await;

    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": { "code": 404, "message": "File not found: root-folder." }
        })))
        .mount(&server)
        .await;

    let err = source.list_children(&root(), None).await.unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("Failed to list children of root-folder"), "{message}");
    assert!(message.contains("File not found: root-folder."), "{message}");
}
