//! Shared test helpers for Drive API integration tests
//!
//! Provides wiremock-based mock server setup for Drive v3 endpoints.
//! Each helper mounts the necessary mock endpoints on a server returned
//! by [`setup_drive_mock`].

#![allow(dead_code)]

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use drivemirror_drive::client::DriveClient;
use drivemirror_drive::provider::DriveSource;

/// Starts a mock server and returns it with a DriveSource pointing at it.
///
/// The client uses a small chunk size so multi-chunk downloads stay short.
pub async fn setup_drive_mock(chunk_size: u64) -> (MockServer, DriveSource) {
    let server = MockServer::start().await;
    let client = DriveClient::with_base_url("test-access-token", server.uri())
        .with_chunk_size(chunk_size);
    (server, DriveSource::new(client))
}

/// Builds a `files` array entry.
pub fn drive_file(id: &str, name: &str, mime_type: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "mimeType": mime_type,
        "parents": ["root-folder"]
    })
}

/// Mounts one page of a `files.list` response for `query`.
///
/// `page_token` selects which request this page answers (None for the
/// first page); `next_page_token` is returned to the client.
pub async fn mount_list_page(
    server: &MockServer,
    query: &str,
    page_token: Option<&str>,
    files: serde_json::Value,
    next_page_token: Option<&str>,
) {
    let mut body = serde_json::json!({ "files": files });
    if let Some(next) = next_page_token {
        body["nextPageToken"] = serde_json::json!(next);
    }

    let mock = Mock::given(method("GET"))
        .and(path("/files"))
        .and(query_param("q", query))
        .and(header("authorization", "Bearer test-access-token"));

    match page_token {
        Some(token) => {
            mock.and(query_param("pageToken", token))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .mount(server)
                .await
        }
        None => {
            // First page: lower priority so token-specific mocks win
            mock.respond_with(ResponseTemplate::new(200).set_body_json(body))
                .with_priority(10)
                .mount(server)
                .await
        }
    }
}

/// Mounts ranged media responses serving `content` in `chunk_size` pieces.
pub async fn mount_media_chunks(server: &MockServer, file_id: &str, content: &[u8], chunk_size: usize) {
    let total = content.len();
    let mut start = 0;
    while start < total {
        let end = (start + chunk_size).min(total);
        let requested_end = start + chunk_size - 1;
        Mock::given(method("GET"))
            .and(path(format!("/files/{file_id}")))
            .and(query_param("alt", "media"))
            .and(header("range", format!("bytes={start}-{requested_end}").as_str()))
            .respond_with(
                ResponseTemplate::new(206)
                    .set_body_bytes(content[start..end].to_vec())
                    .append_header(
                        "Content-Range",
                        format!("bytes {}-{}/{}", start, end - 1, total).as_str(),
                    ),
            )
            .expect(1)
            .mount(server)
            .await;
        start = end;
    }
}

/// Mounts a media endpoint that answers every request with `status`.
pub async fn mount_media_status(server: &MockServer, file_id: &str, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/files/{file_id}")))
        .and(query_param("alt", "media"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Mounts an export endpoint returning `content` for `mime_type`.
pub async fn mount_export(server: &MockServer, file_id: &str, mime_type: &str, content: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/files/{file_id}/export")))
        .and(query_param("mimeType", mime_type))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(content.to_vec())
                .append_header("Content-Type", mime_type),
        )
        .mount(server)
        .await;
}
