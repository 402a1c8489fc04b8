//! Integration tests for chunked downloads and exports
//!
//! Verifies ranged media downloads across several chunks, whole-body
//! responses, empty files, exports and error statuses.

use drivemirror_core::domain::mime::DOCX_MIME_TYPE;
use drivemirror_core::domain::RemoteId;
use drivemirror_core::ports::{DownloadChunk, DownloadKind, IChunkedDownload, IDriveSource};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

fn file_id(id: &str) -> RemoteId {
    RemoteId::new(id.to_string()).unwrap()
}

async fn drain(download: &mut Box<dyn IChunkedDownload>) -> Vec<DownloadChunk> {
    let mut chunks = Vec::new();
    loop {
        let chunk = download.next_chunk().await.expect("chunk failed");
        let done = chunk.done;
        chunks.push(chunk);
        if done {
            return chunks;
        }
    }
}

#[tokio::test]
async fn test_media_download_in_chunks() {
    let (server, source) = common::setup_drive_mock(10).await;
    let content: Vec<u8> = (0u8..25).collect();
    common::mount_media_chunks(&server, "file-1", &content, 10).await;

    let mut download = source
        .open_download(&file_id("file-1"), &DownloadKind::Media)
        .await
        .unwrap();
    let chunks = drain(&mut download).await;

    assert_eq!(chunks.len(), 3);
    let progress: Vec<f64> = chunks.iter().map(|c| c.progress).collect();
    assert_eq!(progress, vec![0.4, 0.8, 1.0]);
    let data: Vec<u8> = chunks.into_iter().flat_map(|c| c.data).collect();
    assert_eq!(data, content);
}

#[tokio::test]
async fn test_media_download_exact_multiple_of_chunk() {
    let (server, source) = common::setup_drive_mock(4).await;
    let content = b"abcdefgh".to_vec();
    common::mount_media_chunks(&server, "file-2", &content, 4).await;

    let mut download = source
        .open_download(&file_id("file-2"), &DownloadKind::Media)
        .await
        .unwrap();
    let chunks = drain(&mut download).await;

    assert_eq!(chunks.len(), 2);
    assert!(chunks[1].done);
    assert_eq!(chunks[1].progress, 1.0);
}

#[tokio::test]
async fn test_unknown_total_ends_on_range_past_eof() {
    let (server, source) = common::setup_drive_mock(4).await;

    for (range, body, content_range) in [
        ("bytes=0-3", b"abcd", "bytes 0-3/*"),
        ("bytes=4-7", b"efgh", "bytes 4-7/*"),
    ] {
        Mock::given(method("GET"))
            .and(path("/files/file-4"))
            .and(query_param("alt", "media"))
            .and(header("range", range))
            .respond_with(
                ResponseTemplate::new(206)
                    .set_body_bytes(body.to_vec())
                    .append_header("Content-Range", content_range),
            )
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/files/file-4"))
        .and(query_param("alt", "media"))
        .and(header("range", "bytes=8-11"))
        .respond_with(ResponseTemplate::new(416))
        .expect(1)
        .mount(&server)
        .await;

    let mut download = source
        .open_download(&file_id("file-4"), &DownloadKind::Media)
        .await
        .unwrap();
    let chunks = drain(&mut download).await;

    assert_eq!(chunks.len(), 3);
    assert!(!chunks[1].done);
    assert!(chunks[2].done);
    assert!(chunks[2].data.is_empty());
    assert_eq!(chunks[2].progress, 1.0);
    let data: Vec<u8> = chunks.into_iter().flat_map(|c| c.data).collect();
    assert_eq!(data, b"abcdefgh");
}

#[tokio::test]
async fn test_range_past_eof_with_known_total_fails() {
    let (server, source) = common::setup_drive_mock(4).await;

    Mock::given(method("GET"))
        .and(path("/files/file-5"))
        .and(header("range", "bytes=0-3"))
        .respond_with(
            ResponseTemplate::new(206)
                .set_body_bytes(b"abcd".to_vec())
                .append_header("Content-Range", "bytes 0-3/10"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/file-5"))
        .and(header("range", "bytes=4-7"))
        .respond_with(ResponseTemplate::new(416))
        .mount(&server)
        .await;

    let mut download = source
        .open_download(&file_id("file-5"), &DownloadKind::Media)
        .await
        .unwrap();
    assert!(!download.next_chunk().await.unwrap().done);
    let err = download.next_chunk().await.unwrap_err();
    assert!(format!("{err:#}").contains("416"));
}

#[tokio::test]
async fn test_whole_body_response_completes() {
    let (server, source) = common::setup_drive_mock(4).await;

    Mock::given(method("GET"))
        .and(path("/files/file-3"))
        .and(query_param("alt", "media"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"whole body".to_vec()))
        .mount(&server)
        .await;

    let mut download = source
        .open_download(&file_id("file-3"), &DownloadKind::Media)
        .await
        .unwrap();
    let chunk = download.next_chunk().await.unwrap();

    assert!(chunk.done);
    assert_eq!(chunk.progress, 1.0);
    assert_eq!(chunk.data, b"whole body");
    assert!(download.next_chunk().await.is_err());
}

#[tokio::test]
async fn test_empty_file_range_not_satisfiable() {
    let (server, source) = common::setup_drive_mock(4).await;

    Mock::given(method("GET"))
        .and(path("/files/empty-file"))
        .respond_with(ResponseTemplate::new(416))
        .mount(&server)
        .await;

    let mut download = source
        .open_download(&file_id("empty-file"), &DownloadKind::Media)
        .await
        .unwrap();
    let chunk = download.next_chunk().await.unwrap();

    assert!(chunk.done);
    assert!(chunk.data.is_empty());
    assert_eq!(chunk.progress, 1.0);
}

#[tokio::test]
async fn test_export_download() {
    let (server, source) = common::setup_drive_mock(4).await;
    common::mount_export(&server, "doc-1", DOCX_MIME_TYPE, b"PK exported document").await;

    let mut download = source
        .open_download(
            &file_id("doc-1"),
            &DownloadKind::Export {
                mime_type: DOCX_MIME_TYPE.to_string(),
            },
        )
        .await
        .unwrap();
    let chunks = drain(&mut download).await;

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].data, b"PK exported document");
}

#[tokio::test]
async fn test_download_forbidden() {
    let (server, source) = common::setup_drive_mock(4).await;
    common::mount_media_status(
        &server,
        "locked",
        403,
        serde_json::json!({
            "error": { "code": 403, "message": "The user does not have sufficient permissions for this file." }
        }),
    )
    .await;

    let mut download = source
        .open_download(&file_id("locked"), &DownloadKind::Media)
        .await
        .unwrap();
    let err = download.next_chunk().await.unwrap_err();
    let message = format!("{err:#}");

    assert!(message.contains("403"), "{message}");
    assert!(message.contains("sufficient permissions"), "{message}");
}
