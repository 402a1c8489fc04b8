//! Integration tests for GcsObjectStore

use drivemirror_core::ports::IObjectStore;
use wiremock::matchers::{body_bytes, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{self, bucket, object_path};

#[tokio::test]
async fn test_bucket_exists() {
    let (server, store) = common::setup_gcs_mock().await;
    common::mount_bucket(&server, "present-bucket", 200).await;

    assert!(store.bucket_exists(&bucket("present-bucket")).await.unwrap());
}

#[tokio::test]
async fn test_bucket_missing() {
    let (server, store) = common::setup_gcs_mock().await;
    common::mount_bucket(&server, "missing-bucket", 404).await;

    assert!(!store.bucket_exists(&bucket("missing-bucket")).await.unwrap());
}

#[tokio::test]
async fn test_bucket_check_forbidden_is_error() {
    let (server, store) = common::setup_gcs_mock().await;

    Mock::given(method("GET"))
        .and(path("/storage/v1/b/private-bucket"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": { "code": 403, "message": "caller does not have storage.buckets.get access" }
        })))
        .mount(&server)
        .await;

    let err = store
        .bucket_exists(&bucket("private-bucket"))
        .await
        .unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("Failed to check bucket private-bucket"), "{message}");
    assert!(message.contains("storage.buckets.get"), "{message}");
}

#[tokio::test]
async fn test_object_exists_encodes_name() {
    let (server, store) = common::setup_gcs_mock().await;

    Mock::given(method("GET"))
        .and(path("/storage/v1/b/backup-bucket/o/c%2Fd.png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "kind": "storage#object",
            "name": "c/d.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(store
        .object_exists(&bucket("backup-bucket"), &object_path("c/d.png"))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_object_missing() {
    let (server, store) = common::setup_gcs_mock().await;

    Mock::given(method("GET"))
        .and(path("/storage/v1/b/backup-bucket/o/a.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(!store
        .object_exists(&bucket("backup-bucket"), &object_path("a.pdf"))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_put_object_uploads_media() {
    let (server, store) = common::setup_gcs_mock().await;

    Mock::given(method("POST"))
        .and(path("/upload/storage/v1/b/backup-bucket/o"))
        .and(query_param("uploadType", "media"))
        .and(query_param("name", "reports/b.gdoc"))
        .and(header(
            "content-type",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ))
        .and(header("authorization", "Bearer test-access-token"))
        .and(body_bytes(b"PK docx".to_vec()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "kind": "storage#object",
            "name": "reports/b.gdoc",
            "size": "7"
        })))
        .expect(1)
        .mount(&server)
        .await;

    store
        .put_object(
            &bucket("backup-bucket"),
            &object_path("reports/b.gdoc"),
            b"PK docx".to_vec(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        )
        .await
        .expect("upload failed");
}

#[tokio::test]
async fn test_put_object_error_status() {
    let (server, store) = common::setup_gcs_mock().await;

    Mock::given(method("POST"))
        .and(path("/upload/storage/v1/b/backup-bucket/o"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": { "code": 403, "message": "caller does not have storage.objects.create access" }
        })))
        .mount(&server)
        .await;

    let err = store
        .put_object(
            &bucket("backup-bucket"),
            &object_path("a.pdf"),
            b"%PDF".to_vec(),
            "application/pdf",
        )
        .await
        .unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("gs://backup-bucket/a.pdf"), "{message}");
    assert!(message.contains("Forbidden"), "{message}");
}
