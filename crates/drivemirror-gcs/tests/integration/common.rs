//! Shared test helpers for Cloud Storage integration tests

#![allow(dead_code)]

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use drivemirror_core::domain::{BucketName, DestinationPath};
use drivemirror_gcs::client::GcsClient;
use drivemirror_gcs::store::GcsObjectStore;

/// Starts a mock server and returns it with a store pointing at it.
pub async fn setup_gcs_mock() -> (MockServer, GcsObjectStore) {
    let server = MockServer::start().await;
    let client = GcsClient::with_base_url("test-access-token", server.uri());
    (server, GcsObjectStore::new(client))
}

pub fn bucket(name: &str) -> BucketName {
    BucketName::new(name.to_string()).unwrap()
}

pub fn object_path(path: &str) -> DestinationPath {
    DestinationPath::new(path)
}

/// Mounts `GET /storage/v1/b/{bucket}` answering with `status`.
pub async fn mount_bucket(server: &MockServer, bucket: &str, status: u16) {
    let body = if status == 200 {
        serde_json::json!({ "kind": "storage#bucket", "name": bucket })
    } else {
        serde_json::json!({ "error": { "code": status, "message": "The specified bucket does not exist." } })
    };
    Mock::given(method("GET"))
        .and(path(format!("/storage/v1/b/{bucket}")))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}
