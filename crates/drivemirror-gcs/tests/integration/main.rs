//! Integration tests for drivemirror-gcs
//!
//! Uses wiremock to simulate the Cloud Storage JSON API and verifies
//! bucket checks, object checks and uploads through `GcsObjectStore`.

mod common;

mod test_store;
