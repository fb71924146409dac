//! Shared test helpers for remote filesystem integration tests
//!
//! Provides wiremock-based mock server setup for the Dropbox-style API
//! surface (`/about`, `/metadata/<path>`, `/mkdir`).

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use faultline_cloudfs::HttpRemoteFsFactory;
use faultline_core::config::CloudFsConfig;

/// Starts a mock server with a working `/about` endpoint and returns it
/// together with a factory pointed at it.
pub async fn setup_remote_fs_mock() -> (MockServer, HttpRemoteFsFactory) {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "account": "test@example.com",
            "quota_total": 5368709120_u64,
            "quota_used": 1073741824_u64
        })))
        .mount(&server)
        .await;

    let factory = HttpRemoteFsFactory::new(&server.uri()).unwrap();
    (server, factory)
}

/// Mounts a metadata endpoint that reports `remote_path` as existing.
pub async fn mount_metadata_exists(server: &MockServer, remote_path: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/metadata{}", remote_path)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "path": remote_path,
            "is_dir": true
        })))
        .mount(server)
        .await;
}

/// Mounts a metadata endpoint that reports `remote_path` as missing.
pub async fn mount_metadata_missing(server: &MockServer, remote_path: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/metadata{}", remote_path)))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

/// Mounts a mkdir endpoint expecting a recursive create of `remote_path`.
pub async fn mount_mkdir(server: &MockServer, remote_path: &str) {
    Mock::given(method("POST"))
        .and(path("/mkdir"))
        .and(body_partial_json(serde_json::json!({
            "path": remote_path,
            "recursive": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "path": remote_path,
            "is_dir": true
        })))
        .mount(server)
        .await;
}

/// Connector configuration pointing at the mock server.
pub fn cloudfs_config(server: &MockServer) -> CloudFsConfig {
    CloudFsConfig {
        app_id: Some("test-app-id".to_string()),
        redirect_uri: "http://127.0.0.1:8400/callback".to_string(),
        api_base: server.uri(),
    }
}
