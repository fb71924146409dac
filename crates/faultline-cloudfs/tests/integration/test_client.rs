//! HTTP adapter tests against a mocked remote filesystem API

use faultline_core::ports::{IRemoteFilesystem, IRemoteFsFactory, RemoteFsError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{
    mount_metadata_exists, mount_metadata_missing, mount_mkdir, setup_remote_fs_mock,
};

#[tokio::test]
async fn test_open_existing_root() {
    let (server, factory) = setup_remote_fs_mock().await;
    mount_metadata_exists(&server, "/apps/faultline").await;

    let fs = factory.open("/apps/faultline", "token").await.unwrap();
    assert_eq!(fs.root(), "/apps/faultline");
    fs.about().await.unwrap();
}

#[tokio::test]
async fn test_open_missing_root_reports_not_found() {
    let (server, factory) = setup_remote_fs_mock().await;
    mount_metadata_missing(&server, "/apps/faultline").await;

    let err = factory.open("/apps/faultline", "token").await.unwrap_err();
    match err {
        RemoteFsError::RootNotFound(path) => assert_eq!(path, "/apps/faultline"),
        other => panic!("expected RootNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_open_at_top_level_skips_stat() {
    // No metadata mock mounted: "/" must open without a stat round trip.
    let (_server, factory) = setup_remote_fs_mock().await;
    let fs = factory.open("/", "token").await.unwrap();
    assert_eq!(fs.root(), "/");
}

#[tokio::test]
async fn test_make_dir_recursive_joins_root() {
    let (server, factory) = setup_remote_fs_mock().await;
    mount_mkdir(&server, "/apps/faultline/reports").await;

    let fs = factory.open("/", "token").await.unwrap();
    fs.make_dir_recursive("/apps/faultline/reports").await.unwrap();
}

#[tokio::test]
async fn test_server_error_is_not_root_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/metadata/apps/faultline"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let factory = faultline_cloudfs::HttpRemoteFsFactory::new(&server.uri()).unwrap();
    let err = factory.open("/apps/faultline", "token").await.unwrap_err();
    assert!(matches!(err, RemoteFsError::Other(_)));
}

#[tokio::test]
async fn test_mkdir_failure_propagates() {
    let (server, factory) = setup_remote_fs_mock().await;
    Mock::given(method("POST"))
        .and(path("/mkdir"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let fs = factory.open("/", "token").await.unwrap();
    let err = fs.make_dir_recursive("/apps/faultline").await.unwrap_err();
    assert!(matches!(err, RemoteFsError::Other(_)));
}
