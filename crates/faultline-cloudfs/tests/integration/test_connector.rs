//! Connector bootstrap flow against a mocked remote filesystem API

use faultline_cloudfs::{CloudFsError, RemoteFsConnector};
use faultline_core::ports::ICredentialStore;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{
    cloudfs_config, mount_metadata_exists, mount_mkdir, setup_remote_fs_mock,
};

struct FixedCredentials(Option<String>);

#[async_trait::async_trait]
impl ICredentialStore for FixedCredentials {
    async fn access_token(&self, _user: &str) -> anyhow::Result<Option<String>> {
        Ok(self.0.clone())
    }
}

#[tokio::test]
async fn test_build_fs_with_existing_root() {
    let (server, factory) = setup_remote_fs_mock().await;
    mount_metadata_exists(&server, "/apps/faultline").await;

    let connector = RemoteFsConnector::new(
        FixedCredentials(Some("token".to_string())),
        factory,
        cloudfs_config(&server),
    );

    let fs = connector.build_fs("alice", "/apps/faultline").await.unwrap();
    assert_eq!(fs.root(), "/apps/faultline");
}

#[tokio::test]
async fn test_build_fs_creates_missing_root() {
    let (server, factory) = setup_remote_fs_mock().await;

    // First stat: missing. After the mkdir, the reopen stat succeeds.
    Mock::given(method("GET"))
        .and(path("/metadata/apps/faultline"))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_mkdir(&server, "/apps/faultline").await;
    mount_metadata_exists(&server, "/apps/faultline").await;

    let connector = RemoteFsConnector::new(
        FixedCredentials(Some("token".to_string())),
        factory,
        cloudfs_config(&server),
    );

    let fs = connector.build_fs("alice", "/apps/faultline").await.unwrap();
    assert_eq!(fs.root(), "/apps/faultline");
}

#[tokio::test]
async fn test_build_fs_without_token_redirects() {
    let (server, factory) = setup_remote_fs_mock().await;

    let connector = RemoteFsConnector::new(
        FixedCredentials(None),
        factory,
        cloudfs_config(&server),
    );

    let err = connector.build_fs("alice", "/apps/faultline").await.unwrap_err();
    match err {
        CloudFsError::RedirectRequired { url } => {
            assert!(url.contains("client_id=test-app-id"));
            assert!(url.contains("oauth2/authorize"));
        }
        other => panic!("expected RedirectRequired, got {:?}", other),
    }
}

#[tokio::test]
async fn test_build_fs_with_rejected_token_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/metadata/apps/faultline"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let factory = faultline_cloudfs::HttpRemoteFsFactory::new(&server.uri()).unwrap();
    let connector = RemoteFsConnector::new(
        FixedCredentials(Some("stale-token".to_string())),
        factory,
        cloudfs_config(&server),
    );

    let err = connector.build_fs("alice", "/apps/faultline").await.unwrap_err();
    assert!(matches!(err, CloudFsError::RedirectRequired { .. }));
}
