//! HTTP remote filesystem adapter
//!
//! Speaks a small Dropbox-style REST surface:
//!
//! - `GET  /about`            - account/quota metadata, used as a liveness probe
//! - `GET  /metadata/<path>`  - stat a path; 404 means it does not exist
//! - `POST /mkdir`            - create a directory, parents included
//!
//! All requests carry the access token as a bearer header. A 404 on the
//! root stat maps to `RemoteFsError::RootNotFound` so the connector can
//! bootstrap the directory; everything else is opaque to callers.

use anyhow::{anyhow, Context};
use faultline_core::ports::{IRemoteFilesystem, IRemoteFsFactory, RemoteFsError};
use serde::Serialize;
use tracing::debug;
use url::Url;

#[derive(Serialize)]
struct MkdirRequest<'a> {
    path: &'a str,
    recursive: bool,
}

/// Joins a filesystem root and a relative path into one absolute remote path.
fn join_remote_path(root: &str, path: &str) -> String {
    let root = root.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        if root.is_empty() {
            "/".to_string()
        } else {
            root.to_string()
        }
    } else {
        format!("{}/{}", root, path)
    }
}

/// An opened remote filesystem rooted at a fixed path.
#[derive(Debug)]
pub struct HttpRemoteFs {
    client: reqwest::Client,
    api_base: Url,
    access_token: String,
    root: String,
}

impl HttpRemoteFs {
    /// The root path this handle was opened at.
    pub fn root(&self) -> &str {
        &self.root
    }

    async fn stat(&self, remote_path: &str) -> Result<(), RemoteFsError> {
        let url = self
            .api_base
            .join(&format!("metadata{}", remote_path))
            .context("Invalid metadata URL")?;

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .context("Metadata request failed")?;

        match response.status() {
            status if status.is_success() => Ok(()),
            reqwest::StatusCode::NOT_FOUND => {
                Err(RemoteFsError::RootNotFound(remote_path.to_string()))
            }
            status => Err(RemoteFsError::Other(anyhow!(
                "Metadata query for {} failed with status {}",
                remote_path,
                status
            ))),
        }
    }
}

#[async_trait::async_trait]
impl IRemoteFilesystem for HttpRemoteFs {
    async fn about(&self) -> Result<(), RemoteFsError> {
        let url = self.api_base.join("about").context("Invalid about URL")?;

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .context("About request failed")?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(RemoteFsError::Other(anyhow!(
                "About query failed with status {}",
                response.status()
            )))
        }
    }

    async fn make_dir_recursive(&self, path: &str) -> Result<(), RemoteFsError> {
        let remote_path = join_remote_path(&self.root, path);
        let url = self.api_base.join("mkdir").context("Invalid mkdir URL")?;

        debug!("Creating remote directory: {}", remote_path);
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&MkdirRequest {
                path: &remote_path,
                recursive: true,
            })
            .send()
            .await
            .context("Mkdir request failed")?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(RemoteFsError::Other(anyhow!(
                "Mkdir for {} failed with status {}",
                remote_path,
                response.status()
            )))
        }
    }
}

/// Factory that opens [`HttpRemoteFs`] handles against one API base URL.
pub struct HttpRemoteFsFactory {
    client: reqwest::Client,
    api_base: Url,
}

impl HttpRemoteFsFactory {
    /// Creates a factory for `api_base` (e.g. `https://api.example.com/2/`).
    ///
    /// A trailing slash is enforced so endpoint joins resolve under the
    /// base path instead of replacing it.
    pub fn new(api_base: &str) -> anyhow::Result<Self> {
        let normalized = if api_base.ends_with('/') {
            api_base.to_string()
        } else {
            format!("{}/", api_base)
        };
        let api_base = Url::parse(&normalized).context("Invalid API base URL")?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_base,
        })
    }
}

#[async_trait::async_trait]
impl IRemoteFsFactory for HttpRemoteFsFactory {
    type Fs = HttpRemoteFs;

    async fn open(&self, root: &str, access_token: &str) -> Result<HttpRemoteFs, RemoteFsError> {
        let root = if root.starts_with('/') {
            root.to_string()
        } else {
            format!("/{}", root)
        };

        let fs = HttpRemoteFs {
            client: self.client.clone(),
            api_base: self.api_base.clone(),
            access_token: access_token.to_string(),
            root: root.clone(),
        };

        // "/" always exists; anything else must stat cleanly before use.
        if root != "/" {
            fs.stat(&root).await?;
        }

        debug!("Opened remote filesystem at {}", root);
        Ok(fs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_remote_path() {
        assert_eq!(join_remote_path("/", "reports"), "/reports");
        assert_eq!(join_remote_path("/apps/faultline", "reports"), "/apps/faultline/reports");
        assert_eq!(join_remote_path("/", "/apps/faultline"), "/apps/faultline");
        assert_eq!(join_remote_path("/apps", ""), "/apps");
        assert_eq!(join_remote_path("/", ""), "/");
    }

    #[test]
    fn test_factory_normalizes_base_url() {
        let factory = HttpRemoteFsFactory::new("https://api.example.com/2").unwrap();
        assert_eq!(factory.api_base.as_str(), "https://api.example.com/2/");

        assert!(HttpRemoteFsFactory::new("not a url").is_err());
    }
}
