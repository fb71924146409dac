//! Remote filesystem connector
//!
//! The build state machine:
//!
//! 1. No cached token for the user -> `RedirectRequired` with the
//!    authorization URL.
//! 2. Token present, root opens -> done.
//! 3. Token present, root missing -> open `/`, create the root recursively,
//!    reopen at the root.
//! 4. Any other failure with a token -> `RedirectRequired`; a stale or
//!    revoked token is indistinguishable from never having authorized.

use anyhow::anyhow;
use faultline_core::config::CloudFsConfig;
use faultline_core::ports::{ICredentialStore, IRemoteFilesystem, IRemoteFsFactory, RemoteFsError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::credentials::authorization_url;

/// Errors from building a remote filesystem handle.
#[derive(Debug, Error)]
pub enum CloudFsError {
    /// The user must (re)authorize the application at `url`.
    #[error("Authorization required, visit: {url}")]
    RedirectRequired { url: String },

    /// Construction failed for a reason re-authorization cannot fix.
    #[error("Failed to build remote filesystem: {0}")]
    Build(#[from] anyhow::Error),
}

/// Builds authenticated, root-verified remote filesystem handles.
pub struct RemoteFsConnector<C, F> {
    credentials: C,
    factory: F,
    config: CloudFsConfig,
}

impl<C, F> RemoteFsConnector<C, F>
where
    C: ICredentialStore,
    F: IRemoteFsFactory,
{
    pub fn new(credentials: C, factory: F, config: CloudFsConfig) -> Self {
        Self {
            credentials,
            factory,
            config,
        }
    }

    /// The URL a user must visit to authorize the application.
    ///
    /// # Errors
    /// `CloudFsError::Build` when no `app_id` is configured or the endpoint
    /// configuration is malformed.
    pub fn authorization_url(&self) -> Result<String, CloudFsError> {
        let app_id = self
            .config
            .app_id
            .as_deref()
            .ok_or_else(|| anyhow!("cloudfs app_id is not configured"))?;
        let authorize_endpoint = format!(
            "{}/oauth2/authorize",
            self.config.api_base.trim_end_matches('/')
        );
        Ok(authorization_url(
            app_id,
            &authorize_endpoint,
            &self.config.redirect_uri,
        )?)
    }

    /// Opens the remote filesystem at `root` for `user`, creating the root
    /// directory on first use.
    pub async fn build_fs(&self, user: &str, root: &str) -> Result<F::Fs, CloudFsError> {
        let token = match self.credentials.access_token(user).await? {
            Some(token) => token,
            None => {
                info!("No cached token for user {}, authorization required", user);
                return Err(self.redirect_required()?);
            }
        };

        match self.factory.open(root, &token).await {
            Ok(fs) => {
                debug!("Opened remote filesystem at {} for user {}", root, user);
                Ok(fs)
            }
            Err(RemoteFsError::RootNotFound(_)) => {
                info!("Remote root {} missing, creating it", root);
                self.bootstrap_root(root, &token).await
            }
            Err(RemoteFsError::Other(err)) => {
                warn!("Remote filesystem open failed for user {}: {}", user, err);
                Err(self.redirect_required()?)
            }
        }
    }

    /// Creates the missing root from `/` and reopens at it. Failures here
    /// also surface as redirect errors.
    async fn bootstrap_root(&self, root: &str, token: &str) -> Result<F::Fs, CloudFsError> {
        let result: Result<F::Fs, RemoteFsError> = async {
            let top = self.factory.open("/", token).await?;
            top.make_dir_recursive(root).await?;
            self.factory.open(root, token).await
        }
        .await;

        match result {
            Ok(fs) => Ok(fs),
            Err(err) => {
                warn!("Failed to create remote root {}: {}", root, err);
                Err(self.redirect_required()?)
            }
        }
    }

    fn redirect_required(&self) -> Result<CloudFsError, CloudFsError> {
        Ok(CloudFsError::RedirectRequired {
            url: self.authorization_url()?,
        })
    }
}
