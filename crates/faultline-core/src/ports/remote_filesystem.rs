//! Remote filesystem and credential ports (driven/secondary ports)
//!
//! Interfaces used by the cloud filesystem connector: a credential store
//! that maps a user to a cached OAuth access token, and a factory for
//! opening a remote filesystem rooted at a given path.
//!
//! ## Design Notes
//!
//! - `open` distinguishes "root not found" from other failures so that the
//!   connector can create the missing root and retry; everything else maps
//!   to a redirect-required error at the connector level.
//! - The filesystem handle is deliberately small: the connector only needs
//!   enough surface to verify and create the requested root.

use thiserror::Error;

/// Errors surfaced by remote filesystem adapters
#[derive(Debug, Error)]
pub enum RemoteFsError {
    /// The requested root path does not exist on the remote side
    #[error("Remote path not found: {0}")]
    RootNotFound(String),

    /// Any other adapter failure (auth, transport, protocol)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Port trait for a cached OAuth credential lookup
#[async_trait::async_trait]
pub trait ICredentialStore: Send + Sync {
    /// Returns the cached access token for `user`, or `None` when the user
    /// has not completed the authorization flow.
    async fn access_token(&self, user: &str) -> anyhow::Result<Option<String>>;
}

/// Port trait for an opened remote filesystem
#[async_trait::async_trait]
pub trait IRemoteFilesystem: Send + Sync {
    /// Verifies the filesystem is reachable (account metadata query).
    async fn about(&self) -> Result<(), RemoteFsError>;

    /// Creates `path` (relative to this filesystem's root), including
    /// missing parents.
    async fn make_dir_recursive(&self, path: &str) -> Result<(), RemoteFsError>;
}

/// Port trait for constructing remote filesystem handles
#[async_trait::async_trait]
pub trait IRemoteFsFactory: Send + Sync {
    type Fs: IRemoteFilesystem;

    /// Opens a filesystem rooted at `root` using `access_token`.
    ///
    /// # Errors
    /// `RemoteFsError::RootNotFound` when `root` does not exist; any other
    /// failure as `RemoteFsError::Other`.
    async fn open(&self, root: &str, access_token: &str) -> Result<Self::Fs, RemoteFsError>;
}
