//! Faultline CloudFS - Remote filesystem connector
//!
//! Builds authenticated remote filesystem handles for storing diagnostic
//! data off-host. The connector resolves a cached OAuth token, opens the
//! filesystem at the configured root, and creates the root on first use.
//! When no usable token exists, callers get a `RedirectRequired` error
//! carrying the authorization URL to send the user to.
//!
//! ## Components
//!
//! - [`RemoteFsConnector`] - Token resolution and root bootstrap state machine
//! - [`KeyringCredentialStore`] - Cached access tokens in the system keyring
//! - [`HttpRemoteFs`] / [`HttpRemoteFsFactory`] - HTTP adapter for a
//!   Dropbox-style remote filesystem API

pub mod client;
pub mod credentials;
pub mod factory;

pub use client::{HttpRemoteFs, HttpRemoteFsFactory};
pub use credentials::{authorization_url, KeyringCredentialStore};
pub use factory::{CloudFsError, RemoteFsConnector};
