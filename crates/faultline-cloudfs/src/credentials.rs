//! OAuth credentials for the remote filesystem
//!
//! Access tokens are cached in the system keyring (GNOME Keyring, KDE
//! Wallet, macOS Keychain) keyed by user. Token acquisition itself happens
//! out of band: the connector only hands out the authorization URL and
//! expects the completed token to be stored here.

use anyhow::{Context, Result};
use faultline_core::ports::ICredentialStore;
use oauth2::{basic::BasicClient, AuthUrl, ClientId, CsrfToken, RedirectUrl, Scope};
use tracing::debug;

/// Default keyring service name
const KEYRING_SERVICE: &str = "faultline-cloudfs";

/// Scopes requested during authorization
const DEFAULT_SCOPES: &[&str] = &["files.metadata.read", "files.content.write"];

/// Builds the URL a user must visit to authorize the application.
///
/// # Arguments
/// * `app_id` - OAuth application (client) ID
/// * `authorize_endpoint` - The provider's authorization endpoint
/// * `redirect_uri` - Where the provider redirects after consent
pub fn authorization_url(
    app_id: &str,
    authorize_endpoint: &str,
    redirect_uri: &str,
) -> Result<String> {
    let client = BasicClient::new(ClientId::new(app_id.to_string()))
        .set_auth_uri(
            AuthUrl::new(authorize_endpoint.to_string())
                .context("Invalid authorization endpoint")?,
        )
        .set_redirect_uri(
            RedirectUrl::new(redirect_uri.to_string()).context("Invalid redirect URI")?,
        );

    let mut request = client.authorize_url(CsrfToken::new_random);
    for scope in DEFAULT_SCOPES {
        request = request.add_scope(Scope::new(scope.to_string()));
    }
    let (url, _csrf_token) = request.url();

    debug!("Generated authorization URL");
    Ok(url.to_string())
}

/// Access token cache backed by the system keyring.
pub struct KeyringCredentialStore {
    service: String,
}

impl Default for KeyringCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringCredentialStore {
    pub fn new() -> Self {
        Self {
            service: KEYRING_SERVICE.to_string(),
        }
    }

    /// Uses a non-default keyring service name (test isolation).
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Stores an access token for `user`.
    pub fn store(&self, user: &str, access_token: &str) -> Result<()> {
        let entry = keyring::Entry::new(&self.service, user)
            .context("Failed to create keyring entry")?;
        entry
            .set_password(access_token)
            .context("Failed to store access token in keyring")?;
        debug!("Stored access token for user: {}", user);
        Ok(())
    }

    /// Removes the cached token for `user`, if any.
    pub fn clear(&self, user: &str) -> Result<()> {
        let entry = keyring::Entry::new(&self.service, user)
            .context("Failed to create keyring entry")?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(anyhow::Error::new(e).context("Failed to delete from keyring")),
        }
    }
}

#[async_trait::async_trait]
impl ICredentialStore for KeyringCredentialStore {
    async fn access_token(&self, user: &str) -> Result<Option<String>> {
        let entry = keyring::Entry::new(&self.service, user)
            .context("Failed to create keyring entry")?;

        match entry.get_password() {
            Ok(token) => {
                debug!("Found cached access token for user: {}", user);
                Ok(Some(token))
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No cached access token for user: {}", user);
                Ok(None)
            }
            Err(e) => Err(anyhow::Error::new(e).context("Failed to read from keyring")),
        }
    }
}
