//! Session bootstrap for the device client
//!
//! Interactive flow: open the authorization page in the system browser, wait
//! for the loopback callback, exchange the code through the backend, and
//! persist both token and user record. On startup the persisted pair is
//! restored without any network call.

use tracing::{info, warn};

use bonfire_api::{ApiClient, User};

use crate::{
    authorize::{authorize_url, ProviderConfig},
    error::{AuthError, AuthResult},
    server::CallbackServer,
    session::Session,
    store::{PersistedSession, SessionStore},
};

/// Auth bootstrap for the device client
pub struct DeviceSession {
    api: ApiClient,
    store: SessionStore,
    provider: ProviderConfig,
    callback_port: Option<u16>,
    session: Option<Session>,
}

impl DeviceSession {
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self {
            api,
            store,
            provider: ProviderConfig::default(),
            callback_port: None,
            session: None,
        }
    }

    /// Override the provider settings (client id, scope)
    pub fn with_provider(mut self, provider: ProviderConfig) -> Self {
        self.provider = provider;
        self
    }

    /// Override the loopback callback port
    pub fn with_callback_port(mut self, port: u16) -> Self {
        self.callback_port = Some(port);
        self
    }

    /// The signed-in user, if any
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// The bearer token of the current session, if any
    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Restore a previously persisted session.
    ///
    /// Both the token and the user record must be present; anything else is
    /// treated as signed out. Returns whether a session was restored.
    pub async fn restore(&mut self) -> AuthResult<bool> {
        match self.store.load().await {
            Ok(Some(PersistedSession {
                token,
                user: Some(user),
            })) => {
                info!("Restored session for {}", user.login);
                self.session = Some(Session { token, user });
                Ok(true)
            }
            Ok(_) => Ok(false),
            Err(e) => {
                warn!("Could not restore session: {}", e);
                Ok(false)
            }
        }
    }

    /// Run the interactive sign-in flow.
    ///
    /// Opens the browser, waits for the callback, exchanges the code, and
    /// persists the session. On any failure the state stays signed out and
    /// nothing new is persisted. No retry.
    pub async fn sign_in(&mut self) -> AuthResult<&User> {
        let auth_url = authorize_url(&self.provider)?;
        info!("Opening browser for authorization: {}", auth_url);

        open::that(&auth_url).map_err(|e| {
            AuthError::BrowserOpen(format!(
                "Could not open browser. Please manually visit: {} ({})",
                auth_url, e
            ))
        })?;

        let server = match self.callback_port {
            Some(port) => CallbackServer::with_port(port),
            None => CallbackServer::new(),
        };
        let code = server.wait_for_callback().await?;

        self.sign_in_with_code(&code).await
    }

    /// Exchange an authorization code and persist the resulting session
    pub async fn sign_in_with_code(&mut self, code: &str) -> AuthResult<&User> {
        let response = self.api.authenticate(code).await?;

        self.store
            .save(&PersistedSession {
                token: response.token.clone(),
                user: Some(response.user.clone()),
            })
            .await?;

        let session = self.session.insert(Session {
            token: response.token,
            user: response.user,
        });

        info!("Signed in as {}", session.user.login);
        Ok(&session.user)
    }

    /// Clear the in-memory session and delete persisted entries.
    ///
    /// Purely local; no server-side call.
    pub async fn sign_out(&mut self) -> AuthResult<()> {
        self.session = None;
        self.store.clear().await?;
        info!("Signed out");
        Ok(())
    }
}
