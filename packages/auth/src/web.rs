//! Session bootstrap for the web client
//!
//! The authorization code arrives embedded in a request URL. The exchange
//! persists the token only; the user profile is re-fetched from the backend
//! on startup. After handling a callback the code is stripped from the
//! user-visible URL.

use tracing::{info, warn};
use url::Url;

use bonfire_api::{ApiClient, User};

use crate::{
    authorize::{authorize_url, ProviderConfig},
    error::{AuthError, AuthResult},
    session::Session,
    store::{PersistedSession, SessionStore},
};

/// Split an authorization code out of a callback URL.
///
/// Returns the URL with the `code` parameter removed plus the code itself,
/// or `None` when the URL carries no code. Other query parameters survive.
pub fn split_code(url: &str) -> Option<(String, String)> {
    let mut parsed = Url::parse(url).ok()?;

    let code = parsed
        .query_pairs()
        .find_map(|(k, v)| (k == "code").then(|| v.into_owned()))?;

    let rest: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(k, _)| k != "code")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    parsed.set_query(None);
    if !rest.is_empty() {
        parsed.query_pairs_mut().extend_pairs(rest);
    }

    Some((parsed.to_string(), code))
}

/// Whether a callback URL reports that the user denied access
pub fn access_denied(url: &str) -> bool {
    Url::parse(url)
        .map(|parsed| {
            parsed
                .query_pairs()
                .any(|(k, v)| k == "error" && v == "access_denied")
        })
        .unwrap_or(false)
}

/// Auth bootstrap for the web client
pub struct WebSession {
    api: ApiClient,
    store: SessionStore,
    provider: ProviderConfig,
    session: Option<Session>,
}

impl WebSession {
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self {
            api,
            store,
            provider: ProviderConfig::default(),
            session: None,
        }
    }

    /// Override the provider settings (client id, scope)
    pub fn with_provider(mut self, provider: ProviderConfig) -> Self {
        self.provider = provider;
        self
    }

    /// The static sign-in URL rendered by the client
    pub fn sign_in_url(&self) -> AuthResult<String> {
        authorize_url(&self.provider)
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

    /// Restore the session from the persisted token.
    ///
    /// Only the token is persisted, so the profile is re-fetched with it as
    /// bearer credential. A failed fetch degrades to signed out. Returns
    /// whether a session was restored.
    pub async fn restore(&mut self) -> AuthResult<bool> {
        let persisted = match self.store.load().await {
            Ok(Some(persisted)) => persisted,
            Ok(None) => return Ok(false),
            Err(e) => {
                warn!("Could not read persisted session: {}", e);
                return Ok(false);
            }
        };

        match self.api.profile(&persisted.token).await {
            Ok(user) => {
                info!("Restored session for {}", user.login);
                self.session = Some(Session {
                    token: persisted.token,
                    user,
                });
                Ok(true)
            }
            Err(e) => {
                warn!("Profile fetch with stored token failed: {}", e);
                Ok(false)
            }
        }
    }

    /// Handle an OAuth callback URL.
    ///
    /// When the URL carries a code, performs exactly one exchange with it and
    /// returns the URL rewritten without the code parameter. URLs without a
    /// code pass through as `Ok(None)`.
    pub async fn handle_redirect(&mut self, url: &str) -> AuthResult<Option<String>> {
        if access_denied(url) {
            return Err(AuthError::AccessDenied);
        }

        let Some((clean_url, code)) = split_code(url) else {
            return Ok(None);
        };

        self.sign_in_with_code(&code).await?;
        Ok(Some(clean_url))
    }

    /// Exchange an already-extracted authorization code and persist the token
    pub async fn sign_in_with_code(&mut self, code: &str) -> AuthResult<&User> {
        let response = self.api.authenticate(code).await?;

        self.store
            .save(&PersistedSession {
                token: response.token.clone(),
                user: None,
            })
            .await?;

        let session = self.session.insert(Session {
            token: response.token,
            user: response.user,
        });

        info!("Signed in as {}", session.user.login);
        Ok(&session.user)
    }

    /// Clear the in-memory session and delete the persisted token
    pub async fn sign_out(&mut self) -> AuthResult<()> {
        self.session = None;
        self.store.clear().await?;
        info!("Signed out");
        Ok(())
    }
}
