//! GitHub authorization URL construction

use url::Url;

use crate::error::{AuthError, AuthResult};

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const DEFAULT_SCOPE: &str = "user";

/// Env var overriding the compiled-in OAuth app client id
const CLIENT_ID_ENV: &str = "BONFIRE_GITHUB_CLIENT_ID";

/// Public client id of the Bonfire GitHub OAuth app
const DEFAULT_CLIENT_ID: &str = "bdaa853a9c4714445245";

/// OAuth provider settings used to build the authorization URL
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub client_id: String,
    pub scope: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            client_id: std::env::var(CLIENT_ID_ENV)
                .unwrap_or_else(|_| DEFAULT_CLIENT_ID.to_string()),
            scope: DEFAULT_SCOPE.to_string(),
        }
    }
}

/// Build the interactive authorization URL for the provider.
///
/// Shape: `https://github.com/login/oauth/authorize?scope=<scope>&client_id=<id>`.
/// The redirect target is part of the backend's OAuth app registration, so no
/// `redirect_uri` parameter is appended here.
pub fn authorize_url(config: &ProviderConfig) -> AuthResult<String> {
    let mut url = Url::parse(AUTHORIZE_URL)
        .map_err(|e| AuthError::Configuration(format!("Invalid authorize URL: {}", e)))?;

    url.query_pairs_mut()
        .append_pair("scope", &config.scope)
        .append_pair("client_id", &config.client_id);

    Ok(url.to_string())
}
