use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

use crate::{
    error::{ApiError, ApiResult},
    types::{AuthRequest, AuthResponse, User},
};

/// HTTP client for the Bonfire backend.
///
/// The bearer credential is injected explicitly per request rather than kept
/// as client-wide default state, so one client instance can serve both
/// anonymous and authenticated calls.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for the given backend base URL
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Backend base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange an authorization code for a token/user pair
    pub async fn authenticate(&self, code: &str) -> ApiResult<AuthResponse> {
        let url = format!("{}/authenticate", self.base_url);
        debug!("Exchanging authorization code via {}", url);

        let request = AuthRequest {
            code: code.to_string(),
        };

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => response
                .json::<AuthResponse>()
                .await
                .map_err(|e| ApiError::InvalidResponse(e.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST => Err(ApiError::Unauthorized(
                "Authorization code was rejected".to_string(),
            )),
            status => {
                let error_text = response.text().await.unwrap_or_else(|_| status.to_string());
                Err(ApiError::Api(error_text))
            }
        }
    }

    /// Fetch the profile of the user the token belongs to
    pub async fn profile(&self, token: &str) -> ApiResult<User> {
        let url = format!("{}/profile", self.base_url);
        debug!("Fetching profile via {}", url);

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<User>()
                .await
                .map_err(|e| ApiError::InvalidResponse(e.to_string())),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized(
                "Invalid or expired token".to_string(),
            )),
            status => {
                let error_text = response.text().await.unwrap_or_else(|_| status.to_string());
                Err(ApiError::Api(error_text))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = ApiClient::new("http://localhost:4000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:4000");

        let client = ApiClient::new("http://localhost:4000").unwrap();
        assert_eq!(client.base_url(), "http://localhost:4000");
    }
}
