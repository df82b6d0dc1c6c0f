//! Loopback callback listener for the device sign-in flow
//!
//! Listens on localhost for the OAuth redirect and extracts the
//! authorization code from the single request it serves.

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};
use tracing::{debug, error, info};

use crate::error::{AuthError, AuthResult};

const DEFAULT_PORT: u16 = 3456;

/// One-shot callback server for the authorization redirect
pub struct CallbackServer {
    port: u16,
}

impl Default for CallbackServer {
    fn default() -> Self {
        Self::new()
    }
}

impl CallbackServer {
    /// Create a callback server on the default port
    pub fn new() -> Self {
        Self { port: DEFAULT_PORT }
    }

    /// Create a callback server on a custom port
    pub fn with_port(port: u16) -> Self {
        Self { port }
    }

    /// The callback URL the provider redirects to
    pub fn callback_url(&self) -> String {
        format!("http://localhost:{}/callback", self.port)
    }

    /// Wait for the OAuth redirect and return the authorization code.
    ///
    /// Accepts exactly one connection. A callback carrying `error=` (the user
    /// denied access, or the provider failed) resolves to an error.
    pub async fn wait_for_callback(&self) -> AuthResult<String> {
        let addr = format!("127.0.0.1:{}", self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| AuthError::CallbackServer(format!("Failed to bind to {}: {}", addr, e)))?;

        info!("Waiting for authorization callback on {}", addr);

        let (mut stream, peer_addr) = listener.accept().await.map_err(|e| {
            AuthError::CallbackServer(format!("Failed to accept connection: {}", e))
        })?;
        debug!("Received connection from {}", peer_addr);

        let mut buffer = vec![0; 2048];
        let n = stream
            .read(&mut buffer)
            .await
            .map_err(|e| AuthError::CallbackServer(format!("Failed to read request: {}", e)))?;
        let request = String::from_utf8_lossy(&buffer[..n]).into_owned();

        if let Some(code) = Self::query_param(&request, "code") {
            let response = Self::html_response("200 OK", SUCCESS_HTML);
            if let Err(e) = stream.write_all(response.as_bytes()).await {
                error!("Failed to send callback response: {}", e);
            }

            info!("Received authorization code");
            Ok(code)
        } else if let Some(provider_error) = Self::query_param(&request, "error") {
            let html = format!(
                "<html><body><h1>Sign-in failed</h1><p>{}</p><p>You can close this tab.</p></body></html>",
                provider_error
            );
            let _ = stream
                .write_all(Self::html_response("400 Bad Request", &html).as_bytes())
                .await;

            if provider_error == "access_denied" {
                Err(AuthError::AccessDenied)
            } else {
                Err(AuthError::OAuthFailed(provider_error))
            }
        } else {
            let _ = stream
                .write_all(Self::html_response("400 Bad Request", MISSING_CODE_HTML).as_bytes())
                .await;

            Err(AuthError::CallbackServer(
                "No authorization code in callback".to_string(),
            ))
        }
    }

    /// Extract a query parameter value from the request line of a raw HTTP
    /// request
    fn query_param(request: &str, name: &str) -> Option<String> {
        let request_line = request.lines().next()?;
        let target = request_line.split_whitespace().nth(1)?;
        let (_, query) = target.split_once('?')?;

        query.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
    }

    fn html_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\n\r\n{}",
            status,
            body.len(),
            body
        )
    }
}

const SUCCESS_HTML: &str = r#"<html>
<head>
    <title>Signed in</title>
    <style>
        body { font-family: system-ui, sans-serif; max-width: 600px; margin: 100px auto; text-align: center; }
        h1 { color: #ff8c00; }
        p { color: #64748b; }
    </style>
</head>
<body>
    <h1>Signed in to Bonfire</h1>
    <p>You can close this tab and return to the app.</p>
</body>
</html>"#;

const MISSING_CODE_HTML: &str =
    "<html><body><h1>Sign-in failed</h1><p>No authorization code in the callback.</p></body></html>";
