//! Router and handlers for the web client

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::warn;
use url::Url;

use bonfire_api::User;
use bonfire_auth::WebSession;

/// Shared application state: the session bootstrap behind a lock.
///
/// Handlers take the write lock for the duration of a request; the UI is a
/// single-user local app, so there is no contention to speak of.
#[derive(Clone)]
pub struct AppState {
    session: Arc<RwLock<WebSession>>,
}

impl AppState {
    pub fn new(session: WebSession) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/signout", post(signout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Render the page, or handle an OAuth callback landing on `/`.
///
/// A request carrying `?code=` triggers exactly one exchange and redirects
/// back without the code, so the credential never stays in the address bar.
async fn index(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    let mut session = state.session.write().await;

    let request_url = request_url(&headers, &uri);

    match session.handle_redirect(&request_url).await {
        Ok(Some(clean_url)) => Redirect::to(&relative_target(&clean_url)).into_response(),
        Ok(None) => render(&session).into_response(),
        Err(e) => {
            // Degrade to signed out, and still strip the code from the URL
            warn!("Sign-in failed: {}", e);
            Redirect::to("/").into_response()
        }
    }
}

async fn signout(State(state): State<AppState>) -> Redirect {
    let mut session = state.session.write().await;

    if let Err(e) = session.sign_out().await {
        warn!("Sign-out failed: {}", e);
    }

    Redirect::to("/")
}

fn render(session: &WebSession) -> Html<String> {
    match session.user() {
        Some(user) => Html(profile_page(user)),
        None => Html(signin_page(session)),
    }
}

/// Absolute URL of the incoming request.
///
/// HTTP/1.1 origin-form URIs carry only path and query, so the host comes
/// from the Host header; absolute-form URIs (and HTTP/2 requests) already
/// carry their authority and pass through untouched.
fn request_url(headers: &HeaderMap, uri: &Uri) -> String {
    if uri.authority().is_some() {
        return uri.to_string();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{}{}", host, uri)
}

/// Reduce an absolute URL to the path-and-query form a redirect wants
fn relative_target(absolute: &str) -> String {
    match Url::parse(absolute) {
        Ok(url) => {
            let mut target = url.path().to_string();
            if let Some(query) = url.query() {
                target.push('?');
                target.push_str(query);
            }
            target
        }
        Err(_) => "/".to_string(),
    }
}

fn signin_page(session: &WebSession) -> String {
    let sign_in_url = session.sign_in_url().unwrap_or_else(|e| {
        warn!("Could not build authorization URL: {}", e);
        "#".to_string()
    });

    page(&format!(
        r#"<h1>Bonfire</h1>
    <p>Share what you're building.</p>
    <a class="button" href="{}">Sign in with GitHub</a>"#,
        escape(&sign_in_url)
    ))
}

fn profile_page(user: &User) -> String {
    page(&format!(
        r#"<img class="avatar" src="{}" alt="avatar" />
    <h1>{}</h1>
    <p>@{}</p>
    <form method="post" action="/signout"><button>Sign out</button></form>"#,
        escape(&user.avatar_url),
        escape(&user.name),
        escape(&user.login)
    ))
}

fn page(body: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
<head>
    <title>Bonfire</title>
    <style>
        body {{ font-family: system-ui, sans-serif; max-width: 600px; margin: 100px auto; text-align: center; }}
        h1 {{ color: #ff8c00; }}
        .avatar {{ width: 96px; border-radius: 50%; }}
        .button {{ display: inline-block; padding: 8px 16px; background: #24292f; color: #fff; text-decoration: none; border-radius: 6px; }}
    </style>
</head>
<body>
    {}
</body>
</html>"#,
        body
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
