use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bonfire_api::ApiClient;
use bonfire_auth::{SessionStore, WebSession};
use bonfire_web::app::{self, AppState};
use bonfire_web::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let api = ApiClient::new(&config.api_url)?;
    let store = SessionStore::new()?;
    let mut session = WebSession::new(api, store);

    // Startup rehydration: re-fetch the profile with the stored token
    if session.restore().await? {
        let login = session.user().map(|u| u.login.clone()).unwrap_or_default();
        info!("Restored session for {}", login);
    } else {
        info!("No session to restore, starting signed out");
    }

    let state = AppState::new(session);
    let router = app::router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("Bonfire web client on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
