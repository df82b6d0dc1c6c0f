//! Integration tests for the device and web session bootstrap flows

use bonfire_api::ApiClient;
use bonfire_auth::{DeviceSession, PersistedSession, SessionStore, WebSession};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_user() -> serde_json::Value {
    json!({
        "id": "u-123",
        "name": "Ada Lovelace",
        "login": "ada",
        "avatar_url": "https://avatars.example.com/ada.png"
    })
}

fn store_in(dir: &TempDir) -> SessionStore {
    SessionStore::with_path(dir.path().join("session.toml"))
}

async fn mock_exchange(server: &MockServer, code: &str, token: &str) {
    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .and(body_json(json!({ "code": code })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": token,
            "user": sample_user()
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn device_sign_in_persists_token_and_user() {
    let server = MockServer::start().await;
    mock_exchange(&server, "valid-code", "token-abc").await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let mut session = DeviceSession::new(ApiClient::new(server.uri()).unwrap(), store.clone());

    let user = session.sign_in_with_code("valid-code").await.unwrap();
    assert_eq!(user.login, "ada");
    assert!(session.is_authenticated());
    assert_eq!(session.token(), Some("token-abc"));

    let persisted = store.load().await.unwrap().unwrap();
    assert_eq!(persisted.token, "token-abc");
    assert_eq!(persisted.user.unwrap().login, "ada");
}

#[tokio::test]
async fn device_failed_exchange_leaves_signed_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let mut session = DeviceSession::new(ApiClient::new(server.uri()).unwrap(), store.clone());

    assert!(session.sign_in_with_code("bad-code").await.is_err());
    assert!(!session.is_authenticated());
    assert!(session.user().is_none());
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn device_sign_out_clears_memory_and_storage() {
    let server = MockServer::start().await;
    mock_exchange(&server, "valid-code", "token-abc").await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let mut session = DeviceSession::new(ApiClient::new(server.uri()).unwrap(), store.clone());

    session.sign_in_with_code("valid-code").await.unwrap();
    session.sign_out().await.unwrap();

    assert!(session.user().is_none());
    assert!(!session.is_authenticated());
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn device_restore_reads_persisted_pair() {
    let server = MockServer::start().await;
    mock_exchange(&server, "valid-code", "token-abc").await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    {
        let mut session = DeviceSession::new(ApiClient::new(server.uri()).unwrap(), store.clone());
        session.sign_in_with_code("valid-code").await.unwrap();
    }

    // Fresh instance, as on app start. No network call happens here.
    let mut session = DeviceSession::new(ApiClient::new(server.uri()).unwrap(), store);
    assert!(session.restore().await.unwrap());
    assert_eq!(session.user().unwrap().login, "ada");
    assert_eq!(session.token(), Some("token-abc"));
}

#[tokio::test]
async fn device_restore_without_persisted_session_is_signed_out() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let mut session = DeviceSession::new(ApiClient::new(server.uri()).unwrap(), store_in(&dir));
    assert!(!session.restore().await.unwrap());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn device_restore_with_token_only_stays_signed_out() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    // A web client leaves token-only records; the device client treats the
    // pair as all-or-nothing
    store
        .save(&PersistedSession {
            token: "token-abc".to_string(),
            user: None,
        })
        .await
        .unwrap();

    let mut session = DeviceSession::new(ApiClient::new(server.uri()).unwrap(), store);
    assert!(!session.restore().await.unwrap());
    assert!(session.user().is_none());
    assert!(session.token().is_none());
}

#[tokio::test]
async fn web_restore_sends_stored_token_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(header("Authorization", "Bearer token-web"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_user()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store
        .save(&bonfire_auth::PersistedSession {
            token: "token-web".to_string(),
            user: None,
        })
        .await
        .unwrap();

    let mut session = WebSession::new(ApiClient::new(server.uri()).unwrap(), store);
    assert!(session.restore().await.unwrap());
    assert_eq!(session.user().unwrap().login, "ada");
    assert_eq!(session.token(), Some("token-web"));
}

#[tokio::test]
async fn web_restore_with_rejected_token_degrades_to_signed_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store
        .save(&bonfire_auth::PersistedSession {
            token: "stale-token".to_string(),
            user: None,
        })
        .await
        .unwrap();

    let mut session = WebSession::new(ApiClient::new(server.uri()).unwrap(), store);
    assert!(!session.restore().await.unwrap());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn web_redirect_with_code_exchanges_once_and_rewrites_url() {
    let server = MockServer::start().await;
    mock_exchange(&server, "XYZ", "token-web").await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let mut session = WebSession::new(ApiClient::new(server.uri()).unwrap(), store.clone());

    let clean = session
        .handle_redirect("http://localhost:5173/?code=XYZ")
        .await
        .unwrap();
    assert_eq!(clean.as_deref(), Some("http://localhost:5173/"));
    assert_eq!(session.user().unwrap().login, "ada");

    // Token only; the web client re-fetches the profile on startup
    let persisted = store.load().await.unwrap().unwrap();
    assert_eq!(persisted.token, "token-web");
    assert!(persisted.user.is_none());
}

#[tokio::test]
async fn web_redirect_without_code_is_a_no_op() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let mut session = WebSession::new(ApiClient::new(server.uri()).unwrap(), store_in(&dir));
    let result = session
        .handle_redirect("http://localhost:5173/?tab=feed")
        .await
        .unwrap();

    assert!(result.is_none());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn web_failed_exchange_persists_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let mut session = WebSession::new(ApiClient::new(server.uri()).unwrap(), store.clone());

    assert!(session
        .handle_redirect("http://localhost:5173/?code=XYZ")
        .await
        .is_err());
    assert!(!session.is_authenticated());
    assert!(store.load().await.unwrap().is_none());
}
