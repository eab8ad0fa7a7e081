//! Auth session: token exchange, profile fetch, persistence across
//! restarts, and logout.

mod common;

use std::sync::Arc;

use common::AcceptAllIdentity;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront::auth::{AuthSession, RegisterInput};
use storefront::storage::{KeyValueStore, MemoryStore};
use storefront::ApiClient;

fn profile_envelope() -> serde_json::Value {
    json!({
        "data": {
            "_id": "u1",
            "name": "Jane Doe",
            "email": "jane@example.com",
            "role": "user"
        }
    })
}

async fn mount_token_and_profile(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/get-token"))
        .and(body_partial_json(json!({"email": "jane@example.com"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"token": "jwt1"}})),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer jwt1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_envelope()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_exchanges_identity_for_token_and_profile() {
    let server = MockServer::start().await;
    mount_token_and_profile(&server).await;

    let api = ApiClient::new(&server.uri()).expect("api client");
    let storage = Arc::new(MemoryStore::new());
    let session = AuthSession::new(Arc::new(AcceptAllIdentity), api, storage.clone());

    let profile = session
        .login("jane@example.com", "hunter2")
        .await
        .expect("login");

    assert_eq!(profile.id, "u1");
    assert!(session.is_authenticated());
    assert_eq!(session.token().as_deref(), Some("jwt1"));
    // Token survives in storage for the next start.
    assert_eq!(
        storage.get("access-token").expect("storage read"),
        Some("jwt1".to_string())
    );
}

#[tokio::test]
async fn restore_rehydrates_a_persisted_session() {
    let server = MockServer::start().await;
    mount_token_and_profile(&server).await;

    let storage = Arc::new(MemoryStore::new());
    storage.set("access-token", "jwt1").expect("seed token");

    let api = ApiClient::new(&server.uri()).expect("api client");
    let session = AuthSession::new(Arc::new(AcceptAllIdentity), api, storage);

    let profile = session.restore().await.expect("restore");
    assert_eq!(profile.map(|p| p.id), Some("u1".to_string()));
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn restore_with_rejected_token_clears_the_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid token"})),
        )
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStore::new());
    storage.set("access-token", "stale").expect("seed token");

    let api = ApiClient::new(&server.uri()).expect("api client");
    let session = AuthSession::new(Arc::new(AcceptAllIdentity), api, storage.clone());

    let profile = session.restore().await.expect("restore is non-fatal");
    assert!(profile.is_none());
    assert!(!session.is_authenticated());
    assert_eq!(storage.get("access-token").expect("storage read"), None);
}

#[tokio::test]
async fn restore_without_stored_token_is_a_clean_miss() {
    let server = MockServer::start().await;
    let api = ApiClient::new(&server.uri()).expect("api client");
    let session = AuthSession::new(
        Arc::new(AcceptAllIdentity),
        api,
        Arc::new(MemoryStore::new()),
    );

    assert!(session.restore().await.expect("restore").is_none());
}

#[tokio::test]
async fn register_creates_backend_user_before_establishing_session() {
    let server = MockServer::start().await;
    mount_token_and_profile(&server).await;

    Mock::given(method("POST"))
        .and(path("/auth/create-user"))
        .and(body_partial_json(json!({
            "name": "Jane Doe",
            "email": "jane@example.com"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).expect("api client");
    let session = AuthSession::new(
        Arc::new(AcceptAllIdentity),
        api,
        Arc::new(MemoryStore::new()),
    );

    let profile = session
        .register(RegisterInput {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            contact: Some("555".to_string()),
            password: "hunter2".to_string(),
        })
        .await
        .expect("register");

    assert_eq!(profile.email, "jane@example.com");
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn logout_drops_token_profile_and_stored_state() {
    let server = MockServer::start().await;
    mount_token_and_profile(&server).await;

    let storage = Arc::new(MemoryStore::new());
    let api = ApiClient::new(&server.uri()).expect("api client");
    let session = AuthSession::new(Arc::new(AcceptAllIdentity), api, storage.clone());

    session
        .login("jane@example.com", "hunter2")
        .await
        .expect("login");
    assert!(session.is_authenticated());

    session.logout().await.expect("logout");

    assert!(!session.is_authenticated());
    assert!(session.profile().is_none());
    assert_eq!(session.token(), None);
    assert_eq!(storage.get("access-token").expect("storage read"), None);
}
