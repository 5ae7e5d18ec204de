//! Integration tests for the webhook relay path.
//!
//! These tests drive the real router and application handlers against the
//! in-memory adapters, covering the externally observable contract:
//! 1. The hook surface always answers 204 and leaks nothing
//! 2. Captures preserve verb, headers, and body rules
//! 3. The registry honors last-writer-wins with guarded eviction
//! 4. A delivered envelope replays as the original request

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use hook_relay::adapters::auth::MockSessionAuthenticator;
use hook_relay::adapters::endpoints::InMemoryEndpointStore;
use hook_relay::adapters::http::{build_router, AppDeps};
use hook_relay::adapters::websocket::InMemoryConnectionRegistry;
use hook_relay::application::handlers::relay::ForwardWebhookHandler;
use hook_relay::config::AppConfig;
use hook_relay::domain::endpoint::Endpoint;
use hook_relay::domain::foundation::UserId;
use hook_relay::domain::relay::{RelayMessage, WebhookMessage};
use hook_relay::ports::{
    ConnectionHandle, ConnectionRegistry, EndpointStore, WebhookForwarder,
};
use tokio::sync::mpsc;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: axum::Router,
    store: Arc<InMemoryEndpointStore>,
    registry: Arc<InMemoryConnectionRegistry>,
}

fn test_app() -> TestApp {
    let store = Arc::new(InMemoryEndpointStore::new());
    let registry = Arc::new(InMemoryConnectionRegistry::new());
    let authenticator = Arc::new(
        MockSessionAuthenticator::new().with_session("live-credential", "user-1"),
    );

    let deps = AppDeps {
        endpoint_store: store.clone(),
        authenticator,
        registry: registry.clone(),
    };
    let config = AppConfig {
        server: Default::default(),
        database: Default::default(),
        relay: Default::default(),
    };

    TestApp {
        router: build_router(&deps, &config),
        store,
        registry,
    }
}

fn owner() -> UserId {
    UserId::new("user-1").unwrap()
}

async fn register_endpoint(app: &TestApp, target: &str, method: &str) -> Endpoint {
    let endpoint = Endpoint::new(owner(), target, method).unwrap();
    app.store.create(&endpoint).await.unwrap();
    endpoint
}

async fn connect_owner(app: &TestApp) -> mpsc::UnboundedReceiver<RelayMessage> {
    let (handle, rx) = ConnectionHandle::open();
    app.registry.register(&owner(), handle).await;
    rx
}

async fn hook_request(
    app: &TestApp,
    method: &str,
    id: &str,
    headers: &[(&str, &str)],
    body: &str,
) -> StatusCode {
    let mut request = Request::builder().method(method).uri(format!("/hook/{}", id));
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    let response = app
        .router
        .clone()
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    response.status()
}

/// Forwarder that records every replay instead of performing it.
struct RecordingForwarder {
    replays: Mutex<Vec<WebhookMessage>>,
}

impl RecordingForwarder {
    fn new() -> Self {
        Self {
            replays: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl WebhookForwarder for RecordingForwarder {
    async fn forward(&self, message: &WebhookMessage) -> Option<u16> {
        self.replays.lock().unwrap().push(message.clone());
        Some(200)
    }
}

// =============================================================================
// Hook surface contract
// =============================================================================

#[tokio::test]
async fn unknown_endpoint_answers_204_without_delivery() {
    let app = test_app();
    let mut rx = connect_owner(&app).await;

    let status = hook_request(
        &app,
        "POST",
        "0c9e4f6e-5e5e-4d9c-b86e-000000000000",
        &[],
        "payload",
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn garbage_endpoint_id_answers_204() {
    let app = test_app();
    let status = hook_request(&app, "POST", "not-an-id", &[], "").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn offline_owner_answers_204_and_drops() {
    let app = test_app();
    let endpoint = register_endpoint(&app, "http://localhost:9000/cb", "POST").await;

    let status = hook_request(&app, "POST", &endpoint.id().to_string(), &[], "payload").await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    // Connecting afterwards yields nothing: the message is gone, not queued.
    let mut rx = connect_owner(&app).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn every_allowed_verb_answers_204() {
    let app = test_app();
    let endpoint = register_endpoint(&app, "http://localhost:9000/cb", "POST").await;
    let _rx = connect_owner(&app).await;

    for method in ["GET", "POST", "PUT", "PATCH", "DELETE"] {
        let status = hook_request(&app, method, &endpoint.id().to_string(), &[], "x").await;
        assert_eq!(status, StatusCode::NO_CONTENT, "verb {}", method);
    }
}

#[tokio::test]
async fn connected_owner_receives_capture_with_inbound_verb() {
    let app = test_app();
    // Registered as POST, called as PUT: the capture carries PUT.
    let endpoint = register_endpoint(&app, "http://localhost:9000/cb", "POST").await;
    let mut rx = connect_owner(&app).await;

    let status = hook_request(
        &app,
        "PUT",
        &endpoint.id().to_string(),
        &[("X-Test", "1")],
        "hello",
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    let RelayMessage::Webhook(msg) = rx.try_recv().unwrap();
    assert_eq!(msg.endpoint_id, endpoint.id());
    assert_eq!(msg.target, "http://localhost:9000/cb");
    assert_eq!(msg.method, "PUT");
    assert_eq!(msg.headers.get("x-test").map(String::as_str), Some("1"));
    assert_eq!(msg.body.as_deref(), Some("hello"));
}

#[tokio::test]
async fn get_capture_has_null_body() {
    let app = test_app();
    let endpoint = register_endpoint(&app, "http://localhost:9000/cb", "GET").await;
    let mut rx = connect_owner(&app).await;

    hook_request(&app, "GET", &endpoint.id().to_string(), &[], "").await;

    let RelayMessage::Webhook(msg) = rx.try_recv().unwrap();
    assert_eq!(msg.body, None);
}

#[tokio::test]
async fn post_capture_preserves_exact_body() {
    let app = test_app();
    let endpoint = register_endpoint(&app, "http://localhost:9000/cb", "POST").await;
    let mut rx = connect_owner(&app).await;

    let body = r#"{"event":"invoice.paid","amount":1299}"#;
    hook_request(&app, "POST", &endpoint.id().to_string(), &[], body).await;

    let RelayMessage::Webhook(msg) = rx.try_recv().unwrap();
    assert_eq!(msg.body.as_deref(), Some(body));
}

// =============================================================================
// Registry invariants through the public surface
// =============================================================================

#[tokio::test]
async fn superseded_connection_close_does_not_evict_newer_one() {
    let app = test_app();
    let endpoint = register_endpoint(&app, "http://localhost:9000/cb", "POST").await;

    let (h1, _rx1) = ConnectionHandle::open();
    let (h2, mut rx2) = ConnectionHandle::open();
    app.registry.register(&owner(), h1.clone()).await;
    app.registry.register(&owner(), h2).await;

    // H1's close event arrives after H2 took over.
    app.registry.unregister(&owner(), &h1).await;

    assert!(app.registry.is_connected(&owner()).await);
    let status = hook_request(&app, "POST", &endpoint.id().to_string(), &[], "late").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let RelayMessage::Webhook(msg) = rx2.try_recv().unwrap();
    assert_eq!(msg.body.as_deref(), Some("late"));
}

#[tokio::test]
async fn closed_transport_means_drop_not_error() {
    let app = test_app();
    let endpoint = register_endpoint(&app, "http://localhost:9000/cb", "POST").await;
    let rx = connect_owner(&app).await;
    drop(rx);

    let status = hook_request(&app, "POST", &endpoint.id().to_string(), &[], "x").await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(!app.registry.is_connected(&owner()).await);
}

// =============================================================================
// Management API
// =============================================================================

async fn api_request(
    app: &TestApp,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        request = request.header("cookie", format!("session_id={}", cookie));
    }
    if body.is_some() {
        request = request.header("content-type", "application/json");
    }
    let response = app
        .router
        .clone()
        .oneshot(
            request
                .body(Body::from(body.unwrap_or_default().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn management_api_requires_session() {
    let app = test_app();

    let (status, body) = api_request(&app, "GET", "/api/endpoints", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn dead_session_is_unauthorized() {
    let app = test_app();

    let (status, _) = api_request(&app, "GET", "/api/endpoints", Some("expired"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_endpoint_returns_public_url() {
    let app = test_app();

    let (status, body) = api_request(
        &app,
        "POST",
        "/api/endpoints",
        Some("live-credential"),
        Some(r#"{"target":"http://localhost:3000/hook","method":"post"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["method"], "POST");
    assert_eq!(body["target"], "http://localhost:3000/hook");
    let url = body["url"].as_str().unwrap();
    assert_eq!(url, format!("http://localhost:8080/hook/{}", body["id"].as_str().unwrap()));

    // The created endpoint resolves on the hook path.
    let stored = app
        .store
        .get_by_id(body["id"].as_str().unwrap().parse().unwrap())
        .await
        .unwrap();
    assert!(stored.is_some());
}

#[tokio::test]
async fn create_rejects_invalid_target_and_method() {
    let app = test_app();

    for payload in [
        r#"{"target":"http://evil.example/x","method":"POST"}"#,
        r#"{"target":"https://localhost/x","method":"POST"}"#,
        r#"{"target":"http://localhost/x","method":"TRACE"}"#,
    ] {
        let (status, body) = api_request(
            &app,
            "POST",
            "/api/endpoints",
            Some("live-credential"),
            Some(payload),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert_eq!(body["code"], "VALIDATION_FAILED");
    }
}

#[tokio::test]
async fn list_returns_own_endpoints_newest_first() {
    let app = test_app();
    let older = Endpoint::new(owner(), "http://localhost/a", "GET").unwrap();
    app.store.create(&older).await.unwrap();
    let newer = Endpoint::new(owner(), "http://localhost/b", "POST").unwrap();
    app.store.create(&newer).await.unwrap();
    let foreign =
        Endpoint::new(UserId::new("user-2").unwrap(), "http://localhost/c", "PUT").unwrap();
    app.store.create(&foreign).await.unwrap();

    let (status, body) =
        api_request(&app, "GET", "/api/endpoints", Some("live-credential"), None).await;

    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["id"], newer.id().to_string());
    assert_eq!(listed[1]["id"], older.id().to_string());
}

#[tokio::test]
async fn delete_is_owner_scoped() {
    let app = test_app();
    let foreign =
        Endpoint::new(UserId::new("user-2").unwrap(), "http://localhost/c", "PUT").unwrap();
    app.store.create(&foreign).await.unwrap();

    let (status, _) = api_request(
        &app,
        "DELETE",
        &format!("/api/endpoints/{}", foreign.id()),
        Some("live-credential"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.store.get_by_id(foreign.id()).await.unwrap().is_some());
}

// =============================================================================
// End to end: receive, deliver over the wire shape, replay
// =============================================================================

#[tokio::test]
async fn captured_webhook_replays_as_original_request() {
    let app = test_app();
    let endpoint = register_endpoint(&app, "http://localhost:9000/cb", "POST").await;
    let mut rx = connect_owner(&app).await;

    let status = hook_request(
        &app,
        "PUT",
        &endpoint.id().to_string(),
        &[("X-Test", "1")],
        "hello",
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // What the gateway would write to the socket...
    let envelope = rx.try_recv().unwrap();
    let frame = serde_json::to_string(&envelope).unwrap();
    assert!(frame.contains(r#""type":"webhook""#));

    // ...is what the reflector decodes and replays.
    let decoded: RelayMessage = serde_json::from_str(&frame).unwrap();
    let forwarder = Arc::new(RecordingForwarder::new());
    let handler = ForwardWebhookHandler::new(forwarder.clone());
    let replay_status = handler.handle(decoded).await;

    assert_eq!(replay_status, Some(200));
    let replays = forwarder.replays.lock().unwrap();
    assert_eq!(replays.len(), 1);
    let replay = &replays[0];
    assert_eq!(replay.method, "PUT");
    assert_eq!(replay.target, "http://localhost:9000/cb");
    assert_eq!(replay.headers.get("x-test").map(String::as_str), Some("1"));
    assert_eq!(replay.body.as_deref(), Some("hello"));
}

#[tokio::test]
async fn wire_envelope_matches_documented_shape() {
    let endpoint = Endpoint::new(owner(), "http://localhost:9000/cb", "POST").unwrap();
    let mut headers = HashMap::new();
    headers.insert("X-Test".to_string(), "1".to_string());
    let message = WebhookMessage::capture(&endpoint, "PUT", headers, Some("hello".to_string()));

    let json = serde_json::to_value(RelayMessage::Webhook(message)).unwrap();

    assert_eq!(json["type"], "webhook");
    let data = &json["data"];
    assert!(data["endpointId"].is_string());
    assert_eq!(data["target"], "http://localhost:9000/cb");
    assert_eq!(data["method"], "PUT");
    assert_eq!(data["headers"]["X-Test"], "1");
    assert_eq!(data["body"], "hello");
}
