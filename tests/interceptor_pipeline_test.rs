//! Integration tests for the request/response interceptor pipeline.
//!
//! These drive `ApiClient` through the mock transport and verify:
//! - Credential headers on outbound requests
//! - Session purge and the expiry event on 401
//! - User notifications for 403, transport failures and other errors
//! - Opt-in retry behaviour

mod common;

use common::*;
use shipdesk::api::{RetryPolicy, AUTHORIZATION_HEADER, CSRF_HEADER};
use shipdesk::auth::{AUTH_TOKEN_KEY, CSRF_TOKEN_KEY, REFRESH_TOKEN_KEY, SESSION_KEYS};
use shipdesk::config::{ApiConfig, Portal};
use shipdesk::error::{
    ApiError, StoreError, GENERIC_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE, PERMISSION_DENIED_MESSAGE,
};
use shipdesk::session::SessionEvent;
use shipdesk::traits::{Method, Severity};
use std::time::Duration;

// ============================================================================
// Request side
// ============================================================================

#[tokio::test]
async fn test_bearer_header_matches_stored_token() {
    let t = TestClient::new();
    t.transport.set_default_response(MockResponse::status(200));

    for token in ["abc123", "eyJhbGciOiJIUzI1NiJ9.e30.sig", "with spaces and ünïcode"] {
        t.client.credentials().set(AUTH_TOKEN_KEY, token).await.unwrap();
        t.client.get("/orders").await.unwrap();

        let last = t.transport.get_requests().pop().unwrap();
        assert_eq!(
            last.headers.get(AUTHORIZATION_HEADER),
            Some(&format!("Bearer {}", token))
        );
    }
}

#[tokio::test]
async fn test_no_auth_header_without_token() {
    let t = TestClient::new();
    t.transport.set_default_response(MockResponse::status(200));

    t.client.get("/public/rates").await.unwrap();

    let request = &t.transport.get_requests()[0];
    assert!(!request.headers.contains_key(AUTHORIZATION_HEADER));
    assert!(!request.headers.contains_key(CSRF_HEADER));
}

#[tokio::test]
async fn test_csrf_header_sent_on_every_method() {
    let t = TestClient::new();
    t.transport.set_default_response(MockResponse::status(200));
    t.client.credentials().set(CSRF_TOKEN_KEY, "csrf-42").await.unwrap();

    let body = serde_json::json!({"name": "Warehouse 2"});
    t.client.get("/warehouses").await.unwrap();
    t.client.post("/warehouses", &body).await.unwrap();
    t.client.put("/warehouses/2", &body).await.unwrap();
    t.client.patch("/warehouses/2", &body).await.unwrap();
    t.client.delete("/warehouses/2").await.unwrap();

    let requests = t.transport.get_requests();
    let methods: Vec<Method> = requests.iter().map(|r| r.method).collect();
    assert_eq!(
        methods,
        vec![Method::Get, Method::Post, Method::Put, Method::Patch, Method::Delete]
    );
    for request in &requests {
        assert_eq!(request.headers.get(CSRF_HEADER).map(String::as_str), Some("csrf-42"));
    }
}

#[tokio::test]
async fn test_unreadable_store_blocks_the_request() {
    let t = TestClient::new();
    t.transport.set_default_response(MockResponse::status(200));
    t.substrate.insert_raw(AUTH_TOKEN_KEY, "%%% not base64 %%%");

    let result = t.client.get("/orders").await;

    assert!(matches!(
        result,
        Err(ApiError::Credentials(StoreError::Corrupted { .. }))
    ));
    assert_eq!(t.transport.request_count(), 0);
}

// ============================================================================
// 401: session purge and expiry event
// ============================================================================

#[tokio::test]
async fn test_unauthorized_scenario() {
    let t = TestClient::new();
    t.client.credentials().set(AUTH_TOKEN_KEY, "abc123").await.unwrap();
    t.transport
        .set_response(&TestClient::url("/orders"), MockResponse::status(401));
    let mut events = t.client.subscribe_session();

    let result = t.client.get("/orders").await;

    assert!(matches!(result, Err(ApiError::Unauthorized)));
    assert_eq!(t.client.credentials().get(AUTH_TOKEN_KEY).await.unwrap(), None);
    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::Expired {
            login_path: "/seller/login".to_string()
        }
    );
    assert!(events.try_recv().is_err(), "exactly one expiry event");
    assert_eq!(t.notifier.count(), 0);
}

#[tokio::test]
async fn test_unauthorized_purges_every_session_record() {
    let t = TestClient::new();
    for key in SESSION_KEYS {
        t.client.credentials().set(key, "secret").await.unwrap();
    }
    t.client.credentials().set("preferred_warehouse", "WH-2").await.unwrap();
    t.transport.set_default_response(MockResponse::json(
        401,
        serde_json::json!({"message": "Token expired"}),
    ));

    let _ = t.client.get("/orders").await;

    let store = t.client.credentials();
    assert_eq!(store.get(AUTH_TOKEN_KEY).await.unwrap(), None);
    assert_eq!(store.get(REFRESH_TOKEN_KEY).await.unwrap(), None);
    assert_eq!(store.get(CSRF_TOKEN_KEY).await.unwrap(), None);
    assert_eq!(
        store.get("preferred_warehouse").await.unwrap().as_deref(),
        Some("WH-2")
    );
}

#[tokio::test]
async fn test_unauthorized_is_idempotent() {
    let t = TestClient::new();
    t.transport.set_default_response(MockResponse::status(401));
    let mut events = t.client.subscribe_session();

    for _ in 0..2 {
        assert!(matches!(t.client.get("/orders").await, Err(ApiError::Unauthorized)));
    }

    assert!(t.substrate.snapshot().is_empty());
    assert!(matches!(events.try_recv(), Ok(SessionEvent::Expired { .. })));
    assert!(matches!(events.try_recv(), Ok(SessionEvent::Expired { .. })));
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_expiry_event_uses_portal_login_path() {
    let t = TestClient::with_config(ApiConfig::default().with_portal(Portal::Admin));
    t.transport.set_default_response(MockResponse::status(401));
    let mut events = t.client.subscribe_session();

    let _ = t.client.get("/admin/users").await;

    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::Expired {
            login_path: "/admin/login".to_string()
        }
    );
}

// ============================================================================
// Notifications
// ============================================================================

#[tokio::test]
async fn test_forbidden_notifies_and_keeps_session() {
    let t = TestClient::new();
    t.client.credentials().set(AUTH_TOKEN_KEY, "abc123").await.unwrap();
    t.transport.set_default_response(MockResponse::status(403));
    let mut events = t.client.subscribe_session();

    let result = t.client.delete("/sellers/9").await;

    assert!(matches!(result, Err(ApiError::Forbidden)));
    assert_eq!(t.notifier.messages(), vec![PERMISSION_DENIED_MESSAGE.to_string()]);
    assert_eq!(
        t.client.credentials().get(AUTH_TOKEN_KEY).await.unwrap().as_deref(),
        Some("abc123")
    );
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_network_failure_notifies_connectivity() {
    let t = TestClient::new();
    t.transport.set_default_response(connection_refused());

    let result = t.client.get("/orders").await;

    assert!(matches!(result, Err(ApiError::NetworkUnavailable(_))));
    let notifications = t.notifier.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Error);
    assert_eq!(notifications[0].message, NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_server_message_is_shown_verbatim() {
    let t = TestClient::new();
    t.transport.set_default_response(MockResponse::json(
        422,
        serde_json::json!({"message": "Pickup pincode is not serviceable", "code": "E_PIN"}),
    ));

    let result = t
        .client
        .post("/pickups", &serde_json::json!({"pincode": "000000"}))
        .await;

    match result {
        Err(ApiError::Server { status, message }) => {
            assert_eq!(status, 422);
            assert_eq!(message, "Pickup pincode is not serviceable");
        }
        other => panic!("Expected Server error, got {:?}", other),
    }
    assert_eq!(
        t.notifier.messages(),
        vec!["Pickup pincode is not serviceable".to_string()]
    );
}

#[tokio::test]
async fn test_generic_message_without_server_message() {
    let t = TestClient::new();
    t.transport.set_default_response(MockResponse::Success(Response::new(
        500,
        bytes::Bytes::from_static(b"Internal Server Error"),
    )));

    let result = t.client.get("/orders").await;

    assert!(matches!(result, Err(ApiError::Server { status: 500, .. })));
    assert_eq!(t.notifier.messages(), vec![GENERIC_ERROR_MESSAGE.to_string()]);
}

#[tokio::test]
async fn test_success_is_untouched() {
    let t = TestClient::new();
    t.transport.set_default_response(MockResponse::json(
        200,
        serde_json::json!({"orders": [], "total": 0}),
    ));

    let response = t.client.get("/orders").await.unwrap();

    assert_eq!(response.status, 200);
    let body: serde_json::Value = response.json().unwrap();
    assert_eq!(body["total"], 0);
    assert_eq!(t.notifier.count(), 0);
}

// ============================================================================
// Retry
// ============================================================================

fn fast_retry(max_retries: u32) -> ApiConfig {
    ApiConfig::default().with_retry_policy(
        RetryPolicy::default()
            .with_max_retries(max_retries)
            .with_base_delay(Duration::from_millis(1))
            .with_max_delay(Duration::from_millis(4)),
    )
}

#[tokio::test]
async fn test_retry_recovers_after_transient_failures() {
    let t = TestClient::with_config(fast_retry(3));
    t.transport.push_response(connection_refused());
    t.transport.push_response(connection_refused());
    t.transport.set_default_response(MockResponse::status(200));

    let response = t.client.get("/orders").await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(t.transport.request_count(), 3);
    assert_eq!(t.notifier.count(), 0);
}

#[tokio::test]
async fn test_retry_does_not_resend_401() {
    let t = TestClient::with_config(fast_retry(3));
    t.transport.set_default_response(MockResponse::status(401));

    let _ = t.client.get("/orders").await;

    assert_eq!(t.transport.request_count(), 1);
}

#[tokio::test]
async fn test_retry_keeps_credentials_on_every_attempt() {
    let t = TestClient::with_config(fast_retry(1));
    t.client.credentials().set(AUTH_TOKEN_KEY, "abc123").await.unwrap();
    t.transport.push_response(connection_refused());
    t.transport.set_default_response(MockResponse::status(200));

    t.client.get("/orders").await.unwrap();

    for request in t.transport.get_requests() {
        assert_eq!(
            request.headers.get(AUTHORIZATION_HEADER).map(String::as_str),
            Some("Bearer abc123")
        );
    }
}
