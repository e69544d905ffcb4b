//! Mock implementations for test fixtures.
//!
//! Re-exports the mock adapters from `shipdesk::adapters::mock` and adds
//! canned server payloads.

pub use shipdesk::adapters::mock::{
    InMemoryStore, MockHttpClient, MockResponse, RecordedRequest, RecordingNotifier,
};
pub use shipdesk::traits::{Headers, HttpError, Response};

use serde_json::json;

/// A successful `/auth/login` or `/auth/refresh` payload.
pub fn token_payload(token: &str, refresh: &str, csrf: &str) -> serde_json::Value {
    json!({
        "token": token,
        "refresh_token": refresh,
        "csrf_token": csrf,
    })
}

/// A `/tracking/{awb}` payload.
pub fn tracking_payload(awb: &str, status: &str) -> serde_json::Value {
    json!({
        "awb": awb,
        "status": status,
        "location": "Bhiwandi hub",
        "updated_at": "2026-02-11T06:15:00Z",
    })
}

/// A transport failure as produced by a refused connection.
pub fn connection_refused() -> MockResponse {
    MockResponse::Error(HttpError::ConnectionFailed("connection refused".to_string()))
}
