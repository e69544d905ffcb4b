//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! mod common;
//! use common::TestClient;
//!
//! let t = TestClient::new();
//! t.transport.set_default_response(MockResponse::status(200));
//! t.client.get("/orders").await?;
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use shipdesk::adapters::ReqwestHttpClient;
use shipdesk::api::ApiClient;
use shipdesk::auth::CredentialStore;
use shipdesk::config::ApiConfig;
use std::sync::Arc;
use std::time::Duration;

/// Base URL used with [`MockHttpClient`].
pub const TEST_BASE_URL: &str = "https://api.shipdesk.test";

/// An [`ApiClient`] wired to mock adapters, with handles to each of them.
pub struct TestClient {
    pub client: Arc<ApiClient>,
    pub transport: MockHttpClient,
    pub substrate: InMemoryStore,
    pub notifier: RecordingNotifier,
}

impl TestClient {
    pub fn new() -> Self {
        Self::with_config(ApiConfig::default())
    }

    pub fn with_config(config: ApiConfig) -> Self {
        let transport = MockHttpClient::new();
        let substrate = InMemoryStore::new();
        let notifier = RecordingNotifier::new();
        let client = ApiClient::new(
            config.with_base_url(TEST_BASE_URL),
            Arc::new(transport.clone()),
            CredentialStore::new(Arc::new(substrate.clone())),
            Arc::new(notifier.clone()),
        );
        Self {
            client: Arc::new(client),
            transport,
            substrate,
            notifier,
        }
    }

    /// Full URL for `path` under [`TEST_BASE_URL`].
    pub fn url(path: &str) -> String {
        format!("{}{}", TEST_BASE_URL, path)
    }
}

/// An [`ApiClient`] talking real HTTP to `base_url` (a wiremock server).
pub fn reqwest_client(base_url: &str) -> (Arc<ApiClient>, InMemoryStore, RecordingNotifier) {
    let substrate = InMemoryStore::new();
    let notifier = RecordingNotifier::new();
    let transport = ReqwestHttpClient::with_timeout(Duration::from_secs(2))
        .expect("reqwest client should build");
    let client = ApiClient::new(
        ApiConfig::default().with_base_url(base_url),
        Arc::new(transport),
        CredentialStore::new(Arc::new(substrate.clone())),
        Arc::new(notifier.clone()),
    );
    (Arc::new(client), substrate, notifier)
}
