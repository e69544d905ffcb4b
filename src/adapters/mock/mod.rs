//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP transport with configurable responses
//! - [`InMemoryStore`] - In-memory key-value substrate
//! - [`RecordingNotifier`] - Notifier that records every message

pub mod http;
pub mod notifier;
pub mod store;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use notifier::{Notification, RecordingNotifier};
pub use store::InMemoryStore;
