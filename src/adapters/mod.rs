//! Concrete implementations of the trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP transport using reqwest
//! - [`FileKeyValueStore`] - JSON-file credential substrate
//! - [`ConsoleNotifier`] / [`OsNotifier`] - user-facing message surfaces
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::InMemoryStore`] - In-memory substrate with failure switches
//! - [`mock::RecordingNotifier`] - Captures notifications

pub mod file_store;
pub mod mock;
pub mod notifiers;
pub mod reqwest_http;

pub use file_store::FileKeyValueStore;
pub use mock::{InMemoryStore, MockHttpClient, RecordingNotifier};
pub use notifiers::{ConsoleNotifier, OsNotifier};
pub use reqwest_http::ReqwestHttpClient;
