//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP transport primitive
//! - [`KeyValueStore`] - Persistent substrate behind the credential store
//! - [`Notifier`] - User-facing message surface

pub mod http;
pub mod notify;
pub mod storage;

pub use http::{Headers, HttpClient, HttpError, Method, Response};
pub use notify::{Notifier, Severity};
pub use storage::KeyValueStore;
