//! Authentication: the credential store and the session endpoints.
//!
//! - [`store`]: reversible-encoded credential records over a [`crate::traits::KeyValueStore`]
//! - [`session`]: `login`, `refresh_session` and `logout` on [`crate::api::ApiClient`]

pub mod session;
pub mod store;

pub use session::{LoginRequest, TokenResponse};
pub use store::{CredentialStore, AUTH_TOKEN_KEY, CSRF_TOKEN_KEY, REFRESH_TOKEN_KEY, SESSION_KEYS};
