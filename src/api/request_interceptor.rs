//! Request augmentation: attaches session credentials to every outbound call.

use crate::auth::store::{CredentialStore, AUTH_TOKEN_KEY, CSRF_TOKEN_KEY};
use crate::error::StoreError;
use crate::traits::Headers;

use super::request::ApiRequest;

/// Header carrying the bearer token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Header carrying the CSRF token.
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Reads the stored tokens and sets the matching headers.
#[derive(Debug, Clone)]
pub struct RequestInterceptor {
    store: CredentialStore,
}

impl RequestInterceptor {
    pub fn new(store: CredentialStore) -> Self {
        Self { store }
    }

    /// Add `Authorization: Bearer <auth_token>` and `X-CSRF-Token: <csrf_token>`
    /// for whichever records exist. Absent records leave the request untouched.
    ///
    /// A store failure is returned as-is; the caller must not send the request.
    pub async fn apply(&self, request: &mut ApiRequest) -> Result<(), StoreError> {
        if let Some(token) = self.store.get(AUTH_TOKEN_KEY).await? {
            set_header(&mut request.headers, AUTHORIZATION_HEADER, format!("Bearer {}", token));
        }

        if let Some(csrf) = self.store.get(CSRF_TOKEN_KEY).await? {
            set_header(&mut request.headers, CSRF_HEADER, csrf);
        }

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            authorized = request.headers.contains_key(AUTHORIZATION_HEADER),
            "Prepared request"
        );
        Ok(())
    }
}

/// Header names are case-insensitive on the wire, so drop any spelling of
/// `name` before inserting the canonical one.
fn set_header(headers: &mut Headers, name: &str, value: String) {
    headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
    headers.insert(name.to_string(), value);
}
