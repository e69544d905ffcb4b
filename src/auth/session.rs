//! Session endpoints: login, refresh and logout.
//!
//! These go through the same interceptor pipeline as every other call, so a
//! 401 from `/auth/refresh` purges the session like any other 401.

use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiRequest};
use crate::error::{ApiError, ApiResult};
use crate::session::SessionEvent;
use crate::traits::Method;

use super::store::{AUTH_TOKEN_KEY, CSRF_TOKEN_KEY, REFRESH_TOKEN_KEY};

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /auth/refresh`.
#[derive(Debug, Clone, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Response from `POST /auth/login` and `POST /auth/refresh`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default, alias = "csrfToken")]
    pub csrf_token: Option<String>,
}

impl ApiClient {
    /// Exchange email and password for session credentials and store them.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<TokenResponse> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ApiError::InvalidRequest("email is required".to_string()));
        }

        let tokens: TokenResponse = self
            .post_json("/auth/login", &LoginRequest { email, password })
            .await?;
        self.store_tokens(&tokens).await?;

        tracing::info!("Logged in");
        self.session_events().publish(SessionEvent::Established);
        Ok(tokens)
    }

    /// Trade the stored refresh token for fresh credentials.
    ///
    /// Without a stored refresh token this returns [`ApiError::Unauthorized`]
    /// and the server is never contacted.
    pub async fn refresh_session(&self) -> ApiResult<TokenResponse> {
        let refresh_token = match self.credentials().get(REFRESH_TOKEN_KEY).await? {
            Some(token) => token,
            None => {
                tracing::debug!("No refresh token stored");
                return Err(ApiError::Unauthorized);
            }
        };

        let tokens: TokenResponse = self
            .post_json(
                "/auth/refresh",
                &RefreshRequest {
                    refresh_token: &refresh_token,
                },
            )
            .await?;
        self.store_tokens(&tokens).await?;

        tracing::info!("Session refreshed");
        Ok(tokens)
    }

    /// End the session. The server is told on a best-effort basis and its
    /// failures are not shown to the user; the local records are cleared
    /// whatever it answers.
    pub async fn logout(&self) -> ApiResult<()> {
        let request = ApiRequest::with_json(Method::Post, "/auth/logout", &serde_json::json!({}))?;
        if let Err(e) = self.send(request.quiet()).await {
            tracing::debug!("Server-side logout failed: {}", e);
        }

        let purged = self.credentials().purge_session().await;
        tracing::info!("Logged out");
        self.session_events().publish(SessionEvent::Ended);
        purged.map_err(ApiError::from)
    }

    async fn store_tokens(&self, tokens: &TokenResponse) -> ApiResult<()> {
        let store = self.credentials();
        store.set(AUTH_TOKEN_KEY, &tokens.token).await?;
        if let Some(refresh) = &tokens.refresh_token {
            store.set(REFRESH_TOKEN_KEY, refresh).await?;
        }
        if let Some(csrf) = &tokens.csrf_token {
            store.set(CSRF_TOKEN_KEY, csrf).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryStore, MockHttpClient, MockResponse, RecordingNotifier};
    use crate::auth::store::{CredentialStore, SESSION_KEYS};
    use crate::config::ApiConfig;
    use crate::traits::HttpError;
    use std::sync::Arc;

    fn client() -> (ApiClient, MockHttpClient, InMemoryStore) {
        let (client, transport, substrate, _) = client_with_notifier();
        (client, transport, substrate)
    }

    fn client_with_notifier() -> (ApiClient, MockHttpClient, InMemoryStore, RecordingNotifier) {
        let transport = MockHttpClient::new();
        let substrate = InMemoryStore::new();
        let notifier = RecordingNotifier::new();
        let client = ApiClient::new(
            ApiConfig::default().with_base_url("https://api.test"),
            Arc::new(transport.clone()),
            CredentialStore::new(Arc::new(substrate.clone())),
            Arc::new(notifier.clone()),
        );
        (client, transport, substrate, notifier)
    }

    #[test]
    fn test_token_response_deserialize() {
        let json = r#"{"token": "t-1", "refresh_token": "r-1", "csrf_token": "c-1"}"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.token, "t-1");
        assert_eq!(response.refresh_token.as_deref(), Some("r-1"));
        assert_eq!(response.csrf_token.as_deref(), Some("c-1"));
    }

    #[test]
    fn test_token_response_minimal() {
        let response: TokenResponse = serde_json::from_str(r#"{"access_token": "t-2"}"#).unwrap();
        assert_eq!(response.token, "t-2");
        assert!(response.refresh_token.is_none());
        assert!(response.csrf_token.is_none());
    }

    #[tokio::test]
    async fn test_login_stores_tokens_and_publishes() {
        let (client, transport, _) = client();
        transport.set_response(
            "https://api.test/auth/login",
            MockResponse::json(
                200,
                serde_json::json!({"token": "abc123", "refresh_token": "r-1", "csrf_token": "c-1"}),
            ),
        );
        let mut rx = client.subscribe_session();

        client.login("ops@example.com", "hunter2").await.unwrap();

        let store = client.credentials();
        assert_eq!(store.get(AUTH_TOKEN_KEY).await.unwrap().as_deref(), Some("abc123"));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).await.unwrap().as_deref(), Some("r-1"));
        assert_eq!(store.get(CSRF_TOKEN_KEY).await.unwrap().as_deref(), Some("c-1"));
        assert_eq!(rx.try_recv().unwrap(), SessionEvent::Established);

        let requests = transport.get_requests();
        assert_eq!(
            requests[0].body.as_deref(),
            Some(r#"{"email":"ops@example.com","password":"hunter2"}"#)
        );
    }

    #[tokio::test]
    async fn test_login_rejects_blank_email() {
        let (client, transport, _) = client();
        let result = client.login("  ", "pw").await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_without_token_skips_server() {
        let (client, transport, _) = client();
        let result = client.refresh_session().await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_replaces_auth_token() {
        let (client, transport, _) = client();
        client.credentials().set(AUTH_TOKEN_KEY, "old").await.unwrap();
        client.credentials().set(REFRESH_TOKEN_KEY, "r-1").await.unwrap();
        transport.set_response(
            "https://api.test/auth/refresh",
            MockResponse::json(200, serde_json::json!({"token": "new"})),
        );

        client.refresh_session().await.unwrap();

        let store = client.credentials();
        assert_eq!(store.get(AUTH_TOKEN_KEY).await.unwrap().as_deref(), Some("new"));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).await.unwrap().as_deref(), Some("r-1"));
        let requests = transport.get_requests();
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"refresh_token":"r-1"}"#));
        assert_eq!(
            requests[0].headers.get("Authorization").map(String::as_str),
            Some("Bearer old")
        );
    }

    #[tokio::test]
    async fn test_refresh_rejected_purges_session() {
        let (client, transport, _) = client();
        for key in SESSION_KEYS {
            client.credentials().set(key, "stale").await.unwrap();
        }
        transport.set_response("https://api.test/auth/refresh", MockResponse::status(401));
        let mut rx = client.subscribe_session();

        let result = client.refresh_session().await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
        assert_eq!(client.credentials().get(REFRESH_TOKEN_KEY).await.unwrap(), None);
        assert!(matches!(rx.try_recv(), Ok(SessionEvent::Expired { .. })));
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_offline() {
        let (client, transport, substrate, notifier) = client_with_notifier();
        for key in SESSION_KEYS {
            client.credentials().set(key, "v").await.unwrap();
        }
        transport.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));
        let mut rx = client.subscribe_session();

        client.logout().await.unwrap();

        assert!(substrate.snapshot().is_empty());
        assert_eq!(rx.try_recv().unwrap(), SessionEvent::Ended);
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test]
    async fn test_logout_server_error_is_not_shown() {
        let (client, transport, _, notifier) = client_with_notifier();
        transport.set_default_response(MockResponse::json(
            500,
            serde_json::json!({"message": "logout failed"}),
        ));

        client.logout().await.unwrap();

        assert_eq!(transport.request_count(), 1);
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test]
    async fn test_logout_reports_purge_failure() {
        let (client, transport, substrate) = client();
        transport.set_default_response(MockResponse::status(204));
        substrate.set_remove_should_fail(true);

        let result = client.logout().await;
        assert!(matches!(result, Err(ApiError::Credentials(_))));
    }
}
