//! Response classification and its side effects.
//!
//! Exactly one branch runs per response, in this order: 401, 403, no response,
//! any other non-2xx status, success.

use std::sync::Arc;

use crate::auth::store::CredentialStore;
use crate::error::{
    ApiError, GENERIC_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE, PERMISSION_DENIED_MESSAGE,
};
use crate::session::{SessionEvent, SessionEvents};
use crate::traits::{HttpError, Notifier, Response, Severity};

/// Classification of a completed call.
#[derive(Debug)]
pub enum ResponseOutcome {
    Success(Response),
    Unauthorized,
    Forbidden,
    NetworkUnavailable(HttpError),
    OtherError { status: u16, message: String },
}

impl ResponseOutcome {
    /// Classify the result of a transport call. Pure; performs no side effects.
    pub fn classify(result: Result<Response, HttpError>) -> Self {
        let response = match result {
            Ok(response) => response,
            Err(err) => return ResponseOutcome::NetworkUnavailable(err),
        };

        let status = response.status;
        match status {
            401 => ResponseOutcome::Unauthorized,
            403 => ResponseOutcome::Forbidden,
            _ if response.is_success() => ResponseOutcome::Success(response),
            _ => ResponseOutcome::OtherError {
                status,
                message: error_message(&response).unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
            },
        }
    }
}

/// The `message` field of a JSON error payload, if there is a non-empty one.
fn error_message(response: &Response) -> Option<String> {
    let payload: serde_json::Value = response.json().ok()?;
    payload
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Acts on a [`ResponseOutcome`]: purges the session on 401, notifies the user
/// otherwise, and turns every failure into a rejection.
#[derive(Clone)]
pub struct ResponseInterceptor {
    store: CredentialStore,
    notifier: Arc<dyn Notifier>,
    session: SessionEvents,
    login_path: String,
}

impl ResponseInterceptor {
    pub fn new(
        store: CredentialStore,
        notifier: Arc<dyn Notifier>,
        session: SessionEvents,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            store,
            notifier,
            session,
            login_path: login_path.into(),
        }
    }

    /// Classify `result` and run the side effects of its branch.
    pub async fn handle(&self, result: Result<Response, HttpError>) -> Result<Response, ApiError> {
        self.resolve(result, true).await
    }

    /// Like [`handle`](Self::handle) but failures are only logged. A 401
    /// still purges the session and publishes the expiry event.
    pub async fn handle_quietly(
        &self,
        result: Result<Response, HttpError>,
    ) -> Result<Response, ApiError> {
        self.resolve(result, false).await
    }

    async fn resolve(
        &self,
        result: Result<Response, HttpError>,
        notify: bool,
    ) -> Result<Response, ApiError> {
        let (message, error) = match ResponseOutcome::classify(result) {
            ResponseOutcome::Success(response) => return Ok(response),
            ResponseOutcome::Unauthorized => {
                tracing::warn!("Session rejected (401); purging stored credentials");
                if let Err(e) = self.store.purge_session().await {
                    tracing::warn!("Credential purge incomplete: {}", e);
                }
                self.session.publish(SessionEvent::Expired {
                    login_path: self.login_path.clone(),
                });
                return Err(ApiError::Unauthorized);
            }
            ResponseOutcome::Forbidden => {
                tracing::warn!("Request forbidden (403)");
                (PERMISSION_DENIED_MESSAGE.to_string(), ApiError::Forbidden)
            }
            ResponseOutcome::NetworkUnavailable(err) => {
                tracing::warn!("No response received: {}", err);
                (NETWORK_ERROR_MESSAGE.to_string(), ApiError::NetworkUnavailable(err))
            }
            ResponseOutcome::OtherError { status, message } => {
                tracing::warn!(status, "Request failed: {}", message);
                (message.clone(), ApiError::Server { status, message })
            }
        };

        if notify {
            self.notifier.notify(Severity::Error, &message);
        } else {
            tracing::debug!("Notification suppressed: {}", message);
        }
        Err(error)
    }
}

impl std::fmt::Debug for ResponseInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseInterceptor")
            .field("login_path", &self.login_path)
            .finish_non_exhaustive()
    }
}
