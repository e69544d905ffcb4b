//! Errors returned by the API client.

use std::fmt;

use super::category::ErrorCategory;
use super::store::StoreError;
use crate::traits::HttpError;

/// Message surfaced for HTTP 403.
pub const PERMISSION_DENIED_MESSAGE: &str = "You do not have permission to perform this action";

/// Message surfaced when no response was received.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Fallback message for error responses without a `message` field.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Rejection of an API call.
///
/// The first four variants are the response classifications; every one of
/// them has already been surfaced through the notifier (or the session-expired
/// event) by the time the caller sees it.
#[derive(Debug)]
pub enum ApiError {
    /// HTTP 401. Stored credentials have been purged.
    Unauthorized,

    /// HTTP 403.
    Forbidden,

    /// No response was received.
    NetworkUnavailable(HttpError),

    /// Any other non-2xx status.
    Server { status: u16, message: String },

    /// The credential store failed; the request was not sent.
    Credentials(StoreError),

    /// The request could not be built.
    InvalidRequest(String),

    /// A 2xx body did not match the expected shape.
    Decode(String),
}

impl ApiError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Unauthorized => ErrorCategory::Auth,
            ApiError::Forbidden => ErrorCategory::User,
            ApiError::NetworkUnavailable(_) => ErrorCategory::Network,
            ApiError::Server { status, .. } if *status >= 500 => ErrorCategory::Server,
            ApiError::Server { .. } => ErrorCategory::User,
            ApiError::Credentials(_) => ErrorCategory::System,
            ApiError::InvalidRequest(_) => ErrorCategory::Client,
            ApiError::Decode(_) => ErrorCategory::Server,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => {
                "You are not signed in or your session has expired. Please sign in again."
                    .to_string()
            }
            ApiError::Forbidden => PERMISSION_DENIED_MESSAGE.to_string(),
            ApiError::NetworkUnavailable(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Credentials(err) => format!("Stored credentials are unavailable: {}", err),
            ApiError::InvalidRequest(detail) => format!("The request could not be sent: {}", detail),
            ApiError::Decode(_) => {
                "Received an invalid response from the server. Please try again.".to_string()
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "Unauthorized (401)"),
            ApiError::Forbidden => write!(f, "Forbidden (403)"),
            ApiError::NetworkUnavailable(err) => write!(f, "Network unavailable: {}", err),
            ApiError::Server { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            ApiError::Credentials(err) => write!(f, "{}", err),
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::Decode(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::NetworkUnavailable(err) => Some(err),
            ApiError::Credentials(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Credentials(e)
    }
}
