//! Error category classification for unified error handling.

use std::fmt;

/// High-level categorization of errors, used for log fields and the recovery
/// hint printed next to the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// No response reached us (connection, DNS, timeout).
    Network,

    /// The session is no longer valid; the user must sign in again.
    Auth,

    /// Backend/server-side errors (HTTP 5xx, malformed payloads).
    Server,

    /// Client-side errors (bad URL, unserializable body).
    Client,

    /// The user asked for something they cannot do or sent invalid input
    /// (HTTP 403, other 4xx).
    User,

    /// Local credential storage failed.
    System,
}

impl ErrorCategory {
    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Auth => "Sign in again to continue",
            ErrorCategory::Server => {
                "The server may be experiencing issues. Please try again later"
            }
            ErrorCategory::Client => "Check the request path and the configured API URL",
            ErrorCategory::User => "Please check your input and try again",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
