//! Notification boundary.

use std::fmt;

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Fire-and-forget surface for transient user-facing messages.
///
/// Implementations must not block the caller and must not fail; delivery
/// problems are theirs to log.
pub trait Notifier: Send + Sync {
    /// Show `message` to the user.
    fn notify(&self, severity: Severity, message: &str);
}
