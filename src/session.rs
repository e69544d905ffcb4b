//! Session lifecycle events.
//!
//! The API client never navigates anywhere itself. When the server rejects the
//! session it publishes [`SessionEvent::Expired`] on a tokio broadcast channel
//! and the hosting application decides what "go to the login page" means.

use tokio::sync::broadcast;

/// Default capacity of the session event channel.
const SESSION_CHANNEL_CAPACITY: usize = 16;

/// An event about the authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Credentials were accepted and stored.
    Established,
    /// The server answered 401; credentials have been purged and the host
    /// should replace its current location with `login_path`.
    Expired { login_path: String },
    /// The user logged out.
    Ended,
}

/// Publisher side of the session channel, owned by the API client.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    pub fn new() -> Self {
        Self::with_capacity(SESSION_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to future events. Events published before the call are not
    /// delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. Having no subscriber is not an error.
    pub fn publish(&self, event: SessionEvent) {
        match self.tx.send(event) {
            Ok(receivers) => tracing::debug!("Session event delivered to {} subscriber(s)", receivers),
            Err(broadcast::error::SendError(event)) => {
                tracing::debug!("No subscriber for session event {:?}", event)
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}
