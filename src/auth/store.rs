//! Credential store adapter.
//!
//! Records are base64-encoded before they reach the substrate and decoded on
//! the way back. The encoding is reversible obfuscation, not encryption.

use base64::{engine::general_purpose::STANDARD, Engine};
use std::sync::Arc;

use crate::error::StoreError;
use crate::traits::KeyValueStore;

/// Key of the bearer token record.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Key of the refresh token record.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Key of the CSRF token record.
pub const CSRF_TOKEN_KEY: &str = "csrf_token";

/// Every record that belongs to a session.
pub const SESSION_KEYS: [&str; 3] = [AUTH_TOKEN_KEY, REFRESH_TOKEN_KEY, CSRF_TOKEN_KEY];

/// Keyed secret storage over a [`KeyValueStore`].
#[derive(Clone)]
pub struct CredentialStore {
    substrate: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(substrate: Arc<dyn KeyValueStore>) -> Self {
        Self { substrate }
    }

    /// Store `value` under `key`.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.substrate.set(key, &encode(value)).await
    }

    /// Retrieve the value stored under `key`.
    ///
    /// `Ok(None)` means the key is absent. A value that no longer decodes is
    /// reported as [`StoreError::Corrupted`], never as absence.
    pub async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.substrate.get(key).await? {
            Some(raw) => decode(key, &raw).map(Some),
            None => Ok(None),
        }
    }

    /// Delete `key`. Deleting an absent key succeeds.
    pub async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.substrate.remove(key).await
    }

    /// Delete every record.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.substrate.clear().await
    }

    /// Delete the session records, attempting every key even if one fails.
    ///
    /// Returns the first failure, if any.
    pub async fn purge_session(&self) -> Result<(), StoreError> {
        let mut first_error = None;
        for key in SESSION_KEYS {
            if let Err(e) = self.remove(key).await {
                tracing::warn!("Failed to remove credential '{}': {}", key, e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}

fn encode(value: &str) -> String {
    STANDARD.encode(value.as_bytes())
}

fn decode(key: &str, raw: &str) -> Result<String, StoreError> {
    let bytes = STANDARD.decode(raw).map_err(|e| StoreError::Corrupted {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| StoreError::Corrupted {
        key: key.to_string(),
        message: e.to_string(),
    })
}
