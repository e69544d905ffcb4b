//! In-memory key-value substrate for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::StoreError;
use crate::traits::KeyValueStore;

/// In-memory [`KeyValueStore`] with switchable failures.
///
/// Clones share the same map, so a test can keep one handle to inspect raw
/// values while the code under test owns another.
///
/// # Example
///
/// ```ignore
/// use shipdesk::adapters::mock::InMemoryStore;
/// use shipdesk::auth::CredentialStore;
/// use std::sync::Arc;
///
/// let substrate = InMemoryStore::new();
/// let store = CredentialStore::new(Arc::new(substrate.clone()));
/// store.set("auth_token", "abc123").await?;
/// assert_eq!(substrate.raw("auth_token").as_deref(), Some("YWJjMTIz"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    read_should_fail: Arc<Mutex<bool>>,
    write_should_fail: Arc<Mutex<bool>>,
    remove_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure whether reads fail.
    pub fn set_read_should_fail(&self, should_fail: bool) {
        *self.read_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether writes fail.
    pub fn set_write_should_fail(&self, should_fail: bool) {
        *self.write_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether removals fail.
    pub fn set_remove_should_fail(&self, should_fail: bool) {
        *self.remove_should_fail.lock().unwrap() = should_fail;
    }

    /// The raw (encoded) value under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Insert a raw value, bypassing any encoding.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    /// Copy of the whole map.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if *self.read_should_fail.lock().unwrap() {
            return Err(StoreError::ReadFailed("Mock read failure".to_string()));
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if *self.write_should_fail.lock().unwrap() {
            return Err(StoreError::WriteFailed("Mock write failure".to_string()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        if *self.remove_should_fail.lock().unwrap() {
            return Err(StoreError::WriteFailed("Mock remove failure".to_string()));
        }
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        if *self.remove_should_fail.lock().unwrap() {
            return Err(StoreError::WriteFailed("Mock clear failure".to_string()));
        }
        self.entries.lock().unwrap().clear();
        Ok(())
    }
}
