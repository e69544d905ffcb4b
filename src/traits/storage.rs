//! Key-value substrate trait abstraction.
//!
//! The credential store persists its records through [`KeyValueStore`]. The
//! production substrate is a JSON file; tests use an in-memory map.

use async_trait::async_trait;

use crate::error::StoreError;

/// Trait for a persistent string key-value store.
///
/// All operations report substrate failures instead of hiding them.
/// Removing a key that does not exist is not an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// # Returns
    /// - `Ok(Some(value))` if the key exists
    /// - `Ok(None)` if it does not
    /// - `Err(error)` if the substrate could not be read
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Delete every key.
    async fn clear(&self) -> Result<(), StoreError>;
}
