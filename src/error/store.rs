//! Credential storage errors.

use thiserror::Error;

/// Failure of the credential store or its substrate.
///
/// Absence of a key is never an error; it is reported as `Ok(None)`.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The substrate could not be read.
    #[error("Failed to read credential store: {0}")]
    ReadFailed(String),

    /// The substrate could not be written.
    #[error("Failed to write credential store: {0}")]
    WriteFailed(String),

    /// A stored value could not be decoded back to its original text.
    #[error("Stored value for '{key}' is corrupted: {message}")]
    Corrupted { key: String, message: String },

    /// The storage location could not be determined.
    #[error("No home directory available for the credential store")]
    NoHomeDirectory,
}
