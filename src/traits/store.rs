//! Secure key-value store abstraction.
//!
//! The on-device credential store is modelled as a capability with explicit
//! `get`/`set`/`delete` over an enumerated key set. Nothing outside
//! [`crate::session`] talks to it directly.

use async_trait::async_trait;
use thiserror::Error;

use crate::session::StoreKey;

/// Credential store failures.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Backing storage could not be read
    #[error("Failed to read secure store: {0}")]
    ReadFailed(String),

    /// Backing storage could not be written
    #[error("Failed to write secure store: {0}")]
    WriteFailed(String),

    /// Stored data is not in the expected format
    #[error("Secure store data is corrupt: {0}")]
    Corrupt(String),

    /// Store location could not be determined
    #[error("Secure store unavailable: {0}")]
    Unavailable(String),
}

/// Trait for the on-device secure key-value store.
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key is absent.
    async fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: StoreKey, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key is not an error.
    async fn delete(&self, key: StoreKey) -> Result<(), StoreError>;

    /// Remove every known key.
    ///
    /// Keeps going after a failed delete and reports the first failure.
    async fn delete_all(&self) -> Result<(), StoreError> {
        let mut first_error = None;
        for key in StoreKey::ALL {
            if let Err(e) = self.delete(key).await {
                tracing::warn!("Failed to delete {}: {}", key, e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
