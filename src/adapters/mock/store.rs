//! In-memory secure store for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::session::StoreKey;
use crate::traits::{SecureStore, StoreError};

/// In-memory secure store with failure injection.
///
/// Clones share the same contents, so a test can keep a handle while the
/// code under test owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    values: Arc<Mutex<HashMap<StoreKey, String>>>,
    read_should_fail: Arc<Mutex<bool>>,
    write_should_fail: Arc<Mutex<bool>>,
    delete_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value synchronously (for test setup).
    pub fn insert(&self, key: StoreKey, value: &str) {
        self.values.lock().unwrap().insert(key, value.to_string());
    }

    /// Read a value synchronously (for assertions).
    pub fn value(&self, key: StoreKey) -> Option<String> {
        self.values.lock().unwrap().get(&key).cloned()
    }

    /// True when no key is present.
    pub fn is_empty(&self) -> bool {
        self.values.lock().unwrap().is_empty()
    }

    /// Configure whether reads should fail.
    pub fn set_read_should_fail(&self, should_fail: bool) {
        *self.read_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether writes should fail.
    pub fn set_write_should_fail(&self, should_fail: bool) {
        *self.write_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether deletes should fail.
    pub fn set_delete_should_fail(&self, should_fail: bool) {
        *self.delete_should_fail.lock().unwrap() = should_fail;
    }
}

#[async_trait]
impl SecureStore for InMemoryStore {
    async fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        if *self.read_should_fail.lock().unwrap() {
            return Err(StoreError::ReadFailed("Mock read failure".to_string()));
        }
        Ok(self.value(key))
    }

    async fn set(&self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        if *self.write_should_fail.lock().unwrap() {
            return Err(StoreError::WriteFailed("Mock write failure".to_string()));
        }
        self.insert(key, value);
        Ok(())
    }

    async fn delete(&self, key: StoreKey) -> Result<(), StoreError> {
        if *self.delete_should_fail.lock().unwrap() {
            return Err(StoreError::WriteFailed("Mock delete failure".to_string()));
        }
        self.values.lock().unwrap().remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let store = InMemoryStore::new();
        store.set(StoreKey::Username, "mo").await.unwrap();
        assert_eq!(store.get(StoreKey::Username).await.unwrap().as_deref(), Some("mo"));
        store.delete(StoreKey::Username).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_contents() {
        let store = InMemoryStore::new();
        let other = store.clone();
        store.insert(StoreKey::Bio, "x");
        assert_eq!(other.value(StoreKey::Bio).as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = InMemoryStore::new();
        store.set_read_should_fail(true);
        assert!(store.get(StoreKey::JwtToken).await.is_err());

        store.set_write_should_fail(true);
        assert!(store.set(StoreKey::JwtToken, "t").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_all_keeps_going_after_failure() {
        let store = InMemoryStore::new();
        store.insert(StoreKey::JwtToken, "t");
        store.set_delete_should_fail(true);
        assert!(store.delete_all().await.is_err());
        assert_eq!(store.value(StoreKey::JwtToken).as_deref(), Some("t"));
    }
}
