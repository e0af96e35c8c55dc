//! StorageService - typed handle over a `StorageBackend`.

use std::fmt;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use super::{InMemoryStorage, KeyGuard, KeyLocks, StorageBackend};
use crate::error::{Result, StorageError};

/// Typed storage handle shared by the repositories.
///
/// Constructed once and passed explicitly to every repository. Clones share
/// the backend and the key locks.
#[derive(Clone)]
pub struct StorageService {
    backend: Arc<dyn StorageBackend>,
    locks: Arc<KeyLocks>,
}

impl StorageService {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self::from_arc(Arc::new(backend))
    }

    pub fn from_arc(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            locks: Arc::new(KeyLocks::new()),
        }
    }

    /// A service over a fresh `InMemoryStorage`.
    pub fn in_memory() -> Self {
        Self::new(InMemoryStorage::new())
    }

    pub fn backend(&self) -> &dyn StorageBackend {
        self.backend.as_ref()
    }

    /// Get the value stored under `key`, deserialized. Returns None if the key
    /// was never set.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.backend.get_raw(key).await? else {
            debug!(key, "storage miss");
            return Ok(None);
        };
        let value = serde_json::from_str(&raw).map_err(|e| StorageError::serde(key, e))?;
        debug!(key, bytes = raw.len(), "storage hit");
        Ok(Some(value))
    }

    /// Serialize `value` and store it under `key`.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).map_err(|e| StorageError::serde(key, e))?;
        debug!(key, bytes = raw.len(), "storage write");
        self.backend.set_raw(key, raw).await
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        debug!(key, "storage remove");
        self.backend.remove(key).await
    }

    /// Remove every key. Waits for in-flight writes on the stored keys;
    /// locks are taken in sorted key order.
    pub async fn clear(&self) -> Result<()> {
        let mut keys = self.backend.keys().await?;
        keys.sort();
        let mut guards = Vec::with_capacity(keys.len());
        for key in &keys {
            guards.push(self.locks.lock(key).await?);
        }

        self.backend.clear().await?;
        info!(keys = keys.len(), "storage cleared");
        Ok(())
    }

    pub async fn keys(&self) -> Result<Vec<String>> {
        self.backend.keys().await
    }

    /// Acquire the write lock for `key`. Held for the duration of a
    /// read-modify-write cycle.
    pub async fn lock(&self, key: &str) -> Result<KeyGuard> {
        self.locks.lock(key).await
    }
}

impl fmt::Debug for StorageService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Shelf {
        name: String,
        books: Vec<String>,
    }

    #[tokio::test]
    async fn typed_round_trip() {
        let storage = StorageService::in_memory();
        let shelf = Shelf {
            name: "physics".into(),
            books: vec!["Feynman Lectures".into()],
        };

        storage.set("shelf", &shelf).await.unwrap();
        let loaded: Option<Shelf> = storage.get("shelf").await.unwrap();
        assert_eq!(loaded, Some(shelf));
    }

    #[tokio::test]
    async fn clear_waits_for_key_lock() {
        let storage = StorageService::in_memory();
        storage.set("shelf", &vec!["old"]).await.unwrap();

        let guard = storage.lock("shelf").await.unwrap();
        let clearing = tokio::spawn({
            let storage = storage.clone();
            async move { storage.clear().await }
        });
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(!clearing.is_finished());

        // A write finishing under the lock is cleared afterwards, not resurrected.
        storage.set("shelf", &vec!["new"]).await.unwrap();
        drop(guard);
        clearing.await.unwrap().unwrap();

        let loaded: Option<Vec<String>> = storage.get("shelf").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn missing_key_is_absent_not_error() {
        let storage = StorageService::in_memory();
        let loaded: Option<Vec<String>> = storage.get("nope").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn empty_collection_is_not_absent() {
        let storage = StorageService::in_memory();
        storage.set("ids", &Vec::<String>::new()).await.unwrap();
        let loaded: Option<Vec<String>> = storage.get("ids").await.unwrap();
        assert_eq!(loaded, Some(Vec::new()));
    }

    #[tokio::test]
    async fn wrong_shape_is_serde_error() {
        let storage = StorageService::in_memory();
        storage.set("ids", &42).await.unwrap();

        let err = storage.get::<Vec<String>>("ids").await.unwrap_err();
        assert!(matches!(err, StorageError::Serde { ref key, .. } if key == "ids"));
    }

    #[tokio::test]
    async fn remove_and_clear() {
        let storage = StorageService::in_memory();
        storage.set("a", &1).await.unwrap();
        storage.set("b", &2).await.unwrap();

        storage.remove("a").await.unwrap();
        assert!(storage.get::<i32>("a").await.unwrap().is_none());
        assert_eq!(storage.get::<i32>("b").await.unwrap(), Some(2));

        storage.clear().await.unwrap();
        assert!(storage.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clones_share_backend_and_locks() {
        let storage = StorageService::in_memory();
        let clone = storage.clone();

        storage.set("k", &"v").await.unwrap();
        assert_eq!(clone.get::<String>("k").await.unwrap().as_deref(), Some("v"));

        let _guard = storage.lock("k").await.unwrap();
        assert!(clone.locks.try_lock("k").unwrap().is_none());
    }
}
