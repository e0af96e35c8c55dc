use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::error::{Result, StorageError};

/// Guard for a per-key write lock. The lock is released on drop.
pub type KeyGuard = OwnedMutexGuard<()>;

/// Per-key async write locks.
///
/// Lazily creates one lock per unique key and returns the same lock for
/// repeated lookups. Repositories hold a key's lock across a whole
/// read-modify-write cycle so concurrent writers on that key run one after
/// another instead of overwriting each other.
#[derive(Default)]
pub struct KeyLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_lock(&self, key: &str) -> Result<Arc<AsyncMutex<()>>> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| StorageError::Backend("key lock table poisoned".into()))?;
        Ok(locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone())
    }

    /// Acquire the lock for `key`, waiting until it becomes available.
    pub async fn lock(&self, key: &str) -> Result<KeyGuard> {
        let lock = self.get_lock(key)?;
        Ok(lock.lock_owned().await)
    }

    /// Try to acquire the lock for `key` without waiting.
    /// Returns `Ok(None)` if it is already held.
    pub fn try_lock(&self, key: &str) -> Result<Option<KeyGuard>> {
        let lock = self.get_lock(key)?;
        Ok(lock.try_lock_owned().ok())
    }
}
