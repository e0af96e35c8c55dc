//! StorageBackend - Abstract key/value medium for serialized values.

use async_trait::async_trait;

use crate::error::Result;

/// Abstract key/value storage holding JSON text.
///
/// Implementations perform no retries and know nothing about the shape of
/// the values they hold. A single `set_raw` must replace the previous value
/// atomically: a reader observes either the old or the new text, never a mix.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Get the text stored under `key`. Returns None if the key was never set
    /// (or has been removed).
    async fn get_raw(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set_raw(&self, key: &str, value: String) -> Result<()>;

    /// Delete `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Delete every key.
    async fn clear(&self) -> Result<()>;

    /// List the keys currently present, in no particular order.
    async fn keys(&self) -> Result<Vec<String>>;
}
