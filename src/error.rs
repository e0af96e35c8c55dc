use thiserror::Error;

/// Error type for storage and repository write operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The value under `key` could not be serialized or deserialized.
    #[error("storage serialization error for {key}: {message}")]
    Serde { key: String, message: String },
    /// The backend failed to read, write or delete `key`.
    #[error("storage I/O error for {key}: {message}")]
    Io { key: String, message: String },
    /// Any other backend fault (poisoned lock, unusable root directory, ...).
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    pub(crate) fn serde(key: &str, err: serde_json::Error) -> Self {
        StorageError::Serde {
            key: key.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn io(key: &str, err: impl ToString) -> Self {
        StorageError::Io {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
