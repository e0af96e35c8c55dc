//! FileStorage - one JSON file per key inside a root directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::StorageBackend;
use crate::error::{Result, StorageError};

const EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Directory-backed storage.
///
/// Each key maps to `<root>/<key>.json`. Writes go to a sibling temp file
/// which is then renamed over the target, so a value is replaced atomically.
/// The root directory is created on the first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if !is_valid_key(key) {
            return Err(StorageError::io(key, "invalid key: only [A-Za-z0-9_-] allowed"));
        }
        Ok(self.root.join(format!("{key}.{EXTENSION}")))
    }

    async fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            let msg = match e.kind() {
                ErrorKind::PermissionDenied => {
                    format!("permission denied: cannot create directory {:?}", self.root)
                }
                _ => format!("failed to create directory {:?}: {}", self.root, e),
            };
            StorageError::Backend(msg)
        })
    }
}

/// Keys are restricted to `[A-Za-z0-9_-]` so they map onto plain file names.
fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[async_trait]
impl StorageBackend for FileStorage {
    async fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            // An empty file is treated as never written.
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(e) => match e.kind() {
                ErrorKind::NotFound => Ok(None),
                ErrorKind::PermissionDenied => Err(StorageError::io(
                    key,
                    format!("permission denied: cannot read {:?}", path),
                )),
                _ => Err(StorageError::io(key, format!("failed to read {:?}: {}", path, e))),
            },
        }
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<()> {
        let path = self.path_for(key)?;
        self.ensure_root().await?;

        let tmp = path.with_extension(format!("{EXTENSION}.{TMP_SUFFIX}"));
        fs::write(&tmp, value.as_bytes()).await.map_err(|e| {
            let msg = match e.kind() {
                ErrorKind::PermissionDenied => format!("permission denied: cannot write {:?}", tmp),
                _ => format!("failed to write {:?}: {}", tmp, e),
            };
            StorageError::io(key, msg)
        })?;

        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StorageError::io(
                key,
                format!("failed to replace {:?}: {}", path, e),
            ));
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(key, format!("failed to delete {:?}: {}", path, e))),
        }
    }

    async fn clear(&self) -> Result<()> {
        for key in self.keys().await? {
            self.remove(&key).await?;
        }
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut dir = match fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::Backend(format!(
                    "failed to list {:?}: {}",
                    self.root, e
                )))
            }
        };

        let mut keys = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| StorageError::Backend(format!("failed to list {:?}: {}", self.root, e)))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            // Other `.json` files in the directory are not ours.
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) if is_valid_key(stem) => keys.push(stem.to_string()),
                _ => {}
            }
        }
        keys.sort();
        Ok(keys)
    }
}
