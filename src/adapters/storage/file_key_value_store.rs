//! File-based Key-Value Store Adapter
//!
//! Stores each key as a JSON document (`<key>.json`) inside a base
//! directory. Writes go to a temporary file first and are renamed into
//! place so a reader never sees a half-written record.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{KeyValueStore, KeyValueStoreError};

/// File-based storage for serialized records
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_path: PathBuf,
}

impl FileKeyValueStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// The directory is created lazily on first write.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileKeyValueStore::new("./data/monarch-progress");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the file path for a key
    fn key_path(&self, key: &str) -> Result<PathBuf, KeyValueStoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(KeyValueStoreError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }

    /// Ensure the base directory exists
    async fn ensure_dir(&self) -> Result<(), KeyValueStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| KeyValueStoreError::IoError(e.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let file_path = self.key_path(key)?;

        if !file_path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&file_path)
            .await
            .map_err(|e| KeyValueStoreError::IoError(e.to_string()))?;

        Ok(Some(raw))
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<(), KeyValueStoreError> {
        let file_path = self.key_path(key)?;
        self.ensure_dir().await?;

        let tmp_path = file_path.with_extension("json.tmp");
        fs::write(&tmp_path, value)
            .await
            .map_err(|e| KeyValueStoreError::IoError(e.to_string()))?;
        fs::rename(&tmp_path, &file_path)
            .await
            .map_err(|e| KeyValueStoreError::IoError(e.to_string()))?;

        tracing::debug!(key, path = %file_path.display(), "Wrote record");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        let file_path = self.key_path(key)?;

        if file_path.exists() {
            fs::remove_file(&file_path)
                .await
                .map_err(|e| KeyValueStoreError::IoError(e.to_string()))?;
        }

        Ok(())
    }

    async fn contains(&self, key: &str) -> Result<bool, KeyValueStoreError> {
        Ok(self.key_path(key)?.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        store
            .set_raw("active_cycle", "{\"a\":1}".to_string())
            .await
            .unwrap();

        let loaded = store.get_raw("active_cycle").await.unwrap();
        assert_eq!(loaded, Some("{\"a\":1}".to_string()));
        assert!(temp_dir.path().join("active_cycle.json").exists());
    }

    #[tokio::test]
    async fn test_file_store_missing_key_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        assert_eq!(store.get_raw("archived_cycles").await.unwrap(), None);
        assert!(!store.contains("archived_cycles").await.unwrap());
    }

    #[tokio::test]
    async fn test_file_store_creates_nested_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("data");
        let store = FileKeyValueStore::new(&base);

        store.set_raw("k", "v".to_string()).await.unwrap();

        assert!(base.join("k.json").exists());
        assert!(!base.join("k.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_store_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        store.set_raw("k", "first".to_string()).await.unwrap();
        store.set_raw("k", "second".to_string()).await.unwrap();

        assert_eq!(store.get_raw("k").await.unwrap(), Some("second".to_string()));
    }

    #[tokio::test]
    async fn test_file_store_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        store.set_raw("k", "v".to_string()).await.unwrap();
        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();

        assert!(!store.contains("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_file_store_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        let result = store.set_raw("../escape", "x".to_string()).await;
        assert!(matches!(result, Err(KeyValueStoreError::InvalidKey(_))));

        let result = store.get_raw("").await;
        assert!(matches!(result, Err(KeyValueStoreError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_file_store_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();

        FileKeyValueStore::new(temp_dir.path())
            .set_raw("onboarding_completed", "true".to_string())
            .await
            .unwrap();

        let reopened = FileKeyValueStore::new(temp_dir.path());
        assert_eq!(
            reopened.get_raw("onboarding_completed").await.unwrap(),
            Some("true".to_string())
        );
    }
}
