//! Key-Value Store Port - Interface for persisting serialized records.
//!
//! Values are stored as JSON documents under string keys. The typed
//! helpers on `dyn KeyValueStore` handle (de)serialization so adapters only
//! deal with raw text.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors that can occur during key-value storage operations
#[derive(Debug, thiserror::Error)]
pub enum KeyValueStoreError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Failed to serialize value for key '{key}': {reason}")]
    SerializationFailed { key: String, reason: String },

    #[error("Failed to deserialize value for key '{key}': {reason}")]
    DeserializationFailed { key: String, reason: String },

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<KeyValueStoreError> for DomainError {
    fn from(err: KeyValueStoreError) -> Self {
        let code = match err {
            KeyValueStoreError::DeserializationFailed { .. } => ErrorCode::DecodingError,
            _ => ErrorCode::StorageError,
        };
        DomainError::new(code, err.to_string())
    }
}

/// Port for raw key-value persistence
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// # Returns
    /// `None` if the key is absent
    async fn get_raw(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set_raw(&self, key: &str, value: String) -> Result<(), KeyValueStoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), KeyValueStoreError>;

    /// Check if a value exists under `key`.
    async fn contains(&self, key: &str) -> Result<bool, KeyValueStoreError>;
}

impl dyn KeyValueStore {
    /// Read and decode a JSON value.
    ///
    /// # Errors
    /// Returns `DeserializationFailed` if the stored text does not decode as `T`
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, KeyValueStoreError> {
        match self.get_raw(key).await? {
            Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| {
                KeyValueStoreError::DeserializationFailed {
                    key: key.to_string(),
                    reason: e.to_string(),
                }
            }),
            None => Ok(None),
        }
    }

    /// Encode a value as JSON and store it.
    pub async fn set_json<T: Serialize + Sync + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), KeyValueStoreError> {
        let raw = serde_json::to_string(value).map_err(|e| {
            KeyValueStoreError::SerializationFailed {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })?;
        self.set_raw(key, raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialization_failure_maps_to_decoding_error() {
        let err: DomainError = KeyValueStoreError::DeserializationFailed {
            key: "active_cycle".to_string(),
            reason: "expected value".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::DecodingError);
        assert!(err.message.contains("active_cycle"));
    }

    #[test]
    fn io_failure_maps_to_storage_error() {
        let err: DomainError = KeyValueStoreError::IoError("disk full".to_string()).into();
        assert_eq!(err.code, ErrorCode::StorageError);
    }

    #[test]
    fn key_value_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn KeyValueStore) {}
    }
}
