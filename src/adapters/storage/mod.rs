//! Storage Adapters
//!
//! Implementations of the KeyValueStore port.
//!
//! ## Available Adapters
//!
//! - **FileKeyValueStore** - Stores each key as a JSON file on disk
//! - **InMemoryKeyValueStore** - Stores values in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{open_key_value_store, InMemoryKeyValueStore};
//!
//! // Production: chosen from configuration
//! let store = open_key_value_store(&config.storage);
//!
//! // Testing: in-memory storage
//! let store = InMemoryKeyValueStore::new();
//! ```

mod file_key_value_store;
mod in_memory_key_value_store;

pub use file_key_value_store::FileKeyValueStore;
pub use in_memory_key_value_store::InMemoryKeyValueStore;

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};
use crate::ports::KeyValueStore;

/// Builds the key-value store selected by configuration.
pub fn open_key_value_store(config: &StorageConfig) -> Arc<dyn KeyValueStore> {
    match config.backend {
        StorageBackend::File => {
            tracing::info!(data_dir = %config.data_dir.display(), "Using file storage");
            Arc::new(FileKeyValueStore::new(&config.data_dir))
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage; nothing will be persisted");
            Arc::new(InMemoryKeyValueStore::new())
        }
    }
}
