//! Adapters - Implementations of port interfaces.
//!
//! - `storage` - Key-value stores (file, in-memory)
//! - `key_value` - Repositories persisted through a key-value store

pub mod key_value;
pub mod storage;

pub use key_value::{
    KeyValueAchievementRepository, KeyValueCycleRepository, KeyValueOnboardingRepository,
};
pub use storage::{open_key_value_store, FileKeyValueStore, InMemoryKeyValueStore};
