//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where progress records are kept
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Which key-value store backs the repositories
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory holding one JSON file per key (file backend only)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// Key-value store implementation
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

impl StorageConfig {
    /// Check if records survive a restart
    pub fn is_persistent(&self) -> bool {
        self.backend == StorageBackend::File
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_persistent() && self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyDataDir);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data/monarch-progress")
}
