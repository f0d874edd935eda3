use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    pub db_path: PathBuf,
    /// Number of read-only connections in the read pool.
    pub read_pool_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(defaults::DEFAULT_DB_PATH),
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
        }
    }
}
