use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::MAX_BATCH_SIZE;

/// Migration-engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Legacy rows per batch. Clamped to [1, MAX_BATCH_SIZE].
    pub batch_size: usize,
    /// Caught row errors tolerated per batch before the run halts.
    pub max_row_errors: usize,
}

impl MigrationConfig {
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.clamp(1, MAX_BATCH_SIZE)
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            batch_size: defaults::DEFAULT_BATCH_SIZE,
            max_row_errors: defaults::DEFAULT_MAX_ROW_ERRORS,
        }
    }
}
