pub mod defaults;
pub mod migration_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use migration_config::MigrationConfig;
pub use storage_config::StorageConfig;

use crate::errors::{SkillsError, SkillsResult};

/// Top-level engine configuration, loaded from a TOML file. Missing
/// sections and fields fall back to defaults; CLI flags override both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillgridConfig {
    pub storage: StorageConfig,
    pub migration: MigrationConfig,
}

impl SkillgridConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> SkillsResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| SkillsError::Config(format!("{}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_BATCH_SIZE;

    #[test]
    fn defaults_apply_when_sections_missing() {
        let config: SkillgridConfig = toml::from_str("").unwrap();
        assert_eq!(config.migration.batch_size, defaults::DEFAULT_BATCH_SIZE);
        assert_eq!(config.storage.read_pool_size, defaults::DEFAULT_READ_POOL_SIZE);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let config: SkillgridConfig = toml::from_str("[migration]\nbatch_size = 50\n").unwrap();
        assert_eq!(config.migration.batch_size, 50);
        assert_eq!(
            config.migration.max_row_errors,
            defaults::DEFAULT_MAX_ROW_ERRORS
        );
    }

    #[test]
    fn batch_size_is_clamped() {
        let config = MigrationConfig {
            batch_size: 100_000,
            ..Default::default()
        };
        assert_eq!(config.effective_batch_size(), MAX_BATCH_SIZE);
    }
}
