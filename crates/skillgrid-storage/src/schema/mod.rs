//! Schema bootstrap: versioned, create-if-absent DDL for the migration
//! target tables, recorded in `schema_migrations`. Safe to run on every
//! engine startup; never drops or alters existing structures.
//!
//! The legacy tables (`skills`, `endorsements`, `skill_histories`) belong
//! to the pre-migration application and are never created here — only
//! verified to exist before a migrator touches them.

pub mod v001_skill_templates;
pub mod v002_user_skills;
pub mod v003_migration_map;
pub mod v004_dependent_tables;

use rusqlite::Connection;

use skillgrid_core::constants::LEGACY_TABLES;
use skillgrid_core::{MigrationError, SkillsResult, StorageError};

use crate::to_storage_err;

type BootstrapStep = fn(&Connection) -> SkillsResult<()>;

const STEPS: &[(u32, BootstrapStep)] = &[
    (1, v001_skill_templates::migrate),
    (2, v002_user_skills::migrate),
    (3, v003_migration_map::migrate),
    (4, v004_dependent_tables::migrate),
];

/// Run all pending bootstrap steps. A failure here is fatal for the run:
/// a missing target table makes every subsequent step unsafe.
pub fn run_bootstrap(conn: &Connection) -> SkillsResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    for (version, step) in STEPS {
        let applied: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM schema_migrations WHERE version = ?1)",
                [version],
                |row| row.get(0),
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        if applied {
            continue;
        }

        step(conn).map_err(|e| {
            StorageError::BootstrapFailed {
                version: *version,
                reason: e.to_string(),
            }
        })?;

        conn.execute(
            "INSERT INTO schema_migrations (version) VALUES (?1)",
            [version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::info!(version = *version, "applied schema bootstrap step");
    }

    Ok(())
}

/// Confirm the legacy source tables exist. Returns `SchemaMissing` (fatal)
/// otherwise: nothing downstream can proceed safely without them.
pub fn verify_legacy_schema(conn: &Connection) -> SkillsResult<()> {
    for table in LEGACY_TABLES {
        if !table_exists(conn, table)? {
            return Err(MigrationError::SchemaMissing {
                table: (*table).to_string(),
            }
            .into());
        }
    }
    Ok(())
}

/// Whether a table of the given name exists.
pub fn table_exists(conn: &Connection, name: &str) -> SkillsResult<bool> {
    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            [name],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(exists)
}
