//! v003: skill_migration_map — the append-only old-id → new-id ledger.

use rusqlite::Connection;

use skillgrid_core::SkillsResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> SkillsResult<()> {
    // old_skill_id is the natural key. No foreign keys: legacy ids may
    // reference rows removed by out-of-band cleanup long after mapping.
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS skill_migration_map (
            old_skill_id      INTEGER NOT NULL UNIQUE,
            new_user_skill_id INTEGER NOT NULL,
            migrated_at       TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_migration_map_new
            ON skill_migration_map(new_user_skill_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
