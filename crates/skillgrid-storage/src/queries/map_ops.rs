//! The migration-map ledger: the single source of truth for "has this
//! legacy row been migrated".

use rusqlite::{params, Connection, OptionalExtension};

use skillgrid_core::models::{MapWrite, MigrationMapEntry};
use skillgrid_core::{MigrationError, SkillsResult};

use super::parse_dt;
use crate::to_storage_err;

/// Whether a ledger entry exists for the legacy id.
pub fn is_migrated(conn: &Connection, old_id: i64) -> SkillsResult<bool> {
    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM skill_migration_map WHERE old_skill_id = ?1)",
            params![old_id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(exists)
}

/// Append a ledger entry. INSERT OR IGNORE against the unique old_skill_id:
/// a duplicate is "already migrated, safe to ignore", which is what keeps
/// overlapping runs idempotent.
pub fn record_mapping(conn: &Connection, old_id: i64, new_id: i64) -> SkillsResult<MapWrite> {
    let rows = conn
        .execute(
            "INSERT OR IGNORE INTO skill_migration_map (old_skill_id, new_user_skill_id)
             VALUES (?1, ?2)",
            params![old_id, new_id],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(if rows == 0 {
        MapWrite::AlreadyMapped
    } else {
        MapWrite::Inserted
    })
}

/// Legacy skill ids with no ledger entry, ascending. The anti-join behind
/// resumption: what remains is recomputed from data, never from a cursor.
pub fn unmigrated_ids(conn: &Connection, limit: Option<usize>) -> SkillsResult<Vec<i64>> {
    let limit = limit.map(|n| n as i64).unwrap_or(-1);
    let mut stmt = conn
        .prepare(
            "SELECT s.id FROM skills s
             WHERE NOT EXISTS (
                 SELECT 1 FROM skill_migration_map m WHERE m.old_skill_id = s.id
             )
             ORDER BY s.id ASC
             LIMIT ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let ids = stmt
        .query_map(params![limit], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<i64>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(ids)
}

/// Translate a legacy foreign key, failing with `MissingParentMapping`
/// when the parent has not been migrated yet. Callers treat that error as
/// skip-and-retry-later, never as fatal.
pub fn require_mapping(conn: &Connection, old_id: i64) -> SkillsResult<i64> {
    conn.query_row(
        "SELECT new_user_skill_id FROM skill_migration_map WHERE old_skill_id = ?1",
        params![old_id],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))?
    .ok_or_else(|| MigrationError::MissingParentMapping { old_id }.into())
}

/// Get the ledger entry for a legacy id.
pub fn get_mapping(conn: &Connection, old_id: i64) -> SkillsResult<Option<MigrationMapEntry>> {
    let row = conn
        .query_row(
            "SELECT old_skill_id, new_user_skill_id, migrated_at
             FROM skill_migration_map WHERE old_skill_id = ?1",
            params![old_id],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let Some((old_skill_id, new_user_skill_id, migrated_at)) = row else {
        return Ok(None);
    };

    Ok(Some(MigrationMapEntry {
        old_skill_id,
        new_user_skill_id,
        migrated_at: parse_dt(&migrated_at)?,
    }))
}
