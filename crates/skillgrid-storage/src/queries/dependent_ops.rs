//! Dependent-record queries: select legacy endorsements/histories whose
//! parent is mapped and not yet copied, and insert the translated v2 rows.
//!
//! `created_at` travels as raw TEXT end to end. The dedup anti-join
//! compares it byte-for-byte against the v2 column, so it must be copied,
//! never reformatted.

use rusqlite::{params, Connection};

use skillgrid_core::models::{DependentKind, DependentPayload, MigratableDependent};
use skillgrid_core::SkillsResult;

use crate::to_storage_err;

/// Fetch legacy dependents ready to migrate: parent has a map entry and no
/// v2 row exists for (new parent id, original created_at).
pub fn fetch_migratable(
    conn: &Connection,
    kind: DependentKind,
    limit: usize,
) -> SkillsResult<Vec<MigratableDependent>> {
    match kind {
        DependentKind::Endorsements => fetch_migratable_endorsements(conn, limit),
        DependentKind::Histories => fetch_migratable_histories(conn, limit),
    }
}

/// Insert the translated v2 row. The provenance note referencing the
/// legacy id is appended to the free-text field.
pub fn insert_migrated(
    conn: &Connection,
    dep: &MigratableDependent,
    provenance: &str,
) -> SkillsResult<()> {
    match &dep.payload {
        DependentPayload::Endorsement {
            endorser_id,
            comment,
        } => {
            conn.execute(
                "INSERT INTO endorsements_v2
                    (user_skill_id, user_id, endorser_id, comment, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    dep.new_user_skill_id,
                    dep.user_id,
                    endorser_id,
                    append_note(comment.as_deref(), provenance),
                    dep.created_at,
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        }
        DependentPayload::History {
            previous_level,
            new_level,
            change_note,
        } => {
            conn.execute(
                "INSERT INTO skill_histories_v2
                    (user_skill_id, user_id, previous_level, new_level, change_note, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    dep.new_user_skill_id,
                    dep.user_id,
                    previous_level,
                    new_level,
                    append_note(change_note.as_deref(), provenance),
                    dep.created_at,
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        }
    }
    Ok(())
}

/// Legacy dependents whose parent skill has no map entry yet. These are
/// skipped and retried on a later invocation.
pub fn unmapped_count(conn: &Connection, kind: DependentKind) -> SkillsResult<u64> {
    let sql = match kind {
        DependentKind::Endorsements => {
            "SELECT COUNT(*) FROM endorsements e
             WHERE NOT EXISTS (
                 SELECT 1 FROM skill_migration_map m WHERE m.old_skill_id = e.skill_id
             )"
        }
        DependentKind::Histories => {
            "SELECT COUNT(*) FROM skill_histories h
             WHERE NOT EXISTS (
                 SELECT 1 FROM skill_migration_map m WHERE m.old_skill_id = h.skill_id
             )"
        }
    };
    let count: i64 = conn
        .query_row(sql, [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as u64)
}

fn append_note(text: Option<&str>, provenance: &str) -> String {
    match text {
        Some(t) if !t.is_empty() => format!("{t} {provenance}"),
        _ => provenance.to_string(),
    }
}

fn fetch_migratable_endorsements(
    conn: &Connection,
    limit: usize,
) -> SkillsResult<Vec<MigratableDependent>> {
    let mut stmt = conn
        .prepare(
            "SELECT e.id, m.new_user_skill_id, e.user_id, e.created_at,
                    e.endorser_id, e.comment
             FROM endorsements e
             JOIN skill_migration_map m ON m.old_skill_id = e.skill_id
             WHERE NOT EXISTS (
                 SELECT 1 FROM endorsements_v2 v
                 WHERE v.user_skill_id = m.new_user_skill_id
                   AND v.created_at = e.created_at
             )
             ORDER BY e.id ASC
             LIMIT ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(MigratableDependent {
                legacy_id: row.get(0)?,
                new_user_skill_id: row.get(1)?,
                user_id: row.get(2)?,
                created_at: row.get(3)?,
                payload: DependentPayload::Endorsement {
                    endorser_id: row.get(4)?,
                    comment: row.get(5)?,
                },
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(rows)
}

fn fetch_migratable_histories(
    conn: &Connection,
    limit: usize,
) -> SkillsResult<Vec<MigratableDependent>> {
    let mut stmt = conn
        .prepare(
            "SELECT h.id, m.new_user_skill_id, h.user_id, h.created_at,
                    h.previous_level, h.new_level, h.change_note
             FROM skill_histories h
             JOIN skill_migration_map m ON m.old_skill_id = h.skill_id
             WHERE NOT EXISTS (
                 SELECT 1 FROM skill_histories_v2 v
                 WHERE v.user_skill_id = m.new_user_skill_id
                   AND v.created_at = h.created_at
             )
             ORDER BY h.id ASC
             LIMIT ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(MigratableDependent {
                legacy_id: row.get(0)?,
                new_user_skill_id: row.get(1)?,
                user_id: row.get(2)?,
                created_at: row.get(3)?,
                payload: DependentPayload::History {
                    previous_level: row.get(4)?,
                    new_level: row.get(5)?,
                    change_note: row.get(6)?,
                },
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(rows)
}
