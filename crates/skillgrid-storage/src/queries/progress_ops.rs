//! Read-only reconciliation counts for the progress verifier.
//!
//! "Migrated" for a dependent kind is counted from the legacy side (does a
//! matching v2 row exist?), not by COUNT(*) of the v2 table — once the
//! application starts writing its own v2 rows, a raw count would lie.

use rusqlite::Connection;

use skillgrid_core::models::DependentKind;
use skillgrid_core::SkillsResult;

use crate::to_storage_err;

/// Total legacy skill rows.
pub fn total_skills(conn: &Connection) -> SkillsResult<u64> {
    count(conn, "SELECT COUNT(*) FROM skills")
}

/// Legacy skill rows with a ledger entry.
pub fn mapped_skills(conn: &Connection) -> SkillsResult<u64> {
    count(conn, "SELECT COUNT(*) FROM skill_migration_map")
}

/// Total legacy dependent rows of a kind.
pub fn total_dependents(conn: &Connection, kind: DependentKind) -> SkillsResult<u64> {
    let sql = match kind {
        DependentKind::Endorsements => "SELECT COUNT(*) FROM endorsements",
        DependentKind::Histories => "SELECT COUNT(*) FROM skill_histories",
    };
    count(conn, sql)
}

/// Legacy dependent rows of a kind that already have their v2 counterpart.
pub fn migrated_dependents(conn: &Connection, kind: DependentKind) -> SkillsResult<u64> {
    let sql = match kind {
        DependentKind::Endorsements => {
            "SELECT COUNT(*) FROM endorsements e
             JOIN skill_migration_map m ON m.old_skill_id = e.skill_id
             WHERE EXISTS (
                 SELECT 1 FROM endorsements_v2 v
                 WHERE v.user_skill_id = m.new_user_skill_id
                   AND v.created_at = e.created_at
             )"
        }
        DependentKind::Histories => {
            "SELECT COUNT(*) FROM skill_histories h
             JOIN skill_migration_map m ON m.old_skill_id = h.skill_id
             WHERE EXISTS (
                 SELECT 1 FROM skill_histories_v2 v
                 WHERE v.user_skill_id = m.new_user_skill_id
                   AND v.created_at = h.created_at
             )"
        }
    };
    count(conn, sql)
}

fn count(conn: &Connection, sql: &str) -> SkillsResult<u64> {
    let n: i64 = conn
        .query_row(sql, [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n as u64)
}
