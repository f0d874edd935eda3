//! Read-only access to the legacy `skills` table. Nothing in this module
//! (or anywhere else in the engine) writes to it.

use rusqlite::{params, Connection, Row};

use skillgrid_core::models::LegacySkill;
use skillgrid_core::SkillsResult;

use crate::to_storage_err;

/// Fetch a page of legacy skills in stable ascending-id order.
///
/// The page is not anti-joined: already-mapped rows are returned and the
/// migrator counts them as skipped, so re-running a batch over the same
/// offset reports what it found rather than silently shrinking.
pub fn fetch_page(conn: &Connection, batch_size: usize, offset: usize) -> SkillsResult<Vec<LegacySkill>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, user_id, name, category, category_id, subcategory_id,
                    level, certification, credly_link, notes, endorsement_count,
                    certification_date, expiration_date, last_updated
             FROM skills
             ORDER BY id ASC
             LIMIT ?1 OFFSET ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![batch_size as i64, offset as i64], row_to_legacy_skill)
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(rows)
}

/// Total number of legacy skill rows.
pub fn count_skills(conn: &Connection) -> SkillsResult<u64> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM skills", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as u64)
}

fn row_to_legacy_skill(row: &Row<'_>) -> rusqlite::Result<LegacySkill> {
    Ok(LegacySkill {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        category: row.get(3)?,
        category_id: row.get(4)?,
        subcategory_id: row.get(5)?,
        level: row.get(6)?,
        certification: row.get(7)?,
        credly_link: row.get(8)?,
        notes: row.get(9)?,
        endorsement_count: row.get(10)?,
        certification_date: row.get(11)?,
        expiration_date: row.get(12)?,
        last_updated: row.get(13)?,
    })
}
