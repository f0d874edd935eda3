//! Insert and lookup for user_skills instances.

use rusqlite::{params, Connection, OptionalExtension};

use skillgrid_core::models::{LegacySkill, UserSkillInstance};
use skillgrid_core::SkillsResult;

use super::parse_dt;
use crate::to_storage_err;

/// Find the instance for a (user, template) pair, if one exists.
pub fn find_instance(conn: &Connection, user_id: i64, template_id: i64) -> SkillsResult<Option<i64>> {
    conn.query_row(
        "SELECT id FROM user_skills WHERE user_id = ?1 AND skill_template_id = ?2",
        params![user_id, template_id],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Insert a new instance, copying the legacy row's mutable state verbatim.
/// Returns the new id.
pub fn insert_from_legacy(
    conn: &Connection,
    legacy: &LegacySkill,
    template_id: i64,
) -> SkillsResult<i64> {
    conn.execute(
        "INSERT INTO user_skills (
            user_id, skill_template_id, level, certification, credly_link,
            notes, endorsement_count, certification_date, expiration_date,
            last_updated
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            legacy.user_id,
            template_id,
            legacy.level,
            legacy.certification,
            legacy.credly_link,
            legacy.notes,
            legacy.endorsement_count,
            legacy.certification_date,
            legacy.expiration_date,
            legacy.last_updated,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Get an instance by id.
pub fn get_instance(conn: &Connection, id: i64) -> SkillsResult<Option<UserSkillInstance>> {
    let row = conn
        .query_row(
            "SELECT id, user_id, skill_template_id, level, certification,
                    credly_link, notes, endorsement_count, certification_date,
                    expiration_date, last_updated, created_at
             FROM user_skills WHERE id = ?1",
            params![id],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, Option<String>>(5)?,
                    row.get::<_, Option<String>>(6)?,
                    row.get::<_, i64>(7)?,
                    row.get::<_, Option<String>>(8)?,
                    row.get::<_, Option<String>>(9)?,
                    row.get::<_, Option<String>>(10)?,
                    row.get::<_, String>(11)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let Some((
        id,
        user_id,
        skill_template_id,
        level,
        certification,
        credly_link,
        notes,
        endorsement_count,
        certification_date,
        expiration_date,
        last_updated,
        created_at,
    )) = row
    else {
        return Ok(None);
    };

    Ok(Some(UserSkillInstance {
        id,
        user_id,
        skill_template_id,
        level,
        certification,
        credly_link,
        notes,
        endorsement_count,
        certification_date,
        expiration_date,
        last_updated,
        created_at: parse_dt(&created_at)?,
    }))
}

/// Total number of instances.
pub fn count_instances(conn: &Connection) -> SkillsResult<u64> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM user_skills", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as u64)
}
