//! Lookup and insert for skill templates.

use rusqlite::{params, Connection, OptionalExtension};

use skillgrid_core::models::{SkillTemplate, TemplateKey};
use skillgrid_core::SkillsResult;

use super::parse_dt;
use crate::to_storage_err;

/// Exact-match lookup on (name, category). Returns the lowest id when
/// duplicates exist so every caller resolves to the same canonical row.
pub fn find_template(conn: &Connection, key: &TemplateKey) -> SkillsResult<Option<i64>> {
    conn.query_row(
        "SELECT id FROM skill_templates
         WHERE name = ?1 AND category = ?2
         ORDER BY id ASC LIMIT 1",
        params![key.name, key.category],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Insert a new template with an empty description and
/// `is_recommended = false`. Returns the new id.
pub fn insert_template(conn: &Connection, key: &TemplateKey) -> SkillsResult<i64> {
    conn.execute(
        "INSERT INTO skill_templates (name, category, category_id, subcategory_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![key.name, key.category, key.category_id, key.subcategory_id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Get a template by id.
pub fn get_template(conn: &Connection, id: i64) -> SkillsResult<Option<SkillTemplate>> {
    let row = conn
        .query_row(
            "SELECT id, name, category, category_id, subcategory_id, description,
                    is_recommended, created_at, updated_at
             FROM skill_templates WHERE id = ?1",
            params![id],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<i64>>(3)?,
                    row.get::<_, Option<i64>>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, i64>(6)?,
                    row.get::<_, String>(7)?,
                    row.get::<_, String>(8)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let Some((id, name, category, category_id, subcategory_id, description, rec, created, updated)) =
        row
    else {
        return Ok(None);
    };

    Ok(Some(SkillTemplate {
        id,
        name,
        category,
        category_id,
        subcategory_id,
        description,
        is_recommended: rec != 0,
        created_at: parse_dt(&created)?,
        updated_at: parse_dt(&updated)?,
    }))
}

/// Total number of templates.
pub fn count_templates(conn: &Connection) -> SkillsResult<u64> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM skill_templates", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as u64)
}
