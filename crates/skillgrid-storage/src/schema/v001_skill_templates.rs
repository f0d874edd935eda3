//! v001: skill_templates — canonical deduplicated skill definitions.

use rusqlite::Connection;

use skillgrid_core::SkillsResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> SkillsResult<()> {
    // (name, category) is deliberately NOT unique at the database level:
    // deduplication is the resolver's lookup-before-insert. The index only
    // serves the lookup.
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS skill_templates (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            name           TEXT NOT NULL,
            category       TEXT NOT NULL,
            category_id    INTEGER,
            subcategory_id INTEGER,
            description    TEXT NOT NULL DEFAULT '',
            is_recommended INTEGER NOT NULL DEFAULT 0,
            created_at     TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at     TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_templates_name_category
            ON skill_templates(name, category);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
