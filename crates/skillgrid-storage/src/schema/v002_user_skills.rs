//! v002: user_skills — per-user template instances.

use rusqlite::Connection;

use skillgrid_core::SkillsResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> SkillsResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS user_skills (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id            INTEGER NOT NULL,
            skill_template_id  INTEGER NOT NULL
                               REFERENCES skill_templates(id) ON DELETE CASCADE,
            level              TEXT,
            certification      TEXT,
            credly_link        TEXT,
            notes              TEXT,
            endorsement_count  INTEGER NOT NULL DEFAULT 0,
            certification_date TEXT,
            expiration_date    TEXT,
            last_updated       TEXT,
            created_at         TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            UNIQUE (user_id, skill_template_id)
        );

        CREATE INDEX IF NOT EXISTS idx_user_skills_user ON user_skills(user_id);
        CREATE INDEX IF NOT EXISTS idx_user_skills_template ON user_skills(skill_template_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
