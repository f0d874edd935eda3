//! v004: endorsements_v2, skill_histories_v2 — dependent rows keyed by
//! the new instance ids.

use rusqlite::Connection;

use skillgrid_core::SkillsResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> SkillsResult<()> {
    // (user_skill_id, created_at) is the dedup key for re-migration; the
    // surrogate id exists because the legacy id is not carried over.
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS endorsements_v2 (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            user_skill_id INTEGER NOT NULL
                          REFERENCES user_skills(id) ON DELETE CASCADE,
            user_id       INTEGER NOT NULL,
            endorser_id   INTEGER NOT NULL,
            comment       TEXT,
            created_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_endorsements_v2_dedup
            ON endorsements_v2(user_skill_id, created_at);

        CREATE TABLE IF NOT EXISTS skill_histories_v2 (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            user_skill_id  INTEGER NOT NULL
                           REFERENCES user_skills(id) ON DELETE CASCADE,
            user_id        INTEGER NOT NULL,
            previous_level TEXT,
            new_level      TEXT,
            change_note    TEXT,
            created_at     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_histories_v2_dedup
            ON skill_histories_v2(user_skill_id, created_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
