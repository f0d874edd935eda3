//! Legacy-schema DDL and row seeders for integration tests.
//!
//! The legacy tables belong to the pre-migration application; the engine
//! only ever reads them, so tests create and populate them here. Helpers
//! panic on failure — they are test support, not production code.

use rusqlite::{params, Connection};

use skillgrid_core::models::LegacySkill;

/// Create the legacy `skills`, `endorsements`, and `skill_histories`
/// tables the engine treats as read-only inputs.
pub fn create_legacy_schema(conn: &Connection) {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS skills (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id            INTEGER NOT NULL,
            name               TEXT NOT NULL,
            category           TEXT NOT NULL,
            category_id        INTEGER,
            subcategory_id     INTEGER,
            level              TEXT,
            certification      TEXT,
            credly_link        TEXT,
            notes              TEXT,
            endorsement_count  INTEGER NOT NULL DEFAULT 0,
            certification_date TEXT,
            expiration_date    TEXT,
            last_updated       TEXT
        );

        CREATE TABLE IF NOT EXISTS endorsements (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            skill_id    INTEGER NOT NULL,
            user_id     INTEGER NOT NULL,
            endorser_id INTEGER NOT NULL,
            comment     TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS skill_histories (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            skill_id       INTEGER NOT NULL,
            user_id        INTEGER NOT NULL,
            previous_level TEXT,
            new_level      TEXT,
            change_note    TEXT,
            created_at     TEXT NOT NULL
        );
        ",
    )
    .expect("create legacy schema");
}

/// Build a plausible legacy skill row. `id` 0 lets SQLite assign one.
pub fn make_legacy_skill(user_id: i64, name: &str, category: &str) -> LegacySkill {
    LegacySkill {
        id: 0,
        user_id,
        name: name.to_string(),
        category: category.to_string(),
        category_id: Some(1),
        subcategory_id: None,
        level: Some("Intermediate".to_string()),
        certification: None,
        credly_link: None,
        notes: Some("seeded".to_string()),
        endorsement_count: 0,
        certification_date: None,
        expiration_date: None,
        last_updated: Some("2024-03-01T09:00:00Z".to_string()),
    }
}

/// Insert a legacy skill row; returns the assigned id.
pub fn insert_legacy_skill(conn: &Connection, skill: &LegacySkill) -> i64 {
    conn.execute(
        "INSERT INTO skills (
            user_id, name, category, category_id, subcategory_id, level,
            certification, credly_link, notes, endorsement_count,
            certification_date, expiration_date, last_updated
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            skill.user_id,
            skill.name,
            skill.category,
            skill.category_id,
            skill.subcategory_id,
            skill.level,
            skill.certification,
            skill.credly_link,
            skill.notes,
            skill.endorsement_count,
            skill.certification_date,
            skill.expiration_date,
            skill.last_updated,
        ],
    )
    .expect("insert legacy skill");
    conn.last_insert_rowid()
}

/// Shorthand: seed a skill with just the identifying fields.
pub fn seed_skill(conn: &Connection, user_id: i64, name: &str, category: &str) -> i64 {
    insert_legacy_skill(conn, &make_legacy_skill(user_id, name, category))
}

/// Insert a legacy endorsement; returns the assigned id.
pub fn insert_endorsement(
    conn: &Connection,
    skill_id: i64,
    user_id: i64,
    endorser_id: i64,
    comment: Option<&str>,
    created_at: &str,
) -> i64 {
    conn.execute(
        "INSERT INTO endorsements (skill_id, user_id, endorser_id, comment, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![skill_id, user_id, endorser_id, comment, created_at],
    )
    .expect("insert endorsement");
    conn.last_insert_rowid()
}

/// Insert a legacy history row; returns the assigned id.
pub fn insert_history(
    conn: &Connection,
    skill_id: i64,
    user_id: i64,
    previous_level: Option<&str>,
    new_level: Option<&str>,
    change_note: Option<&str>,
    created_at: &str,
) -> i64 {
    conn.execute(
        "INSERT INTO skill_histories
            (skill_id, user_id, previous_level, new_level, change_note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            skill_id,
            user_id,
            previous_level,
            new_level,
            change_note,
            created_at
        ],
    )
    .expect("insert history");
    conn.last_insert_rowid()
}
