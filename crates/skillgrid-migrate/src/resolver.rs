//! Find-or-create for canonical skill templates: the deduplication
//! authority.

use rusqlite::Connection;

use skillgrid_core::models::TemplateKey;
use skillgrid_core::SkillsResult;

use skillgrid_storage::queries::template_ops;

pub struct TemplateResolver;

impl TemplateResolver {
    /// Exact-match lookup on (name, category); on miss, insert a new
    /// template with an empty description and `is_recommended = false`.
    ///
    /// Not safe under concurrent workers: two callers can both miss the
    /// lookup and both insert, leaving duplicate templates. The engine is
    /// single-worker by design; running it in parallel requires a unique
    /// index on (name, category) with upsert-on-conflict, or a per-key
    /// advisory lock.
    pub fn resolve(conn: &Connection, key: &TemplateKey) -> SkillsResult<i64> {
        if let Some(id) = template_ops::find_template(conn, key)? {
            return Ok(id);
        }

        let id = template_ops::insert_template(conn, key)?;
        tracing::debug!(
            template_id = id,
            name = %key.name,
            category = %key.category,
            "created template"
        );
        Ok(id)
    }
}
