use serde::{Deserialize, Serialize};

/// One row of the flat, denormalized `skills` table: one (user, skill)
/// pair with name and category stored inline as free text.
///
/// Immutable input to the migration. The engine only ever reads these rows;
/// deletion is an explicitly separate cleanup step that never runs here.
///
/// Date columns are opaque TEXT copied verbatim onto the new instance —
/// the engine never interprets them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacySkill {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub category: String,
    pub category_id: Option<i64>,
    pub subcategory_id: Option<i64>,
    pub level: Option<String>,
    pub certification: Option<String>,
    pub credly_link: Option<String>,
    pub notes: Option<String>,
    pub endorsement_count: i64,
    pub certification_date: Option<String>,
    pub expiration_date: Option<String>,
    pub last_updated: Option<String>,
}

impl LegacySkill {
    /// A row that cannot form a template key or belong to a user is a data
    /// anomaly: it is logged and left permanently unmigrated, never mapped.
    pub fn anomaly(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("blank skill name".to_string());
        }
        if self.category.trim().is_empty() {
            return Some("blank category".to_string());
        }
        if self.user_id <= 0 {
            return Some(format!("non-positive user id {}", self.user_id));
        }
        None
    }
}
