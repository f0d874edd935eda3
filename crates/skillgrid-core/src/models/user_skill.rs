use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-user occurrence of a template carrying the mutable state copied
/// verbatim from the legacy row (level, certification, endorsements).
///
/// Invariant: at most one instance per (user_id, skill_template_id) pair,
/// backed by a UNIQUE constraint in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSkillInstance {
    pub id: i64,
    pub user_id: i64,
    pub skill_template_id: i64,
    pub level: Option<String>,
    pub certification: Option<String>,
    pub credly_link: Option<String>,
    pub notes: Option<String>,
    pub endorsement_count: i64,
    /// Copied verbatim from the legacy row, never parsed.
    pub certification_date: Option<String>,
    pub expiration_date: Option<String>,
    pub last_updated: Option<String>,
    pub created_at: DateTime<Utc>,
}
