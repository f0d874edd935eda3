use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical, deduplicated definition of a skill shared across users.
///
/// Invariant: at most one template per (name, category) pair, enforced by
/// lookup-before-insert in the resolver rather than a database constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillTemplate {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub category_id: Option<i64>,
    pub subcategory_id: Option<i64>,
    pub description: String,
    pub is_recommended: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The lookup key the resolver deduplicates on, plus the optional
/// reference ids carried onto a template when one has to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateKey {
    pub name: String,
    pub category: String,
    pub category_id: Option<i64>,
    pub subcategory_id: Option<i64>,
}

impl TemplateKey {
    pub fn from_legacy(skill: &super::LegacySkill) -> Self {
        Self {
            name: skill.name.clone(),
            category: skill.category.clone(),
            category_id: skill.category_id,
            subcategory_id: skill.subcategory_id,
        }
    }
}
