use serde::{Deserialize, Serialize};

/// The two structurally identical dependent-record kinds. Both migrate the
/// same way: translate the parent foreign key through the migration map,
/// copy the rest, dedup on (new parent id, original created_at).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependentKind {
    Endorsements,
    Histories,
}

impl DependentKind {
    pub const ALL: [DependentKind; 2] = [DependentKind::Endorsements, DependentKind::Histories];

    pub fn label(&self) -> &'static str {
        match self {
            DependentKind::Endorsements => "endorsements",
            DependentKind::Histories => "histories",
        }
    }

    /// Singular noun used in provenance notes.
    pub fn noun(&self) -> &'static str {
        match self {
            DependentKind::Endorsements => "endorsement",
            DependentKind::Histories => "history",
        }
    }
}

impl std::fmt::Display for DependentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Legacy endorsement row, referencing a legacy skill id.
/// `created_at` is opaque TEXT: it is the dedup key and must survive the
/// copy byte-for-byte.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyEndorsement {
    pub id: i64,
    pub skill_id: i64,
    pub user_id: i64,
    pub endorser_id: i64,
    pub comment: Option<String>,
    pub created_at: String,
}

/// Legacy skill-history row, referencing a legacy skill id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyHistory {
    pub id: i64,
    pub skill_id: i64,
    pub user_id: i64,
    pub previous_level: Option<String>,
    pub new_level: Option<String>,
    pub change_note: Option<String>,
    pub created_at: String,
}

/// A legacy dependent joined against the migration map: everything the
/// generic translate-FK-and-copy step needs to produce the v2 row.
#[derive(Debug, Clone)]
pub struct MigratableDependent {
    pub legacy_id: i64,
    pub new_user_skill_id: i64,
    pub user_id: i64,
    pub created_at: String,
    pub payload: DependentPayload,
}

/// Kind-specific fields of a dependent row.
#[derive(Debug, Clone)]
pub enum DependentPayload {
    Endorsement {
        endorser_id: i64,
        comment: Option<String>,
    },
    History {
        previous_level: Option<String>,
        new_level: Option<String>,
        change_note: Option<String>,
    },
}

impl MigratableDependent {
    pub fn kind(&self) -> DependentKind {
        match self.payload {
            DependentPayload::Endorsement { .. } => DependentKind::Endorsements,
            DependentPayload::History { .. } => DependentKind::Histories,
        }
    }
}
