use serde::{Deserialize, Serialize};

use super::DependentKind;

/// Read-only reconciliation report: the operational dashboard and the
/// termination oracle for orchestration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationReport {
    pub skills: SkillProgress,
    pub dependents: Vec<DependentProgress>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SkillProgress {
    pub total: u64,
    pub mapped: u64,
    pub remaining: u64,
    pub completion_pct: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DependentProgress {
    pub kind: DependentKind,
    pub total: u64,
    pub migrated: u64,
    pub remaining: u64,
}

impl MigrationReport {
    /// Migration is complete when nothing remains for skills or any
    /// dependent kind.
    pub fn is_complete(&self) -> bool {
        self.skills.remaining == 0 && self.dependents.iter().all(|d| d.remaining == 0)
    }
}

impl SkillProgress {
    pub fn new(total: u64, mapped: u64) -> Self {
        let remaining = total.saturating_sub(mapped);
        let completion_pct = if total == 0 {
            100.0
        } else {
            mapped as f64 / total as f64 * 100.0
        };
        Self {
            total,
            mapped,
            remaining,
            completion_pct,
        }
    }
}

impl DependentProgress {
    pub fn new(kind: DependentKind, total: u64, migrated: u64) -> Self {
        Self {
            kind,
            total,
            migrated,
            remaining: total.saturating_sub(migrated),
        }
    }
}
