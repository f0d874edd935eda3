//! Read-only reconciliation: source counts vs mapped counts vs dependent
//! counts. No side effects; safe to run at any point during migration.

use skillgrid_core::models::{DependentKind, DependentProgress, MigrationReport, SkillProgress};
use skillgrid_core::SkillsResult;

use skillgrid_storage::queries::progress_ops;
use skillgrid_storage::StorageEngine;

pub struct ProgressVerifier;

impl ProgressVerifier {
    /// Build the reconciliation report. Doubles as the termination oracle:
    /// `report.is_complete()` means remaining == 0 everywhere.
    pub fn report(engine: &StorageEngine) -> SkillsResult<MigrationReport> {
        engine.with_reader(|conn| {
            let skills = SkillProgress::new(
                progress_ops::total_skills(conn)?,
                progress_ops::mapped_skills(conn)?,
            );

            let mut dependents = Vec::with_capacity(DependentKind::ALL.len());
            for kind in DependentKind::ALL {
                dependents.push(DependentProgress::new(
                    kind,
                    progress_ops::total_dependents(conn, kind)?,
                    progress_ops::migrated_dependents(conn, kind)?,
                ));
            }

            Ok(MigrationReport { skills, dependents })
        })
    }
}
