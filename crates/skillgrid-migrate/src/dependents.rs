//! Generic dependent-record migrator: translate the parent foreign key
//! through the migration map, copy the rest, append a provenance note.
//! Endorsements and histories are the two instances of the same shape.

use rusqlite::Connection;

use skillgrid_core::models::{DependentKind, DependentOutcome, MigratableDependent};
use skillgrid_core::SkillsResult;

use skillgrid_storage::queries::dependent_ops;
use skillgrid_storage::StorageEngine;

use crate::store_err;

pub struct DependentMigrator;

impl DependentMigrator {
    /// Migrate one batch of dependents of the given kind. Must run after
    /// the instance migrator has mapped the relevant parents: a dependent
    /// whose parent is unmapped is skipped and retried later, never an
    /// error.
    pub fn migrate(
        engine: &StorageEngine,
        kind: DependentKind,
        batch_size: usize,
    ) -> SkillsResult<DependentOutcome> {
        engine
            .pool()
            .writer
            .with_conn_sync(|conn| Self::migrate_on(conn, kind, batch_size))
    }

    fn migrate_on(
        conn: &Connection,
        kind: DependentKind,
        batch_size: usize,
    ) -> SkillsResult<DependentOutcome> {
        let mut outcome = DependentOutcome {
            skipped_unmapped: dependent_ops::unmapped_count(conn, kind)? as usize,
            ..Default::default()
        };

        let batch = dependent_ops::fetch_migratable(conn, kind, batch_size)?;
        for dep in &batch {
            match Self::migrate_one(conn, dep) {
                Ok(()) => outcome.migrated += 1,
                Err(e) => {
                    tracing::warn!(
                        kind = %kind,
                        legacy_id = dep.legacy_id,
                        error = %e,
                        "dependent transaction failed"
                    );
                    outcome.row_errors += 1;
                }
            }
        }

        tracing::info!(
            kind = %kind,
            migrated = outcome.migrated,
            skipped_unmapped = outcome.skipped_unmapped,
            row_errors = outcome.row_errors,
            "dependent batch done"
        );
        Ok(outcome)
    }

    /// Each dependent-row translation is its own transaction.
    fn migrate_one(conn: &Connection, dep: &MigratableDependent) -> SkillsResult<()> {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| store_err(format!("migrate_one begin: {e}")))?;

        let provenance = format!("[migrated from {} {}]", dep.kind().noun(), dep.legacy_id);
        match dependent_ops::insert_migrated(&tx, dep, &provenance) {
            Ok(()) => tx
                .commit()
                .map_err(|e| store_err(format!("migrate_one commit: {e}"))),
            Err(e) => {
                let _ = tx.rollback();
                Err(e)
            }
        }
    }
}
