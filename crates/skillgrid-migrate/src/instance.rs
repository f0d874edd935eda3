//! The instance migrator: turns unmigrated legacy rows into (template,
//! instance, map entry) triples, one local transaction per row.

use rusqlite::Connection;

use skillgrid_core::models::{BatchOutcome, BatchParams, LegacySkill, TemplateKey};
use skillgrid_core::{MigrationError, SkillsResult};

use skillgrid_storage::queries::{instance_ops, legacy_ops, map_ops};
use skillgrid_storage::StorageEngine;

use crate::resolver::TemplateResolver;
use crate::store_err;

/// What happened to a single legacy row inside its transaction.
enum RowOutcome {
    /// New instance created and mapped.
    Created,
    /// Mapped onto an instance that already existed for (user, template) —
    /// two differently-spelled-but-equal legacy rows collapsing onto one.
    ReusedExisting,
}

pub struct InstanceMigrator;

impl InstanceMigrator {
    /// Migrate one batch of legacy rows, selected in stable ascending-id
    /// order starting at the advisory `offset`.
    ///
    /// Already-mapped rows are counted as `skipped_existing` and not
    /// touched, so re-invoking with the same or a later offset is safe.
    /// The authoritative "what remains" is always the anti-join against
    /// the map (`IMigrationMap::unmigrated_ids`), never a stored cursor.
    pub fn migrate_batch(engine: &StorageEngine, params: &BatchParams) -> SkillsResult<BatchOutcome> {
        engine
            .pool()
            .writer
            .with_conn_sync(|conn| Self::migrate_batch_on(conn, params))
    }

    fn migrate_batch_on(conn: &Connection, params: &BatchParams) -> SkillsResult<BatchOutcome> {
        let page = legacy_ops::fetch_page(conn, params.batch_size, params.offset)?;
        let mut outcome = BatchOutcome::default();

        for skill in &page {
            outcome.processed += 1;

            if map_ops::is_migrated(conn, skill.id)? {
                outcome.skipped_existing += 1;
                continue;
            }

            if let Some(reason) = skill.anomaly() {
                let err = MigrationError::DataAnomaly {
                    old_id: skill.id,
                    reason,
                };
                tracing::warn!(old_id = skill.id, error = %err, "legacy row left unmigrated");
                outcome.anomalies += 1;
                continue;
            }

            match Self::migrate_row(conn, skill) {
                Ok(RowOutcome::Created) => outcome.created += 1,
                Ok(RowOutcome::ReusedExisting) => outcome.skipped_existing += 1,
                Err(e) => {
                    // Rolled back; the row stays unmigrated and is picked
                    // up on the next pass. Never marked as skipped.
                    tracing::warn!(old_id = skill.id, error = %e, "row transaction failed");
                    outcome.row_errors += 1;
                    if outcome.row_errors > params.max_row_errors {
                        return Err(MigrationError::RowErrorBudgetExhausted {
                            errors: outcome.row_errors,
                            budget: params.max_row_errors,
                        }
                        .into());
                    }
                }
            }
        }

        tracing::info!(
            offset = params.offset,
            processed = outcome.processed,
            created = outcome.created,
            skipped_existing = outcome.skipped_existing,
            anomalies = outcome.anomalies,
            row_errors = outcome.row_errors,
            "instance batch done"
        );
        Ok(outcome)
    }

    /// Template resolve + instance upsert + map write, all-or-nothing. A
    /// crash mid-row never leaves a mapped-but-instance-less state or the
    /// reverse.
    fn migrate_row(conn: &Connection, skill: &LegacySkill) -> SkillsResult<RowOutcome> {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| store_err(format!("migrate_row begin: {e}")))?;

        match Self::migrate_row_inner(&tx, skill) {
            Ok(row_outcome) => {
                tx.commit()
                    .map_err(|e| store_err(format!("migrate_row commit: {e}")))?;
                Ok(row_outcome)
            }
            Err(e) => {
                let _ = tx.rollback();
                Err(e)
            }
        }
    }

    fn migrate_row_inner(conn: &Connection, skill: &LegacySkill) -> SkillsResult<RowOutcome> {
        let template_id = TemplateResolver::resolve(conn, &TemplateKey::from_legacy(skill))?;

        let (instance_id, created) =
            match instance_ops::find_instance(conn, skill.user_id, template_id)? {
                Some(existing) => (existing, false),
                None => (
                    instance_ops::insert_from_legacy(conn, skill, template_id)?,
                    true,
                ),
            };

        // A duplicate here means another pass already mapped this row;
        // success either way.
        let _ = map_ops::record_mapping(conn, skill.id, instance_id)?;

        Ok(if created {
            RowOutcome::Created
        } else {
            RowOutcome::ReusedExisting
        })
    }
}
