//! Drives the whole migration to exhaustion: instance sweeps until the
//! anti-join stops shrinking, then dependent batches until dry, then the
//! verifier's verdict. Replaces the by-hand sequencing of one-off scripts.

use uuid::Uuid;

use skillgrid_core::config::MigrationConfig;
use skillgrid_core::models::{BatchOutcome, BatchParams, DependentKind, RunSummary};
use skillgrid_core::traits::IMigrationMap;
use skillgrid_core::SkillsResult;

use skillgrid_storage::StorageEngine;

use crate::dependents::DependentMigrator;
use crate::instance::InstanceMigrator;
use crate::verifier::ProgressVerifier;

pub struct MigrationRunner;

impl MigrationRunner {
    /// Run instance and dependent migration until no pass makes progress.
    ///
    /// Terminates rather than spins when only anomalous rows remain: a
    /// sweep that fails to shrink the unmigrated set ends the instance
    /// phase, and the verifier's remaining counts tell the operator what
    /// is left to investigate by hand.
    pub fn run_to_exhaustion(
        engine: &StorageEngine,
        config: &MigrationConfig,
    ) -> SkillsResult<RunSummary> {
        engine.verify_legacy_schema()?;

        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("migration_run", %run_id);
        let _guard = span.enter();

        let batch_size = config.effective_batch_size();
        let mut summary = RunSummary::default();

        let mut remaining = engine.unmigrated_ids(None)?.len();
        let mut first_sweep = true;
        while remaining > 0 {
            let sweep = Self::sweep_instances(engine, batch_size, config, &mut summary)?;
            summary.instances_created += sweep.created;
            // Later sweeps re-count every already-mapped row as skipped;
            // only the first sweep's figure means "collapsed onto an
            // existing instance".
            if first_sweep {
                summary.instances_reused = sweep.skipped_existing;
                first_sweep = false;
            }
            summary.anomalies = sweep.anomalies;

            let now_remaining = engine.unmigrated_ids(None)?.len();
            if now_remaining >= remaining {
                tracing::warn!(
                    remaining = now_remaining,
                    "instance sweep made no progress; leaving remainder for operators"
                );
                break;
            }
            remaining = now_remaining;
        }

        for kind in DependentKind::ALL {
            loop {
                let outcome = DependentMigrator::migrate(engine, kind, batch_size)?;
                match kind {
                    DependentKind::Endorsements => {
                        summary.endorsements_migrated += outcome.migrated
                    }
                    DependentKind::Histories => summary.histories_migrated += outcome.migrated,
                }
                if outcome.migrated == 0 {
                    break;
                }
            }
        }

        let report = ProgressVerifier::report(engine)?;
        summary.complete = report.is_complete();

        tracing::info!(
            instance_batches = summary.instance_batches,
            instances_created = summary.instances_created,
            instances_reused = summary.instances_reused,
            anomalies = summary.anomalies,
            endorsements_migrated = summary.endorsements_migrated,
            histories_migrated = summary.histories_migrated,
            complete = summary.complete,
            "run finished"
        );
        Ok(summary)
    }

    /// One full pass over the legacy table in batch_size pages.
    fn sweep_instances(
        engine: &StorageEngine,
        batch_size: usize,
        config: &MigrationConfig,
        summary: &mut RunSummary,
    ) -> SkillsResult<BatchOutcome> {
        let mut sweep = BatchOutcome::default();
        let mut offset = 0;
        loop {
            let outcome = InstanceMigrator::migrate_batch(
                engine,
                &BatchParams {
                    batch_size,
                    offset,
                    max_row_errors: config.max_row_errors,
                },
            )?;
            summary.instance_batches += 1;
            sweep.processed += outcome.processed;
            sweep.created += outcome.created;
            sweep.skipped_existing += outcome.skipped_existing;
            sweep.anomalies += outcome.anomalies;
            sweep.row_errors += outcome.row_errors;

            if outcome.processed < batch_size {
                break;
            }
            offset += batch_size;
        }
        Ok(sweep)
    }
}
