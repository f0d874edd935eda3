//! End-to-end: the runner drives instances then dependents to exhaustion
//! and stops cleanly when only anomalous rows remain.

use skillgrid_core::config::MigrationConfig;
use skillgrid_core::traits::IMigrationMap;
use skillgrid_migrate::{MigrationRunner, ProgressVerifier};
use skillgrid_storage::StorageEngine;

fn engine_with_legacy() -> StorageEngine {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .pool()
        .writer
        .with_conn_sync(|conn| {
            test_fixtures::create_legacy_schema(conn);
            Ok(())
        })
        .unwrap();
    engine
}

fn small_batches() -> MigrationConfig {
    MigrationConfig {
        batch_size: 3,
        max_row_errors: 25,
    }
}

#[test]
fn run_migrates_everything() {
    let engine = engine_with_legacy();
    engine
        .pool()
        .writer
        .with_conn_sync(|conn| {
            for i in 0..10 {
                let skill = test_fixtures::seed_skill(
                    conn,
                    (i % 4) + 1,
                    &format!("Skill {i}"),
                    "General",
                );
                test_fixtures::insert_endorsement(
                    conn,
                    skill,
                    (i % 4) + 1,
                    99,
                    None,
                    &format!("2024-01-{:02}T00:00:00Z", i + 1),
                );
            }
            Ok(())
        })
        .unwrap();

    let summary = MigrationRunner::run_to_exhaustion(&engine, &small_batches()).unwrap();
    assert_eq!(summary.instances_created, 10);
    assert_eq!(summary.endorsements_migrated, 10);
    assert!(summary.complete);
    assert!(engine.unmigrated_ids(None).unwrap().is_empty());

    let report = ProgressVerifier::report(&engine).unwrap();
    assert!(report.is_complete());
}

#[test]
fn run_fails_fast_without_legacy_schema() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let err = MigrationRunner::run_to_exhaustion(&engine, &small_batches()).unwrap_err();
    assert!(err.to_string().contains("required table missing"));
}

#[test]
fn run_terminates_with_anomalies_outstanding() {
    let engine = engine_with_legacy();
    engine
        .pool()
        .writer
        .with_conn_sync(|conn| {
            test_fixtures::seed_skill(conn, 1, "Go", "Programming");
            let bad = test_fixtures::make_legacy_skill(0, "Orphaned", "General");
            test_fixtures::insert_legacy_skill(conn, &bad);
            Ok(())
        })
        .unwrap();

    let summary = MigrationRunner::run_to_exhaustion(&engine, &small_batches()).unwrap();
    assert_eq!(summary.instances_created, 1);
    assert_eq!(summary.anomalies, 1);
    assert!(!summary.complete);

    // The verifier's remaining count is the operator signal.
    let report = ProgressVerifier::report(&engine).unwrap();
    assert_eq!(report.skills.remaining, 1);
}

#[test]
fn rerunning_a_complete_migration_changes_nothing() {
    let engine = engine_with_legacy();
    engine
        .pool()
        .writer
        .with_conn_sync(|conn| {
            for i in 0..5 {
                let skill = test_fixtures::seed_skill(conn, i + 1, &format!("S{i}"), "General");
                test_fixtures::insert_history(
                    conn,
                    skill,
                    i + 1,
                    None,
                    Some("Advanced"),
                    None,
                    &format!("2024-03-{:02}T00:00:00Z", i + 1),
                );
            }
            Ok(())
        })
        .unwrap();

    let first = MigrationRunner::run_to_exhaustion(&engine, &small_batches()).unwrap();
    assert_eq!(first.instances_created, 5);
    assert_eq!(first.histories_migrated, 5);
    assert!(first.complete);

    let second = MigrationRunner::run_to_exhaustion(&engine, &small_batches()).unwrap();
    assert_eq!(second.instances_created, 0);
    assert_eq!(second.histories_migrated, 0);
    assert!(second.complete);

    engine
        .pool()
        .writer
        .with_conn_sync(|conn| {
            let instances: i64 = conn
                .query_row("SELECT COUNT(*) FROM user_skills", [], |r| r.get(0))
                .unwrap();
            let histories: i64 = conn
                .query_row("SELECT COUNT(*) FROM skill_histories_v2", [], |r| r.get(0))
                .unwrap();
            assert_eq!(instances, 5);
            assert_eq!(histories, 5);
            Ok(())
        })
        .unwrap();
}
