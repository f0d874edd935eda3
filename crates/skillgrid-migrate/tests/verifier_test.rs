//! The progress verifier: pure reads, correct percentages, termination
//! oracle.

use skillgrid_core::models::{BatchParams, DependentKind};
use skillgrid_migrate::{DependentMigrator, InstanceMigrator, ProgressVerifier};
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

#[test]
fn empty_dataset_reports_complete() {
    let engine = engine_with_legacy();
    let report = ProgressVerifier::report(&engine).unwrap();

    assert_eq!(report.skills.total, 0);
    assert_eq!(report.skills.remaining, 0);
    assert!((report.skills.completion_pct - 100.0).abs() < f64::EPSILON);
    assert!(report.is_complete());
}

#[test]
fn partial_migration_reports_remaining_work() {
    let engine = engine_with_legacy();
    engine
        .pool()
        .writer
        .with_conn_sync(|conn| {
            let a = test_fixtures::seed_skill(conn, 1, "Go", "Programming");
            let b = test_fixtures::seed_skill(conn, 2, "SQL", "Data");
            test_fixtures::insert_endorsement(conn, a, 1, 9, None, "2024-01-01T00:00:00Z");
            test_fixtures::insert_endorsement(conn, b, 2, 9, None, "2024-01-02T00:00:00Z");
            Ok(())
        })
        .unwrap();

    // Migrate only the first skill, then its dependents.
    InstanceMigrator::migrate_batch(
        &engine,
        &BatchParams {
            batch_size: 1,
            offset: 0,
            max_row_errors: 25,
        },
    )
    .unwrap();
    DependentMigrator::migrate(&engine, DependentKind::Endorsements, 100).unwrap();

    let report = ProgressVerifier::report(&engine).unwrap();
    assert_eq!(report.skills.total, 2);
    assert_eq!(report.skills.mapped, 1);
    assert_eq!(report.skills.remaining, 1);
    assert!((report.skills.completion_pct - 50.0).abs() < 0.01);

    let endorsements = report
        .dependents
        .iter()
        .find(|d| d.kind == DependentKind::Endorsements)
        .unwrap();
    assert_eq!(endorsements.total, 2);
    assert_eq!(endorsements.migrated, 1);
    assert_eq!(endorsements.remaining, 1);
    assert!(!report.is_complete());
}

#[test]
fn fully_migrated_dataset_reports_hundred_percent() {
    let engine = engine_with_legacy();
    engine
        .pool()
        .writer
        .with_conn_sync(|conn| {
            for i in 0..4 {
                let skill =
                    test_fixtures::seed_skill(conn, i + 1, &format!("Skill {i}"), "General");
                test_fixtures::insert_endorsement(
                    conn,
                    skill,
                    i + 1,
                    50,
                    None,
                    &format!("2024-01-0{}T00:00:00Z", i + 1),
                );
                test_fixtures::insert_history(
                    conn,
                    skill,
                    i + 1,
                    None,
                    Some("Advanced"),
                    None,
                    &format!("2024-02-0{}T00:00:00Z", i + 1),
                );
            }
            Ok(())
        })
        .unwrap();

    InstanceMigrator::migrate_batch(
        &engine,
        &BatchParams {
            batch_size: 100,
            offset: 0,
            max_row_errors: 25,
        },
    )
    .unwrap();
    for kind in DependentKind::ALL {
        DependentMigrator::migrate(&engine, kind, 100).unwrap();
    }

    let report = ProgressVerifier::report(&engine).unwrap();
    assert!((report.skills.completion_pct - 100.0).abs() < f64::EPSILON);
    for dep in &report.dependents {
        assert_eq!(dep.remaining, 0, "{} should be done", dep.kind);
        assert_eq!(dep.migrated, dep.total);
    }
    assert!(report.is_complete());
}

#[test]
fn report_has_no_side_effects() {
    let engine = engine_with_legacy();
    engine
        .pool()
        .writer
        .with_conn_sync(|conn| {
            test_fixtures::seed_skill(conn, 1, "Go", "Programming");
            Ok(())
        })
        .unwrap();

    let first = ProgressVerifier::report(&engine).unwrap();
    let second = ProgressVerifier::report(&engine).unwrap();
    assert_eq!(first.skills.total, second.skills.total);
    assert_eq!(first.skills.mapped, second.skills.mapped);
}
