//! The migration-map ledger: duplicate writes are success, the anti-join
//! is the authoritative "what remains".

use skillgrid_core::models::MapWrite;
use skillgrid_core::traits::IMigrationMap;
use skillgrid_storage::queries::map_ops;
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
fn record_then_query() {
    let engine = engine_with_legacy();

    assert!(!engine.is_migrated(1).unwrap());
    assert_eq!(engine.record_mapping(1, 100).unwrap(), MapWrite::Inserted);
    assert!(engine.is_migrated(1).unwrap());

    let entry = engine
        .pool()
        .writer
        .with_conn_sync(|conn| map_ops::get_mapping(conn, 1))
        .unwrap()
        .expect("entry should exist");
    assert_eq!(entry.old_skill_id, 1);
    assert_eq!(entry.new_user_skill_id, 100);
}

#[test]
fn duplicate_old_id_is_already_mapped_not_error() {
    let engine = engine_with_legacy();

    assert_eq!(engine.record_mapping(7, 100).unwrap(), MapWrite::Inserted);
    // Second write — even with a different new id — leaves the ledger
    // unchanged and reports AlreadyMapped.
    assert_eq!(
        engine.record_mapping(7, 999).unwrap(),
        MapWrite::AlreadyMapped
    );

    let entry = engine
        .pool()
        .writer
        .with_conn_sync(|conn| map_ops::get_mapping(conn, 7))
        .unwrap()
        .unwrap();
    assert_eq!(entry.new_user_skill_id, 100);
}

#[test]
fn two_old_ids_may_share_one_new_id() {
    let engine = engine_with_legacy();

    assert_eq!(engine.record_mapping(1, 100).unwrap(), MapWrite::Inserted);
    assert_eq!(engine.record_mapping(2, 100).unwrap(), MapWrite::Inserted);
}

#[test]
fn require_mapping_translates_or_reports_missing_parent() {
    let engine = engine_with_legacy();
    engine.record_mapping(3, 300).unwrap();

    engine
        .pool()
        .writer
        .with_conn_sync(|conn| {
            assert_eq!(map_ops::require_mapping(conn, 3).unwrap(), 300);
            let err = map_ops::require_mapping(conn, 4).unwrap_err();
            assert!(err.to_string().contains("no mapping for legacy skill 4"));
            Ok(())
        })
        .unwrap();
}

#[test]
fn unmigrated_ids_is_the_anti_join() {
    let engine = engine_with_legacy();
    engine
        .pool()
        .writer
        .with_conn_sync(|conn| {
            for i in 0..5 {
                test_fixtures::seed_skill(conn, 1, &format!("Skill {i}"), "Programming");
            }
            Ok(())
        })
        .unwrap();

    assert_eq!(engine.unmigrated_ids(None).unwrap(), vec![1, 2, 3, 4, 5]);

    engine.record_mapping(2, 100).unwrap();
    engine.record_mapping(4, 101).unwrap();

    assert_eq!(engine.unmigrated_ids(None).unwrap(), vec![1, 3, 5]);
    assert_eq!(engine.unmigrated_ids(Some(2)).unwrap(), vec![1, 3]);
}
