//! File-backed persistence: the ledger and target tables survive reopen,
//! and reads go through the read pool.

use skillgrid_core::models::MapWrite;
use skillgrid_core::traits::IMigrationMap;
use skillgrid_storage::pool::pragmas;
use skillgrid_storage::StorageEngine;

#[test]
fn ledger_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("skillgrid.db");

    {
        let engine = StorageEngine::open(&db_path).unwrap();
        engine
            .pool()
            .writer
            .with_conn_sync(|conn| {
                test_fixtures::create_legacy_schema(conn);
                test_fixtures::seed_skill(conn, 1, "Go", "Programming");
                Ok(())
            })
            .unwrap();
        assert_eq!(engine.record_mapping(1, 100).unwrap(), MapWrite::Inserted);
    }

    let engine = StorageEngine::open(&db_path).unwrap();
    assert!(engine.is_migrated(1).unwrap());
    // Reopen re-ran the bootstrap; a duplicate write is still a no-op.
    assert_eq!(
        engine.record_mapping(1, 100).unwrap(),
        MapWrite::AlreadyMapped
    );
}

#[test]
fn wal_mode_is_active_on_file_backed_writer() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("skillgrid.db");
    let engine = StorageEngine::open(&db_path).unwrap();

    engine
        .pool()
        .writer
        .with_conn_sync(|conn| {
            assert!(pragmas::verify_wal_mode(conn).unwrap());
            Ok(())
        })
        .unwrap();
}

#[test]
fn read_pool_sees_writer_commits() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("skillgrid.db");
    let engine = StorageEngine::open(&db_path).unwrap();

    engine
        .pool()
        .writer
        .with_conn_sync(|conn| {
            test_fixtures::create_legacy_schema(conn);
            test_fixtures::seed_skill(conn, 1, "Rust", "Programming");
            Ok(())
        })
        .unwrap();
    engine.record_mapping(1, 100).unwrap();

    // is_migrated routes through the read pool in file-backed mode.
    assert!(engine.is_migrated(1).unwrap());
    assert!(engine.unmigrated_ids(None).unwrap().is_empty());
}
