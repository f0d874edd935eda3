//! Schema bootstrap: create-if-absent, idempotent, never touches legacy
//! tables.

use skillgrid_storage::{schema, StorageEngine};

#[test]
fn bootstrap_creates_target_tables() {
    let engine = StorageEngine::open_in_memory().unwrap();

    engine
        .with_reader(|conn| {
            for table in [
                "skill_templates",
                "user_skills",
                "skill_migration_map",
                "endorsements_v2",
                "skill_histories_v2",
                "schema_migrations",
            ] {
                assert!(schema::table_exists(conn, table)?, "missing {table}");
            }
            Ok(())
        })
        .unwrap();
}

#[test]
fn bootstrap_is_idempotent() {
    let engine = StorageEngine::open_in_memory().unwrap();

    // Running the bootstrap again must be a no-op, not an error.
    engine
        .pool()
        .writer
        .with_conn_sync(schema::run_bootstrap)
        .unwrap();
    engine
        .pool()
        .writer
        .with_conn_sync(schema::run_bootstrap)
        .unwrap();

    engine
        .with_reader(|conn| {
            let steps: i64 = conn
                .query_row("SELECT COUNT(*) FROM schema_migrations", [], |r| r.get(0))
                .unwrap();
            assert_eq!(steps, 4, "each step recorded exactly once");
            Ok(())
        })
        .unwrap();
}

#[test]
fn legacy_schema_check_is_fatal_when_tables_missing() {
    let engine = StorageEngine::open_in_memory().unwrap();

    let err = engine.verify_legacy_schema().unwrap_err();
    assert!(err.to_string().contains("required table missing"));
}

#[test]
fn legacy_schema_check_passes_once_tables_exist() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .pool()
        .writer
        .with_conn_sync(|conn| {
            test_fixtures::create_legacy_schema(conn);
            Ok(())
        })
        .unwrap();

    engine.verify_legacy_schema().unwrap();
}

#[test]
fn bootstrap_does_not_create_legacy_tables() {
    let engine = StorageEngine::open_in_memory().unwrap();

    engine
        .with_reader(|conn| {
            for table in ["skills", "endorsements", "skill_histories"] {
                assert!(!schema::table_exists(conn, table)?, "{table} must not exist");
            }
            Ok(())
        })
        .unwrap();
}
