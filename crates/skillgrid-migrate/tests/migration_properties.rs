//! Property tests: the migration invariants hold over randomized legacy
//! datasets — unique map entries, referential soundness, template dedup,
//! and idempotence of a second pass.

use std::collections::HashSet;

use proptest::prelude::*;

use skillgrid_core::config::MigrationConfig;
use skillgrid_core::traits::IMigrationMap;
use skillgrid_migrate::MigrationRunner;
use skillgrid_storage::queries::{instance_ops, map_ops, template_ops};
use skillgrid_storage::StorageEngine;

fn seeded_engine(rows: &[(i64, String, String)]) -> StorageEngine {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .pool()
        .writer
        .with_conn_sync(|conn| {
            test_fixtures::create_legacy_schema(conn);
            for (user_id, name, category) in rows {
                test_fixtures::seed_skill(conn, *user_id, name, category);
            }
            Ok(())
        })
        .unwrap();
    engine
}

fn config() -> MigrationConfig {
    MigrationConfig {
        batch_size: 4,
        max_row_errors: 25,
    }
}

fn legacy_rows() -> impl Strategy<Value = Vec<(i64, String, String)>> {
    prop::collection::vec(
        (
            1i64..6,
            prop::sample::select(vec!["Go", "Rust", "SQL", "Terraform"]),
            prop::sample::select(vec!["Programming", "Data"]),
        )
            .prop_map(|(u, n, c)| (u, n.to_string(), c.to_string())),
        1..25,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_every_row_maps_and_every_mapping_resolves(rows in legacy_rows()) {
        let engine = seeded_engine(&rows);
        MigrationRunner::run_to_exhaustion(&engine, &config()).unwrap();

        prop_assert!(engine.unmigrated_ids(None).unwrap().is_empty());

        engine.pool().writer.with_conn_sync(|conn| {
            for old_id in 1..=rows.len() as i64 {
                let entry = map_ops::get_mapping(conn, old_id).unwrap()
                    .expect("every legacy row must be mapped");
                let instance = instance_ops::get_instance(conn, entry.new_user_skill_id).unwrap();
                assert!(instance.is_some(), "mapping must point at a live instance");
            }
            Ok(())
        }).unwrap();
    }

    #[test]
    fn prop_templates_and_instances_are_deduplicated(rows in legacy_rows()) {
        let engine = seeded_engine(&rows);
        MigrationRunner::run_to_exhaustion(&engine, &config()).unwrap();

        let distinct_keys: HashSet<_> = rows.iter()
            .map(|(_, n, c)| (n.clone(), c.clone()))
            .collect();
        let distinct_pairs: HashSet<_> = rows.iter()
            .map(|(u, n, c)| (*u, n.clone(), c.clone()))
            .collect();

        engine.pool().writer.with_conn_sync(|conn| {
            assert_eq!(
                template_ops::count_templates(conn).unwrap(),
                distinct_keys.len() as u64
            );
            assert_eq!(
                instance_ops::count_instances(conn).unwrap(),
                distinct_pairs.len() as u64
            );
            Ok(())
        }).unwrap();
    }

    #[test]
    fn prop_second_run_changes_nothing(rows in legacy_rows()) {
        let engine = seeded_engine(&rows);
        MigrationRunner::run_to_exhaustion(&engine, &config()).unwrap();

        let (templates, instances) = engine.pool().writer.with_conn_sync(|conn| {
            Ok((
                template_ops::count_templates(conn).unwrap(),
                instance_ops::count_instances(conn).unwrap(),
            ))
        }).unwrap();

        let second = MigrationRunner::run_to_exhaustion(&engine, &config()).unwrap();
        prop_assert_eq!(second.instances_created, 0);

        engine.pool().writer.with_conn_sync(|conn| {
            assert_eq!(template_ops::count_templates(conn).unwrap(), templates);
            assert_eq!(instance_ops::count_instances(conn).unwrap(), instances);
            Ok(())
        }).unwrap();
    }
}
