use std::sync::Arc;
use std::thread;

use super::*;
use crate::BroadcastTables;

fn with_broadcast(table: &str) -> impl FnOnce(&mut DatabaseRuleConfiguration) + '_ {
    move |rules| {
        rules.broadcast.tables = Some(BroadcastTables(vec![table.to_string()]));
    }
}

#[test]
fn new_registry_should_start_at_version_zero() {
    let registry = DatabaseRuleRegistry::new("db1", DatabaseRuleConfiguration::default());

    assert_eq!(registry.name(), "db1");
    assert_eq!(registry.version(), 0);
    assert_eq!(registry.snapshot().rules, DatabaseRuleConfiguration::default());
}

#[test]
fn alter_should_publish_new_snapshot() {
    let registry = DatabaseRuleRegistry::new("db1", DatabaseRuleConfiguration::default());
    let before = registry.snapshot();

    let version = registry.alter(with_broadcast("t_dict"));

    assert_eq!(version, 1);
    let after = registry.snapshot();
    assert!(after.rules.broadcast.is_broadcast_table("t_dict"));
    // Snapshots taken earlier are unaffected.
    assert_eq!(before.version, 0);
    assert!(!before.rules.broadcast.is_broadcast_table("t_dict"));
}

#[test]
fn concurrent_writers_should_not_lose_updates() {
    let registry = Arc::new(DatabaseRuleRegistry::new("db1", DatabaseRuleConfiguration::default()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = registry.clone();
            thread::spawn(move || {
                for j in 0..25 {
                    registry.alter(|rules| {
                        let mut tables = rules.broadcast.tables.take().unwrap_or_default();
                        tables.0.push(format!("t_{}_{}", i, j));
                        rules.broadcast.tables = Some(tables);
                    });
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let snapshot = registry.snapshot();
    assert_eq!(snapshot.version, 200);
    assert_eq!(snapshot.rules.broadcast.tables.as_ref().unwrap().0.len(), 200);
}

#[test]
fn debug_should_show_name_and_version() {
    let registry = DatabaseRuleRegistry::new("db1", DatabaseRuleConfiguration::default());
    registry.alter(|_| {});

    let debug = format!("{:?}", registry);

    assert!(debug.contains("db1"));
    assert!(debug.contains("version: 1"));
}
