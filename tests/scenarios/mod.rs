use rule_sync::DataChangedEvent;
use rule_sync::DataChangedType;
use rule_sync::DispatchError;
use rule_sync::Error;
use rule_sync::GovernanceEvent;
use rule_sync::NamedItemEvent;
use rule_sync::ShardingRuleEvent;
use rule_sync::ShardingStrategyConfiguration;
use rule_sync::UniqueItemEvent;
use tokio::sync::watch;

use crate::commons::named_key;
use crate::commons::node_with_database;
use crate::commons::t_order_added;
use crate::commons::unique_key;
use crate::commons::DATABASE;

#[test]
fn added_table_becomes_live_sharding_table() {
    let node = node_with_database("/metadata");
    let event = t_order_added(&node);
    assert_eq!(event.key, "/metadata/sharding_db/rules/sharding/tables/t_order");

    let created = node.pipeline().process(&event).unwrap();

    assert!(matches!(
        created,
        Some(GovernanceEvent::Sharding(ShardingRuleEvent::Table(NamedItemEvent::Add { ref item_name, .. })))
            if item_name == "t_order"
    ));
    let snapshot = node.context_manager().rules(DATABASE).unwrap();
    let table = &snapshot.rules.sharding.tables["t_order"];
    assert_eq!(table.actual_data_nodes.as_deref(), Some("ds_${0..1}.t_order_${0..1}"));
    assert_eq!(
        table.database_sharding_strategy,
        Some(ShardingStrategyConfiguration::Standard {
            sharding_column: "user_id".to_string(),
            sharding_algorithm_name: "database_inline".to_string(),
        })
    );
}

#[test]
fn updated_binding_table_replaces_reference() {
    let node = node_with_database("");
    let key = named_key(&node, "sharding", "binding-tables", "t_order");
    node.pipeline()
        .process(&DataChangedEvent::added(
            key.clone(),
            r#"{"name": "t_order", "reference": "t_order,t_order_item"}"#,
        ))
        .unwrap();

    let created = node
        .pipeline()
        .process(&DataChangedEvent::updated(
            key,
            r#"{"name": "t_order", "reference": "t_order,t_order_item,t_order_detail"}"#,
        ))
        .unwrap();

    assert!(matches!(
        created,
        Some(GovernanceEvent::Sharding(ShardingRuleEvent::TableReference(NamedItemEvent::Alter { .. })))
    ));
    let snapshot = node.context_manager().rules(DATABASE).unwrap();
    assert_eq!(
        snapshot.rules.sharding.binding_tables("t_order_detail"),
        vec!["t_order", "t_order_item", "t_order_detail"]
    );
    assert_eq!(snapshot.rules.sharding.binding_table_groups.len(), 1);
}

#[test]
fn deleted_default_strategy_clears_slot() {
    let node = node_with_database("");
    let key = unique_key(&node, "sharding", "default-database-strategy");
    node.pipeline()
        .process(&DataChangedEvent::added(
            key.clone(),
            r#"{"type": "hint", "sharding_algorithm_name": "hint_inline"}"#,
        ))
        .unwrap();

    let created = node.pipeline().process(&DataChangedEvent::deleted(key)).unwrap();

    assert_eq!(
        created,
        Some(GovernanceEvent::Sharding(ShardingRuleEvent::DatabaseStrategy(
            UniqueItemEvent::Delete {
                database_name: DATABASE.to_string(),
            }
        )))
    );
    let snapshot = node.context_manager().rules(DATABASE).unwrap();
    assert_eq!(snapshot.rules.sharding.default_database_sharding_strategy, None);
    assert_eq!(snapshot.version, 2);
}

#[test]
fn unknown_item_type_is_unsupported_and_state_untouched() {
    let node = node_with_database("");
    let event = DataChangedEvent::added(named_key(&node, "sharding", "unknown-type", "x"), "{}");

    let result = node.pipeline().process(&event);

    assert!(matches!(
        result,
        Err(Error::Dispatch(DispatchError::UnsupportedItemType { .. }))
    ));
    assert!(result.is_err_and(|e| e.is_unsupported()));
    assert_eq!(node.context_manager().rules(DATABASE).unwrap().version, 0);

    // The watch-client entry point never fails.
    node.pipeline().on_change(event);
    assert_eq!(node.context_manager().rules(DATABASE).unwrap().version, 0);
}

#[test]
fn replayed_notifications_converge_to_same_state() {
    let first = node_with_database("");
    let second = node_with_database("");
    let added = t_order_added(&first);
    let deleted = DataChangedEvent::deleted(added.key.clone());

    for event in [&added, &deleted, &added] {
        first.pipeline().process(event).unwrap();
    }
    for event in [&added, &added, &deleted, &deleted, &added, &added] {
        second.pipeline().process(event).unwrap();
    }

    assert_eq!(
        first.context_manager().rules(DATABASE).unwrap().rules,
        second.context_manager().rules(DATABASE).unwrap().rules
    );
}

#[test]
fn event_for_unknown_database_is_a_no_op() {
    let node = node_with_database("");
    let event = DataChangedEvent::added(
        "/other_db/rules/broadcast/tables",
        r#"["t_dict"]"#,
    );

    assert!(node.pipeline().process(&event).unwrap().is_some());
    assert!(node.context_manager().database("other_db").is_none());
}

#[test]
fn ignored_notification_produces_nothing() {
    let node = node_with_database("");
    let event = DataChangedEvent::new("/sharding_db/rules", "", DataChangedType::Ignored);

    assert_eq!(node.pipeline().process(&event).unwrap(), None);
}

#[tokio::test]
async fn dispatcher_preserves_per_key_order() {
    let (_shutdown_tx, shutdown_rx) = watch::channel(());
    let node = node_with_database("");
    let (dispatcher, handles) = node.start(shutdown_rx);
    let added = t_order_added(&node);
    let column_key = unique_key(&node, "sharding", "default-sharding-column");

    for i in 0..10 {
        dispatcher.on_change(added.clone()).await.unwrap();
        dispatcher
            .on_change(DataChangedEvent::updated(column_key.clone(), format!("column_{}", i)))
            .await
            .unwrap();
        dispatcher.on_change(DataChangedEvent::deleted(added.key.clone())).await.unwrap();
    }
    drop(dispatcher);
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let snapshot = node.context_manager().rules(DATABASE).unwrap();
    assert!(snapshot.rules.sharding.tables.is_empty());
    assert_eq!(snapshot.rules.sharding.default_sharding_column.as_deref(), Some("column_9"));
    assert_eq!(snapshot.version, 30);
}
