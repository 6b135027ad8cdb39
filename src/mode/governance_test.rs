use std::collections::BTreeMap;

use super::*;
use crate::BroadcastRuleEvent;
use crate::BroadcastTables;
use crate::DatabaseRuleConfiguration;
use crate::ShardingRuleEvent;
use crate::ShardingTableReferenceRuleConfiguration;

fn reference(reference: &str) -> ShardingTableReferenceRuleConfiguration {
    ShardingTableReferenceRuleConfiguration {
        name: "t_order".to_string(),
        reference: reference.to_string(),
    }
}

fn add_reference(reference_tables: &str) -> NamedItemEvent<ShardingTableReferenceRuleConfiguration> {
    NamedItemEvent::Add {
        database_name: "db1".to_string(),
        item_name: "t_order".to_string(),
        key: "/db1/rules/sharding/binding-tables/t_order".to_string(),
        config: reference(reference_tables),
    }
}

fn delete_reference() -> NamedItemEvent<ShardingTableReferenceRuleConfiguration> {
    NamedItemEvent::Delete {
        database_name: "db1".to_string(),
        item_name: "t_order".to_string(),
    }
}

#[test]
fn named_add_should_replace_by_name() {
    let mut items = BTreeMap::new();

    add_reference("t_order,t_order_item").apply_to(&mut items);
    add_reference("t_order,t_order_item,t_order_detail").apply_to(&mut items);

    assert_eq!(items.len(), 1);
    assert_eq!(items["t_order"], reference("t_order,t_order_item,t_order_detail"));
}

#[test]
fn named_events_should_be_idempotent() {
    let mut once = BTreeMap::new();
    add_reference("t_order,t_order_item").apply_to(&mut once);
    let mut twice = once.clone();
    add_reference("t_order,t_order_item").apply_to(&mut twice);
    assert_eq!(once, twice);

    delete_reference().apply_to(&mut once);
    delete_reference().apply_to(&mut twice);
    delete_reference().apply_to(&mut twice);
    assert!(once.is_empty());
    assert_eq!(once, twice);
}

#[test]
fn unique_events_should_set_and_clear_slot() {
    let mut slot = None;
    let add = UniqueItemEvent::Add {
        database_name: "db1".to_string(),
        key: "/db1/rules/broadcast/tables".to_string(),
        config: BroadcastTables(vec!["t_dict".to_string()]),
    };
    let delete: UniqueItemEvent<BroadcastTables> = UniqueItemEvent::Delete {
        database_name: "db1".to_string(),
    };

    add.apply_to(&mut slot);
    assert_eq!(slot, Some(BroadcastTables(vec!["t_dict".to_string()])));

    delete.apply_to(&mut slot);
    delete.apply_to(&mut slot);
    assert_eq!(slot, None);
}

#[test]
fn governance_event_should_expose_routing_fields() {
    let event = GovernanceEvent::from(ShardingRuleEvent::TableReference(add_reference("t_order")));

    assert_eq!(event.database_name(), "db1");
    assert_eq!(event.rule_type(), "sharding");
    assert_eq!(event.action(), "add");

    let event = GovernanceEvent::from(BroadcastRuleEvent::Tables(UniqueItemEvent::Delete {
        database_name: "db2".to_string(),
    }));
    assert_eq!(event.database_name(), "db2");
    assert_eq!(event.rule_type(), "broadcast");
    assert_eq!(event.action(), "delete");
}

#[test]
fn governance_event_should_apply_to_owning_category_only() {
    let mut rules = DatabaseRuleConfiguration::default();

    GovernanceEvent::from(ShardingRuleEvent::TableReference(add_reference("t_order,t_order_item")))
        .apply_to(&mut rules);

    assert_eq!(rules.sharding.binding_table_groups.len(), 1);
    assert_eq!(rules.broadcast, crate::BroadcastRuleConfiguration::default());
}

#[test]
fn named_item_event_accessors() {
    let event = add_reference("t_order");
    assert_eq!(event.item_name(), "t_order");
    assert_eq!(event.action(), "add");
    assert_eq!(delete_reference().action(), "delete");
}
