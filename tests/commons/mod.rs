use std::sync::Arc;

use rule_sync::ContextManager;
use rule_sync::DataChangedEvent;
use rule_sync::RuleSyncConfig;
use rule_sync::RuleSyncNode;
use rule_sync::RuleSyncNodeBuilder;

pub const DATABASE: &str = "sharding_db";

/// Node with the built-in rule categories and `DATABASE` registered.
pub fn node_with_database(namespace: &str) -> RuleSyncNode {
    let mut config = RuleSyncConfig::default();
    config.node.instance_id = Some("it-node".to_string());
    config.node.namespace = namespace.to_string();
    config.pipeline.worker_count = 2;

    let context_manager = Arc::new(ContextManager::new());
    context_manager.create_database(DATABASE);
    RuleSyncNodeBuilder::new(config)
        .context_manager(context_manager)
        .build()
        .expect("node builds")
}

pub fn named_key(
    node: &RuleSyncNode,
    rule_type: &str,
    item_type: &str,
    item_name: &str,
) -> String {
    node.pipeline()
        .classifier()
        .named_item_key(DATABASE, rule_type, item_type, item_name)
}

pub fn unique_key(
    node: &RuleSyncNode,
    rule_type: &str,
    item_type: &str,
) -> String {
    node.pipeline().classifier().unique_item_key(DATABASE, rule_type, item_type)
}

pub fn t_order_added(node: &RuleSyncNode) -> DataChangedEvent {
    DataChangedEvent::added(
        named_key(node, "sharding", "tables", "t_order"),
        r#"{
            "logic_table": "t_order",
            "actual_data_nodes": "ds_${0..1}.t_order_${0..1}",
            "database_sharding_strategy": {
                "type": "standard",
                "sharding_column": "user_id",
                "sharding_algorithm_name": "database_inline"
            }
        }"#,
    )
}
