use std::sync::Arc;

use parking_lot::Mutex;

use crate::ContextManager;
use crate::DataChangedEvent;
use crate::GovernanceEvent;
use crate::InstanceContext;
use crate::MockRuleChangedSubscriber;
use crate::PathClassifier;
use crate::RuleChangedEventCreatorRegistry;
use crate::RuleChangedEventPipeline;
use crate::RuleChangeOutcome;
use crate::RuleChangedSubscriber;
use crate::RuleItemChangedSubscriber;

pub(crate) const TEST_DATABASE: &str = "db1";

pub(crate) fn builtin_registry() -> Arc<RuleChangedEventCreatorRegistry> {
    Arc::new(RuleChangedEventCreatorRegistry::with_builtin_rules().expect("builtin rules register"))
}

/// `/db1/rules/sharding/<item_type>[/<item_name>]`
pub(crate) fn sharding_key(
    item_type: &str,
    item_name: Option<&str>,
) -> String {
    let classifier = PathClassifier::default();
    match item_name {
        Some(name) => classifier.named_item_key(TEST_DATABASE, crate::sharding::RULE_TYPE, item_type, name),
        None => classifier.unique_item_key(TEST_DATABASE, crate::sharding::RULE_TYPE, item_type),
    }
}

pub(crate) fn table_json(logic_table: &str) -> String {
    format!(
        r#"{{
            "logic_table": "{logic_table}",
            "actual_data_nodes": "ds_${{0..1}}.{logic_table}_${{0..1}}",
            "table_sharding_strategy": {{
                "type": "standard",
                "sharding_column": "order_id",
                "sharding_algorithm_name": "{logic_table}_inline"
            }}
        }}"#
    )
}

pub(crate) fn reference_json(
    name: &str,
    reference: &str,
) -> String {
    format!(r#"{{"name": "{name}", "reference": "{reference}"}}"#)
}

pub(crate) fn standard_strategy_json(column: &str) -> String {
    format!(r#"{{"type": "standard", "sharding_column": "{column}", "sharding_algorithm_name": "database_inline"}}"#)
}

pub(crate) fn added_table(logic_table: &str) -> DataChangedEvent {
    DataChangedEvent::added(
        sharding_key(crate::sharding::TABLES, Some(logic_table)),
        table_json(logic_table),
    )
}

pub(crate) fn deleted_table(logic_table: &str) -> DataChangedEvent {
    DataChangedEvent::deleted(sharding_key(crate::sharding::TABLES, Some(logic_table)))
}

/// Context manager holding `db1`, with a subscriber bound to it.
pub(crate) fn bound_subscriber() -> (Arc<ContextManager>, Arc<RuleItemChangedSubscriber>) {
    let context_manager = Arc::new(ContextManager::new());
    context_manager.create_database(TEST_DATABASE);
    let subscriber = Arc::new(RuleItemChangedSubscriber::new());
    subscriber.set_context_manager(context_manager.clone());
    subscriber.set_instance_context(Arc::new(InstanceContext::new("test-instance")));
    (context_manager, subscriber)
}

/// Mock subscriber that records every event it receives.
pub(crate) fn recording_subscriber() -> (MockRuleChangedSubscriber, Arc<Mutex<Vec<GovernanceEvent>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();
    let mut subscriber = MockRuleChangedSubscriber::new();
    subscriber.expect_on_rule_changed().returning(move |event| {
        sink.lock().push(event.clone());
        Ok(RuleChangeOutcome::Applied)
    });
    (subscriber, received)
}

pub(crate) fn pipeline_with(subscriber: Arc<dyn RuleChangedSubscriber>) -> RuleChangedEventPipeline {
    RuleChangedEventPipeline::new(PathClassifier::default(), builtin_registry(), subscriber)
}
