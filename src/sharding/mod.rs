//! Sharding rule category.
//!
//! Item-type tokens are part of the key-path contract with configuration
//! writers; renaming one is a breaking change.

mod config;
mod event;

pub use self::config::*;
pub use event::*;


use crate::GovernanceEvent;
use crate::NamedItemEventCreator;
use crate::Result;
use crate::RuleItemEventCreators;
use crate::RuleNodePath;
use crate::UniqueItemEventCreator;

pub const RULE_TYPE: &str = "sharding";

// Named items
pub const TABLES: &str = "tables";
pub const AUTO_TABLES: &str = "auto-tables";
pub const BINDING_TABLES: &str = "binding-tables";
pub const ALGORITHMS: &str = "algorithms";
pub const KEY_GENERATORS: &str = "key-generators";
pub const AUDITORS: &str = "auditors";

// Unique items
pub const DEFAULT_DATABASE_STRATEGY: &str = "default-database-strategy";
pub const DEFAULT_TABLE_STRATEGY: &str = "default-table-strategy";
pub const DEFAULT_KEY_GENERATE_STRATEGY: &str = "default-key-generate-strategy";
pub const DEFAULT_AUDIT_STRATEGY: &str = "default-audit-strategy";
pub const DEFAULT_SHARDING_COLUMN: &str = "default-sharding-column";
pub const SHARDING_CACHE: &str = "sharding-cache";

pub fn node_path() -> RuleNodePath {
    RuleNodePath::new(
        RULE_TYPE,
        &[
            TABLES,
            AUTO_TABLES,
            BINDING_TABLES,
            ALGORITHMS,
            KEY_GENERATORS,
            AUDITORS,
        ],
        &[
            DEFAULT_DATABASE_STRATEGY,
            DEFAULT_TABLE_STRATEGY,
            DEFAULT_KEY_GENERATE_STRATEGY,
            DEFAULT_AUDIT_STRATEGY,
            DEFAULT_SHARDING_COLUMN,
            SHARDING_CACHE,
        ],
    )
}

fn sharding(event: ShardingRuleEvent) -> GovernanceEvent {
    GovernanceEvent::Sharding(event)
}

/// Sharding rule changed event creator.
pub fn event_creator() -> Result<RuleItemEventCreators> {
    RuleItemEventCreators::new(node_path())?
        .named(TABLES, NamedItemEventCreator::new(|e| sharding(ShardingRuleEvent::Table(e))))?
        .named(AUTO_TABLES, NamedItemEventCreator::new(|e| sharding(ShardingRuleEvent::AutoTable(e))))?
        .named(
            BINDING_TABLES,
            NamedItemEventCreator::new(|e| sharding(ShardingRuleEvent::TableReference(e))),
        )?
        .named(ALGORITHMS, NamedItemEventCreator::new(|e| sharding(ShardingRuleEvent::Algorithm(e))))?
        .named(
            KEY_GENERATORS,
            NamedItemEventCreator::new(|e| sharding(ShardingRuleEvent::KeyGenerator(e))),
        )?
        .named(AUDITORS, NamedItemEventCreator::new(|e| sharding(ShardingRuleEvent::Auditor(e))))?
        .unique(
            DEFAULT_DATABASE_STRATEGY,
            UniqueItemEventCreator::new(|e| sharding(ShardingRuleEvent::DatabaseStrategy(e))),
        )?
        .unique(
            DEFAULT_TABLE_STRATEGY,
            UniqueItemEventCreator::new(|e| sharding(ShardingRuleEvent::TableStrategy(e))),
        )?
        .unique(
            DEFAULT_KEY_GENERATE_STRATEGY,
            UniqueItemEventCreator::new(|e| sharding(ShardingRuleEvent::KeyGenerateStrategy(e))),
        )?
        .unique(
            DEFAULT_AUDIT_STRATEGY,
            UniqueItemEventCreator::new(|e| sharding(ShardingRuleEvent::AuditStrategy(e))),
        )?
        .unique(
            DEFAULT_SHARDING_COLUMN,
            UniqueItemEventCreator::new(|e| sharding(ShardingRuleEvent::ShardingColumn(e))),
        )?
        .unique(SHARDING_CACHE, UniqueItemEventCreator::new(|e| sharding(ShardingRuleEvent::Cache(e))))
}
