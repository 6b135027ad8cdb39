use crate::AlgorithmConfiguration;
use crate::KeyGenerateStrategyConfiguration;
use crate::NamedItemEvent;
use crate::ShardingAuditStrategyConfiguration;
use crate::ShardingAutoTableRuleConfiguration;
use crate::ShardingCacheConfiguration;
use crate::ShardingRuleConfiguration;
use crate::ShardingStrategyConfiguration;
use crate::ShardingTableReferenceRuleConfiguration;
use crate::ShardingTableRuleConfiguration;
use crate::UniqueItemEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum ShardingRuleEvent {
    Table(NamedItemEvent<ShardingTableRuleConfiguration>),
    AutoTable(NamedItemEvent<ShardingAutoTableRuleConfiguration>),
    TableReference(NamedItemEvent<ShardingTableReferenceRuleConfiguration>),
    Algorithm(NamedItemEvent<AlgorithmConfiguration>),
    KeyGenerator(NamedItemEvent<AlgorithmConfiguration>),
    Auditor(NamedItemEvent<AlgorithmConfiguration>),
    DatabaseStrategy(UniqueItemEvent<ShardingStrategyConfiguration>),
    TableStrategy(UniqueItemEvent<ShardingStrategyConfiguration>),
    KeyGenerateStrategy(UniqueItemEvent<KeyGenerateStrategyConfiguration>),
    AuditStrategy(UniqueItemEvent<ShardingAuditStrategyConfiguration>),
    ShardingColumn(UniqueItemEvent<String>),
    Cache(UniqueItemEvent<ShardingCacheConfiguration>),
}

impl ShardingRuleEvent {
    pub fn database_name(&self) -> &str {
        match self {
            ShardingRuleEvent::Table(e) => e.database_name(),
            ShardingRuleEvent::AutoTable(e) => e.database_name(),
            ShardingRuleEvent::TableReference(e) => e.database_name(),
            ShardingRuleEvent::Algorithm(e) => e.database_name(),
            ShardingRuleEvent::KeyGenerator(e) => e.database_name(),
            ShardingRuleEvent::Auditor(e) => e.database_name(),
            ShardingRuleEvent::DatabaseStrategy(e) => e.database_name(),
            ShardingRuleEvent::TableStrategy(e) => e.database_name(),
            ShardingRuleEvent::KeyGenerateStrategy(e) => e.database_name(),
            ShardingRuleEvent::AuditStrategy(e) => e.database_name(),
            ShardingRuleEvent::ShardingColumn(e) => e.database_name(),
            ShardingRuleEvent::Cache(e) => e.database_name(),
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            ShardingRuleEvent::Table(e) => e.action(),
            ShardingRuleEvent::AutoTable(e) => e.action(),
            ShardingRuleEvent::TableReference(e) => e.action(),
            ShardingRuleEvent::Algorithm(e) => e.action(),
            ShardingRuleEvent::KeyGenerator(e) => e.action(),
            ShardingRuleEvent::Auditor(e) => e.action(),
            ShardingRuleEvent::DatabaseStrategy(e) => e.action(),
            ShardingRuleEvent::TableStrategy(e) => e.action(),
            ShardingRuleEvent::KeyGenerateStrategy(e) => e.action(),
            ShardingRuleEvent::AuditStrategy(e) => e.action(),
            ShardingRuleEvent::ShardingColumn(e) => e.action(),
            ShardingRuleEvent::Cache(e) => e.action(),
        }
    }

    pub(crate) fn apply_to(
        &self,
        config: &mut ShardingRuleConfiguration,
    ) {
        match self {
            ShardingRuleEvent::Table(e) => e.apply_to(&mut config.tables),
            ShardingRuleEvent::AutoTable(e) => e.apply_to(&mut config.auto_tables),
            ShardingRuleEvent::TableReference(e) => e.apply_to(&mut config.binding_table_groups),
            ShardingRuleEvent::Algorithm(e) => e.apply_to(&mut config.sharding_algorithms),
            ShardingRuleEvent::KeyGenerator(e) => e.apply_to(&mut config.key_generators),
            ShardingRuleEvent::Auditor(e) => e.apply_to(&mut config.auditors),
            ShardingRuleEvent::DatabaseStrategy(e) => e.apply_to(&mut config.default_database_sharding_strategy),
            ShardingRuleEvent::TableStrategy(e) => e.apply_to(&mut config.default_table_sharding_strategy),
            ShardingRuleEvent::KeyGenerateStrategy(e) => e.apply_to(&mut config.default_key_generate_strategy),
            ShardingRuleEvent::AuditStrategy(e) => e.apply_to(&mut config.default_audit_strategy),
            ShardingRuleEvent::ShardingColumn(e) => e.apply_to(&mut config.default_sharding_column),
            ShardingRuleEvent::Cache(e) => e.apply_to(&mut config.sharding_cache),
        }
    }
}
