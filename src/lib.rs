//! Configuration-change reconciliation for sharded database middleware nodes.
//!
//! Raw key notifications from the coordination service are classified against
//! per-category key-path schemas, turned into typed domain events by the
//! registered rule creators, and applied to each database's live rule state.

pub mod broadcast;
mod config;
mod constants;
mod errors;
mod metadata;
pub mod metrics;
mod mode;
mod node;
pub mod sharding;

pub use self::config::*;
pub use broadcast::BroadcastRuleConfiguration;
pub use broadcast::BroadcastRuleEvent;
pub use broadcast::BroadcastTables;
pub use constants::RULES_NODE;
pub use errors::*;
pub use metadata::*;
pub use mode::*;
pub use node::*;
pub use sharding::AlgorithmConfiguration;
pub use sharding::KeyGenerateStrategyConfiguration;
pub use sharding::ShardingAuditStrategyConfiguration;
pub use sharding::ShardingAutoTableRuleConfiguration;
pub use sharding::ShardingCacheConfiguration;
pub use sharding::ShardingCacheOptionsConfiguration;
pub use sharding::ShardingRuleConfiguration;
pub use sharding::ShardingRuleEvent;
pub use sharding::ShardingStrategyConfiguration;
pub use sharding::ShardingTableReferenceRuleConfiguration;
pub use sharding::ShardingTableRuleConfiguration;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
