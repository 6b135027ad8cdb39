//! Typed domain events produced from classified changes.
//!
//! Every rule item change is one of `Add`, `Alter` or `Delete`, crossed with the
//! item's identity shape: named items carry the item name, unique items do
//! not. Category events wrap these two shapes once per item kind they own.

use std::collections::BTreeMap;

use crate::BroadcastRuleEvent;
use crate::DatabaseRuleConfiguration;
use crate::ShardingRuleEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum NamedItemEvent<T> {
    Add {
        database_name: String,
        item_name: String,
        key: String,
        config: T,
    },
    Alter {
        database_name: String,
        item_name: String,
        key: String,
        config: T,
    },
    Delete {
        database_name: String,
        item_name: String,
    },
}

impl<T> NamedItemEvent<T> {
    pub fn database_name(&self) -> &str {
        match self {
            NamedItemEvent::Add { database_name, .. }
            | NamedItemEvent::Alter { database_name, .. }
            | NamedItemEvent::Delete { database_name, .. } => database_name,
        }
    }

    pub fn item_name(&self) -> &str {
        match self {
            NamedItemEvent::Add { item_name, .. }
            | NamedItemEvent::Alter { item_name, .. }
            | NamedItemEvent::Delete { item_name, .. } => item_name,
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            NamedItemEvent::Add { .. } => "add",
            NamedItemEvent::Alter { .. } => "alter",
            NamedItemEvent::Delete { .. } => "delete",
        }
    }

    /// Replace-by-name for `Add`/`Alter`, remove-if-present for `Delete`.
    pub(crate) fn apply_to(
        &self,
        items: &mut BTreeMap<String, T>,
    ) where
        T: Clone,
    {
        match self {
            NamedItemEvent::Add {
                item_name, config, ..
            }
            | NamedItemEvent::Alter {
                item_name, config, ..
            } => {
                items.insert(item_name.clone(), config.clone());
            }
            NamedItemEvent::Delete { item_name, .. } => {
                items.remove(item_name);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UniqueItemEvent<T> {
    Add {
        database_name: String,
        key: String,
        config: T,
    },
    Alter {
        database_name: String,
        key: String,
        config: T,
    },
    Delete {
        database_name: String,
    },
}

impl<T> UniqueItemEvent<T> {
    pub fn database_name(&self) -> &str {
        match self {
            UniqueItemEvent::Add { database_name, .. }
            | UniqueItemEvent::Alter { database_name, .. }
            | UniqueItemEvent::Delete { database_name } => database_name,
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            UniqueItemEvent::Add { .. } => "add",
            UniqueItemEvent::Alter { .. } => "alter",
            UniqueItemEvent::Delete { .. } => "delete",
        }
    }

    pub(crate) fn apply_to(
        &self,
        slot: &mut Option<T>,
    ) where
        T: Clone,
    {
        match self {
            UniqueItemEvent::Add { config, .. } | UniqueItemEvent::Alter { config, .. } => {
                *slot = Some(config.clone());
            }
            UniqueItemEvent::Delete { .. } => {
                *slot = None;
            }
        }
    }
}

/// Domain event handed to rule changed subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum GovernanceEvent {
    Sharding(ShardingRuleEvent),
    Broadcast(BroadcastRuleEvent),
}

impl GovernanceEvent {
    pub fn database_name(&self) -> &str {
        match self {
            GovernanceEvent::Sharding(event) => event.database_name(),
            GovernanceEvent::Broadcast(event) => event.database_name(),
        }
    }

    pub fn rule_type(&self) -> &'static str {
        match self {
            GovernanceEvent::Sharding(_) => crate::sharding::RULE_TYPE,
            GovernanceEvent::Broadcast(_) => crate::broadcast::RULE_TYPE,
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            GovernanceEvent::Sharding(event) => event.action(),
            GovernanceEvent::Broadcast(event) => event.action(),
        }
    }

    pub(crate) fn apply_to(
        &self,
        rules: &mut DatabaseRuleConfiguration,
    ) {
        match self {
            GovernanceEvent::Sharding(event) => event.apply_to(&mut rules.sharding),
            GovernanceEvent::Broadcast(event) => event.apply_to(&mut rules.broadcast),
        }
    }
}

impl From<ShardingRuleEvent> for GovernanceEvent {
    fn from(event: ShardingRuleEvent) -> Self {
        GovernanceEvent::Sharding(event)
    }
}

impl From<BroadcastRuleEvent> for GovernanceEvent {
    fn from(event: BroadcastRuleEvent) -> Self {
        GovernanceEvent::Broadcast(event)
    }
}
