//! Broadcast rule category: tables replicated to every data source.
//!
//! Its only item, `tables`, is unique here while the same token names a
//! multi-instance item under `sharding`; item-type namespaces are per category.

use serde::Deserialize;
use serde::Serialize;

use crate::GovernanceEvent;
use crate::Result;
use crate::RuleItemEventCreators;
use crate::RuleNodePath;
use crate::UniqueItemEvent;
use crate::UniqueItemEventCreator;


pub const RULE_TYPE: &str = "broadcast";

pub const TABLES: &str = "tables";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BroadcastTables(pub Vec<String>);

crate::json_payload!(BroadcastTables);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BroadcastRuleConfiguration {
    pub tables: Option<BroadcastTables>,
}

impl BroadcastRuleConfiguration {
    pub fn is_broadcast_table(
        &self,
        table_name: &str,
    ) -> bool {
        self.tables
            .as_ref()
            .is_some_and(|tables| tables.0.iter().any(|t| t.eq_ignore_ascii_case(table_name)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BroadcastRuleEvent {
    Tables(UniqueItemEvent<BroadcastTables>),
}

impl BroadcastRuleEvent {
    pub fn database_name(&self) -> &str {
        match self {
            BroadcastRuleEvent::Tables(e) => e.database_name(),
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            BroadcastRuleEvent::Tables(e) => e.action(),
        }
    }

    pub(crate) fn apply_to(
        &self,
        config: &mut BroadcastRuleConfiguration,
    ) {
        match self {
            BroadcastRuleEvent::Tables(e) => e.apply_to(&mut config.tables),
        }
    }
}

pub fn node_path() -> RuleNodePath {
    RuleNodePath::new(RULE_TYPE, &[], &[TABLES])
}

pub fn event_creator() -> Result<RuleItemEventCreators> {
    RuleItemEventCreators::new(node_path())?.unique(
        TABLES,
        UniqueItemEventCreator::new(|e| GovernanceEvent::Broadcast(BroadcastRuleEvent::Tables(e))),
    )
}
