//! Sharding rule payload shapes and the converged sharding rule state.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShardingStrategyConfiguration {
    Standard {
        sharding_column: String,
        sharding_algorithm_name: String,
    },
    Complex {
        /// Comma separated column list
        sharding_columns: String,
        sharding_algorithm_name: String,
    },
    Hint {
        sharding_algorithm_name: String,
    },
    None,
}

impl ShardingStrategyConfiguration {
    pub fn sharding_algorithm_name(&self) -> Option<&str> {
        match self {
            ShardingStrategyConfiguration::Standard {
                sharding_algorithm_name,
                ..
            }
            | ShardingStrategyConfiguration::Complex {
                sharding_algorithm_name,
                ..
            }
            | ShardingStrategyConfiguration::Hint {
                sharding_algorithm_name,
            } => Some(sharding_algorithm_name),
            ShardingStrategyConfiguration::None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyGenerateStrategyConfiguration {
    pub column: String,
    pub key_generator_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardingAuditStrategyConfiguration {
    pub auditor_names: Vec<String>,
    #[serde(default)]
    pub allow_hint_disable: bool,
}

/// Algorithm definition shared by sharding algorithms, key generators and
/// auditors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmConfiguration {
    #[serde(rename = "type")]
    pub algorithm_type: String,
    #[serde(default)]
    pub props: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardingTableRuleConfiguration {
    pub logic_table: String,
    #[serde(default)]
    pub actual_data_nodes: Option<String>,
    #[serde(default)]
    pub database_sharding_strategy: Option<ShardingStrategyConfiguration>,
    #[serde(default)]
    pub table_sharding_strategy: Option<ShardingStrategyConfiguration>,
    #[serde(default)]
    pub key_generate_strategy: Option<KeyGenerateStrategyConfiguration>,
    #[serde(default)]
    pub audit_strategy: Option<ShardingAuditStrategyConfiguration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardingAutoTableRuleConfiguration {
    pub logic_table: String,
    #[serde(default)]
    pub actual_data_sources: Option<String>,
    #[serde(default)]
    pub sharding_strategy: Option<ShardingStrategyConfiguration>,
    #[serde(default)]
    pub key_generate_strategy: Option<KeyGenerateStrategyConfiguration>,
    #[serde(default)]
    pub audit_strategy: Option<ShardingAuditStrategyConfiguration>,
}

/// Binding between logic tables that share sharding keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardingTableReferenceRuleConfiguration {
    pub name: String,
    /// Comma separated logic table names
    pub reference: String,
}

impl ShardingTableReferenceRuleConfiguration {
    pub fn table_names(&self) -> Vec<&str> {
        self.reference
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardingCacheOptionsConfiguration {
    #[serde(default)]
    pub soft_values: bool,
    pub initial_capacity: usize,
    pub maximum_size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardingCacheConfiguration {
    pub allowed_max_sql_length: usize,
    pub route_cache: ShardingCacheOptionsConfiguration,
}

crate::json_payload!(
    ShardingStrategyConfiguration,
    KeyGenerateStrategyConfiguration,
    ShardingAuditStrategyConfiguration,
    AlgorithmConfiguration,
    ShardingTableRuleConfiguration,
    ShardingAutoTableRuleConfiguration,
    ShardingTableReferenceRuleConfiguration,
    ShardingCacheConfiguration,
);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShardingRuleConfiguration {
    pub tables: BTreeMap<String, ShardingTableRuleConfiguration>,
    pub auto_tables: BTreeMap<String, ShardingAutoTableRuleConfiguration>,
    pub binding_table_groups: BTreeMap<String, ShardingTableReferenceRuleConfiguration>,
    pub sharding_algorithms: BTreeMap<String, AlgorithmConfiguration>,
    pub key_generators: BTreeMap<String, AlgorithmConfiguration>,
    pub auditors: BTreeMap<String, AlgorithmConfiguration>,
    pub default_database_sharding_strategy: Option<ShardingStrategyConfiguration>,
    pub default_table_sharding_strategy: Option<ShardingStrategyConfiguration>,
    pub default_key_generate_strategy: Option<KeyGenerateStrategyConfiguration>,
    pub default_audit_strategy: Option<ShardingAuditStrategyConfiguration>,
    pub default_sharding_column: Option<String>,
    pub sharding_cache: Option<ShardingCacheConfiguration>,
}

impl ShardingRuleConfiguration {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True if `logic_table` is sharded, either as a table or an auto table.
    pub fn is_sharding_table(
        &self,
        logic_table: &str,
    ) -> bool {
        self.tables.contains_key(logic_table) || self.auto_tables.contains_key(logic_table)
    }

    /// Tables bound to `logic_table`, including itself, or empty if unbound.
    pub fn binding_tables(
        &self,
        logic_table: &str,
    ) -> Vec<&str> {
        self.binding_table_groups
            .values()
            .map(ShardingTableReferenceRuleConfiguration::table_names)
            .find(|names| names.contains(&logic_table))
            .unwrap_or_default()
    }
}
