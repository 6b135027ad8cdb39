use std::sync::Arc;

use dashmap::DashMap;
use tracing::info;

use crate::DatabaseRuleConfiguration;
use crate::DatabaseRuleRegistry;
use crate::DatabaseRuleSnapshot;
use crate::Error;
use crate::Result;

/// Per-node registry of live database rule state.
#[derive(Debug, Default)]
pub struct ContextManager {
    databases: DashMap<String, Arc<DatabaseRuleRegistry>>,
}

impl ContextManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `database_name` with empty rules. Existing state is kept.
    pub fn create_database(
        &self,
        database_name: &str,
    ) -> Arc<DatabaseRuleRegistry> {
        self.create_database_with(database_name, DatabaseRuleConfiguration::default())
    }

    pub fn create_database_with(
        &self,
        database_name: &str,
        rules: DatabaseRuleConfiguration,
    ) -> Arc<DatabaseRuleRegistry> {
        self.databases
            .entry(database_name.to_string())
            .or_insert_with(|| {
                info!(database_name, "Database registered");
                Arc::new(DatabaseRuleRegistry::new(database_name, rules))
            })
            .value()
            .clone()
    }

    pub fn drop_database(
        &self,
        database_name: &str,
    ) -> bool {
        let dropped = self.databases.remove(database_name).is_some();
        if dropped {
            info!(database_name, "Database dropped");
        }
        dropped
    }

    pub fn database(
        &self,
        database_name: &str,
    ) -> Option<Arc<DatabaseRuleRegistry>> {
        self.databases.get(database_name).map(|entry| entry.value().clone())
    }

    pub fn database_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.databases.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    /// Current rule snapshot of `database_name`.
    pub fn rules(
        &self,
        database_name: &str,
    ) -> Option<Arc<DatabaseRuleSnapshot>> {
        self.database(database_name).map(|database| database.snapshot())
    }

    /// Applies `f` to the live rules of `database_name` and returns the new
    /// version.
    pub fn alter_rule_configuration(
        &self,
        database_name: &str,
        f: impl FnOnce(&mut DatabaseRuleConfiguration),
    ) -> Result<u64> {
        // Clone the registry out so the map shard is not held during apply.
        let database = self
            .database(database_name)
            .ok_or_else(|| Error::DatabaseNotFound(database_name.to_string()))?;
        Ok(database.alter(f))
    }
}
