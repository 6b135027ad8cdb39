use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use crate::BroadcastRuleConfiguration;
use crate::ShardingRuleConfiguration;

/// Converged rule configuration of one database.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseRuleConfiguration {
    pub sharding: ShardingRuleConfiguration,
    pub broadcast: BroadcastRuleConfiguration,
}

/// Immutable view handed to readers. `version` increases by one per applied
/// event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseRuleSnapshot {
    pub version: u64,
    pub rules: DatabaseRuleConfiguration,
}

/// Live rule state of one database on this node.
///
/// Writers are serialized by `write_lock` and publish a fresh snapshot;
/// readers load the current snapshot without locking and never observe a
/// partially applied change.
pub struct DatabaseRuleRegistry {
    name: String,
    current: ArcSwap<DatabaseRuleSnapshot>,
    write_lock: Mutex<()>,
}

impl DatabaseRuleRegistry {
    pub fn new(
        name: impl Into<String>,
        rules: DatabaseRuleConfiguration,
    ) -> Self {
        Self {
            name: name.into(),
            current: ArcSwap::from_pointee(DatabaseRuleSnapshot { version: 0, rules }),
            write_lock: Mutex::new(()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn snapshot(&self) -> Arc<DatabaseRuleSnapshot> {
        self.current.load_full()
    }

    pub fn version(&self) -> u64 {
        self.current.load().version
    }

    /// Applies `f` to a copy of the current rules and publishes the result.
    /// Returns the new version.
    pub fn alter(
        &self,
        f: impl FnOnce(&mut DatabaseRuleConfiguration),
    ) -> u64 {
        let _guard = self.write_lock.lock();
        let current = self.current.load();
        let mut rules = current.rules.clone();
        f(&mut rules);
        let version = current.version + 1;
        self.current.store(Arc::new(DatabaseRuleSnapshot { version, rules }));
        version
    }
}

impl std::fmt::Debug for DatabaseRuleRegistry {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("DatabaseRuleRegistry")
            .field("name", &self.name)
            .field("version", &self.version())
            .finish_non_exhaustive()
    }
}
