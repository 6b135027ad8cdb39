use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::info;

use crate::DispatchError;
use crate::RegistrationError;
use crate::Result;
use crate::RuleChangedEventCreator;
use crate::RuleItemKind;

/// Rule-category dispatch table.
///
/// Populated once at startup through explicit `register` calls, one creator
/// per rule type. Scoped to a context object rather than process-global state
/// so independent pipelines can coexist.
#[derive(Default)]
pub struct RuleChangedEventCreatorRegistry {
    creators: DashMap<&'static str, Arc<dyn RuleChangedEventCreator>>,
}

impl RuleChangedEventCreatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every rule category shipped with this crate.
    pub fn with_builtin_rules() -> Result<Self> {
        let registry = Self::new();
        registry.register(Arc::new(crate::sharding::event_creator()?))?;
        registry.register(Arc::new(crate::broadcast::event_creator()?))?;
        Ok(registry)
    }

    pub fn register(
        &self,
        creator: Arc<dyn RuleChangedEventCreator>,
    ) -> Result<()> {
        let node_path = creator.node_path();
        node_path.validate()?;
        let rule_type = creator.rule_type();
        if node_path.rule_type() != rule_type {
            return Err(RegistrationError::InvalidItemType {
                rule_type: rule_type.to_string(),
                token: node_path.rule_type().to_string(),
            }
            .into());
        }

        match self.creators.entry(rule_type) {
            Entry::Occupied(_) => Err(RegistrationError::DuplicateRuleType(rule_type.to_string()).into()),
            Entry::Vacant(entry) => {
                info!(
                    rule_type,
                    named_items = ?node_path.named_items(),
                    unique_items = ?node_path.unique_items(),
                    "Rule changed event creator registered"
                );
                entry.insert(creator);
                Ok(())
            }
        }
    }

    pub fn dispatch(
        &self,
        rule_type: &str,
    ) -> Result<Arc<dyn RuleChangedEventCreator>> {
        self.creators
            .get(rule_type)
            .map(|creator| Arc::clone(creator.value()))
            .ok_or_else(|| DispatchError::UnsupportedRuleCategory(rule_type.to_string()).into())
    }

    /// Kind declared for `item_type` by the schema of `rule_type`, if both are known.
    pub fn declared_kind(
        &self,
        rule_type: &str,
        item_type: &str,
    ) -> Option<RuleItemKind> {
        self.creators
            .get(rule_type)
            .and_then(|creator| creator.node_path().item_kind(item_type))
    }

    pub fn rule_types(&self) -> Vec<&'static str> {
        let mut rule_types: Vec<&'static str> = self.creators.iter().map(|entry| *entry.key()).collect();
        rule_types.sort_unstable();
        rule_types
    }

    pub fn len(&self) -> usize {
        self.creators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }
}
