use std::sync::Arc;

use arc_swap::ArcSwapOption;
#[cfg(test)]
use mockall::automock;
use tracing::debug;
use tracing::warn;

use crate::metrics::RULE_CHANGES_APPLIED;
use crate::ContextManager;
use crate::Error;
use crate::GovernanceEvent;
use crate::InstanceContext;
use crate::Result;

/// What a subscriber did with one domain event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleChangeOutcome {
    /// Live state was altered
    Applied,
    /// Event targeted state this node does not hold, nothing changed
    Skipped,
}

/// Applies domain events to a node's live rule state.
///
/// `set_context_manager` and `set_instance_context` are wiring hooks, called
/// once before any event flows.
#[cfg_attr(test, automock)]
pub trait RuleChangedSubscriber: Send + Sync + 'static {
    fn set_context_manager(
        &self,
        context_manager: Arc<ContextManager>,
    );

    fn set_instance_context(
        &self,
        instance_context: Arc<InstanceContext>,
    );

    fn on_rule_changed(
        &self,
        event: &GovernanceEvent,
    ) -> Result<RuleChangeOutcome>;
}

#[derive(Default)]
pub struct RuleItemChangedSubscriber {
    context_manager: ArcSwapOption<ContextManager>,
    instance_context: ArcSwapOption<InstanceContext>,
}

impl RuleItemChangedSubscriber {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RuleChangedSubscriber for RuleItemChangedSubscriber {
    fn set_context_manager(
        &self,
        context_manager: Arc<ContextManager>,
    ) {
        self.context_manager.store(Some(context_manager));
    }

    fn set_instance_context(
        &self,
        instance_context: Arc<InstanceContext>,
    ) {
        self.instance_context.store(Some(instance_context));
    }

    fn on_rule_changed(
        &self,
        event: &GovernanceEvent,
    ) -> Result<RuleChangeOutcome> {
        let context_manager = self
            .context_manager
            .load_full()
            .ok_or(Error::ContextNotBound("context manager"))?;
        let instance_context = self
            .instance_context
            .load_full()
            .ok_or(Error::ContextNotBound("instance context"))?;

        let database_name = event.database_name();
        match context_manager.alter_rule_configuration(database_name, |rules| event.apply_to(rules)) {
            Ok(version) => {
                RULE_CHANGES_APPLIED
                    .with_label_values(&[event.rule_type(), event.action()])
                    .inc();
                debug!(
                    instance_id = instance_context.instance_id(),
                    database_name,
                    rule_type = event.rule_type(),
                    action = event.action(),
                    version,
                    "Rule change applied"
                );
                Ok(RuleChangeOutcome::Applied)
            }
            Err(Error::DatabaseNotFound(_)) => {
                warn!(
                    instance_id = instance_context.instance_id(),
                    database_name,
                    rule_type = event.rule_type(),
                    "Database not found, rule change skipped"
                );
                Ok(RuleChangeOutcome::Skipped)
            }
            Err(e) => Err(e),
        }
    }
}
