//! Builder for [`RuleSyncNode`].
//!
//! Defaults: the built-in rule categories, a fresh [`ContextManager`] and a
//! [`RuleItemChangedSubscriber`]. Any of them can be overridden before
//! `build()`, which binds the subscriber to the node's runtime context.

use std::sync::Arc;

use tracing::info;

use super::RuleSyncNode;
use crate::ContextManager;
use crate::InstanceContext;
use crate::PathClassifier;
use crate::Result;
use crate::RuleChangedEventCreatorRegistry;
use crate::RuleChangedEventPipeline;
use crate::RuleChangedSubscriber;
use crate::RuleItemChangedSubscriber;
use crate::RuleSyncConfig;

pub struct RuleSyncNodeBuilder {
    config: RuleSyncConfig,
    registry: Option<Arc<RuleChangedEventCreatorRegistry>>,
    context_manager: Option<Arc<ContextManager>>,
    subscriber: Option<Arc<dyn RuleChangedSubscriber>>,
}

impl RuleSyncNodeBuilder {
    pub fn new(config: RuleSyncConfig) -> Self {
        Self {
            config,
            registry: None,
            context_manager: None,
            subscriber: None,
        }
    }

    pub fn registry(
        mut self,
        registry: Arc<RuleChangedEventCreatorRegistry>,
    ) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn context_manager(
        mut self,
        context_manager: Arc<ContextManager>,
    ) -> Self {
        self.context_manager = Some(context_manager);
        self
    }

    pub fn subscriber(
        mut self,
        subscriber: Arc<dyn RuleChangedSubscriber>,
    ) -> Self {
        self.subscriber = Some(subscriber);
        self
    }

    pub fn build(self) -> Result<RuleSyncNode> {
        let config = self.config.validate()?;

        let registry = match self.registry {
            Some(registry) => registry,
            None => Arc::new(RuleChangedEventCreatorRegistry::with_builtin_rules()?),
        };
        let context_manager = self.context_manager.unwrap_or_default();
        let instance_context = Arc::new(InstanceContext::from_config(&config.node));
        let subscriber = self
            .subscriber
            .unwrap_or_else(|| Arc::new(RuleItemChangedSubscriber::new()));

        subscriber.set_context_manager(context_manager.clone());
        subscriber.set_instance_context(instance_context.clone());

        let pipeline = Arc::new(RuleChangedEventPipeline::new(
            PathClassifier::new(&config.node.namespace),
            registry.clone(),
            subscriber,
        ));

        info!(
            instance_id = instance_context.instance_id(),
            namespace = %config.node.namespace,
            rule_types = ?registry.rule_types(),
            "Rule sync node built"
        );

        Ok(RuleSyncNode {
            config,
            registry,
            context_manager,
            instance_context,
            pipeline,
        })
    }
}
