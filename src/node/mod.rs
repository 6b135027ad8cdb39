//! Wiring of the rule change pipeline for one node process.
//!
//! ## Example
//! ```ignore
//! let (shutdown_tx, shutdown_rx) = watch::channel(());
//! let node = RuleSyncNodeBuilder::new(RuleSyncConfig::new()?.validate()?)
//!     .build()?;
//! node.context_manager().create_database("db1");
//! let (dispatcher, handles) = node.start(shutdown_rx);
//! dispatcher.on_change(event).await?;
//! ```

mod builder;

pub use builder::*;


use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::ChangeEventDispatcher;
use crate::ContextManager;
use crate::InstanceContext;
use crate::Result;
use crate::RuleChangedEventCreatorRegistry;
use crate::RuleChangedEventPipeline;
use crate::RuleSyncConfig;

pub struct RuleSyncNode {
    pub(super) config: RuleSyncConfig,
    pub(super) registry: Arc<RuleChangedEventCreatorRegistry>,
    pub(super) context_manager: Arc<ContextManager>,
    pub(super) instance_context: Arc<InstanceContext>,
    pub(super) pipeline: Arc<RuleChangedEventPipeline>,
}

impl RuleSyncNode {
    pub fn config(&self) -> &RuleSyncConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<RuleChangedEventCreatorRegistry> {
        &self.registry
    }

    pub fn context_manager(&self) -> &Arc<ContextManager> {
        &self.context_manager
    }

    pub fn instance_context(&self) -> &Arc<InstanceContext> {
        &self.instance_context
    }

    pub fn pipeline(&self) -> &Arc<RuleChangedEventPipeline> {
        &self.pipeline
    }

    /// Starts the per-key ordered dispatcher feeding this node's pipeline.
    pub fn start(
        &self,
        shutdown_signal: watch::Receiver<()>,
    ) -> (ChangeEventDispatcher, Vec<JoinHandle<Result<()>>>) {
        ChangeEventDispatcher::start(self.pipeline.clone(), &self.config.pipeline, shutdown_signal)
    }
}
