use std::sync::Arc;

use tracing::error;
use tracing::trace;
use tracing::warn;

use crate::constants::OUTCOME_APPLIED;
use crate::constants::OUTCOME_DROPPED;
use crate::constants::OUTCOME_IGNORED;
use crate::metrics::RULE_CHANGED_EVENTS;
use crate::DataChangedEvent;
use crate::DataChangedType;
use crate::GovernanceEvent;
use crate::PathClassifier;
use crate::Result;
use crate::RuleChangeOutcome;
use crate::RuleChangedEventCreatorRegistry;
use crate::RuleChangedSubscriber;

/// Raw notification -> classified change -> category creator -> item creator
/// -> domain event -> subscriber.
///
/// Classification and dispatch are pure in-memory transformations; the only
/// shared mutation is the subscriber's apply step.
pub struct RuleChangedEventPipeline {
    classifier: PathClassifier,
    registry: Arc<RuleChangedEventCreatorRegistry>,
    subscriber: Arc<dyn RuleChangedSubscriber>,
}

impl RuleChangedEventPipeline {
    pub fn new(
        classifier: PathClassifier,
        registry: Arc<RuleChangedEventCreatorRegistry>,
        subscriber: Arc<dyn RuleChangedSubscriber>,
    ) -> Self {
        Self {
            classifier,
            registry,
            subscriber,
        }
    }

    pub fn classifier(&self) -> &PathClassifier {
        &self.classifier
    }

    /// Turns a raw notification into a domain event without applying it.
    ///
    /// Returns `Ok(None)` for notifications the watch client marked as ignored.
    pub fn create_event(
        &self,
        event: &DataChangedEvent,
    ) -> Result<Option<GovernanceEvent>> {
        if event.event_type == DataChangedType::Ignored {
            return Ok(None);
        }

        let change = self.classifier.classify(event, &self.registry)?;
        let creator = self.registry.dispatch(change.rule_type)?;
        let governance_event = match change.item_name {
            Some(item_name) => creator.create_named(change.database_name, change.item_type, item_name, event)?,
            None => creator.create_unique(change.database_name, change.item_type, event)?,
        };
        Ok(Some(governance_event))
    }

    /// Creates the domain event and hands it to the subscriber.
    pub fn process(
        &self,
        event: &DataChangedEvent,
    ) -> Result<Option<GovernanceEvent>> {
        let Some(governance_event) = self.create_event(event)? else {
            return Ok(None);
        };
        self.subscriber.on_rule_changed(&governance_event)?;
        Ok(Some(governance_event))
    }

    /// Entry point for the watch client.
    ///
    /// Failures are logged and the notification dropped, so one bad key never
    /// stalls the rest of the stream.
    pub fn on_change(
        &self,
        event: DataChangedEvent,
    ) {
        let outcome = self.handle(&event);
        RULE_CHANGED_EVENTS.with_label_values(&[outcome]).inc();
    }

    /// Runs one notification through the pipeline and returns its outcome label.
    pub(crate) fn handle(
        &self,
        event: &DataChangedEvent,
    ) -> &'static str {
        let result = self.create_event(event).and_then(|created| match created {
            Some(governance_event) => self.subscriber.on_rule_changed(&governance_event),
            None => Ok(RuleChangeOutcome::Skipped),
        });

        match result {
            Ok(RuleChangeOutcome::Applied) => OUTCOME_APPLIED,
            Ok(RuleChangeOutcome::Skipped) => {
                trace!(key = %event.key, "Rule change skipped");
                OUTCOME_IGNORED
            }
            Err(e) if e.is_unsupported() => {
                error!(
                    key = %event.key,
                    event_type = %event.event_type,
                    "Rule change dropped, no creator registered: {}",
                    e
                );
                OUTCOME_DROPPED
            }
            Err(e) => {
                warn!(
                    key = %event.key,
                    event_type = %event.event_type,
                    "Rule change dropped: {}",
                    e
                );
                OUTCOME_DROPPED
            }
        }
    }
}
