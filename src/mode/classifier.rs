//! Key path classification.
//!
//! Keys follow `/<namespace>/<database>/rules/<rule_type>/<item_type>[/<item_name>]`
//! where the namespace may span zero or more segments. The classifier only
//! checks the shape of the key: an unregistered rule type or item type is left
//! for dispatch to reject, so version skew surfaces as an unsupported-* error
//! rather than an unrecognized path.

use crate::constants::PATH_SEPARATOR;
use crate::constants::RULES_NODE;
use crate::ClassifyError;
use crate::DataChangedEvent;
use crate::Error;
use crate::Result;
use crate::RuleChangedEventCreatorRegistry;
use crate::RuleItemKind;

/// Result of classifying one raw notification. Discarded after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedChange<'a> {
    pub database_name: &'a str,
    pub rule_type: &'a str,
    pub item_type: &'a str,
    /// Present for named items, absent for unique items
    pub item_name: Option<&'a str>,
    pub event: &'a DataChangedEvent,
}

impl ClassifiedChange<'_> {
    pub fn kind(&self) -> RuleItemKind {
        match self.item_name {
            Some(_) => RuleItemKind::Named,
            None => RuleItemKind::Unique,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathClassifier {
    namespace: Vec<String>,
}

impl PathClassifier {
    /// `namespace` is the key prefix shared by all rule keys, e.g. `/metadata`.
    /// An empty namespace means keys start directly with the database name.
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace
                .split(PATH_SEPARATOR)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn classify<'a>(
        &self,
        event: &'a DataChangedEvent,
        registry: &RuleChangedEventCreatorRegistry,
    ) -> Result<ClassifiedChange<'a>> {
        let key = event.key.as_str();
        let relative = key
            .strip_prefix(PATH_SEPARATOR)
            .ok_or_else(|| unrecognized(key, "key must start with '/'"))?;
        let segments: Vec<&str> = relative.split(PATH_SEPARATOR).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(unrecognized(key, "empty path segment"));
        }

        let in_namespace = segments.len() >= self.namespace.len()
            && self
                .namespace
                .iter()
                .zip(segments.iter())
                .all(|(expected, actual)| expected == actual);
        if !in_namespace {
            return Err(unrecognized(key, "outside of the configured namespace"));
        }

        let rest = &segments[self.namespace.len()..];
        let (database_name, rule_type, item_type, item_name) = match *rest {
            [database_name, RULES_NODE, rule_type, item_type] => {
                (database_name, rule_type, item_type, None)
            }
            [database_name, RULES_NODE, rule_type, item_type, item_name] => {
                (database_name, rule_type, item_type, Some(item_name))
            }
            _ => {
                return Err(unrecognized(
                    key,
                    "expected <database>/rules/<rule_type>/<item_type>[/<item_name>]",
                ))
            }
        };

        match (registry.declared_kind(rule_type, item_type), item_name) {
            (Some(RuleItemKind::Named), None) => {
                return Err(unrecognized(key, "named item requires an item name"));
            }
            (Some(RuleItemKind::Unique), Some(_)) => {
                return Err(unrecognized(key, "unique item must not carry an item name"));
            }
            _ => {}
        }

        Ok(ClassifiedChange {
            database_name,
            rule_type,
            item_type,
            item_name,
            event,
        })
    }

    /// Builds the key of a named item in the layout `classify` parses.
    pub fn named_item_key(
        &self,
        database_name: &str,
        rule_type: &str,
        item_type: &str,
        item_name: &str,
    ) -> String {
        format!(
            "{}/{}",
            self.unique_item_key(database_name, rule_type, item_type),
            item_name
        )
    }

    pub fn unique_item_key(
        &self,
        database_name: &str,
        rule_type: &str,
        item_type: &str,
    ) -> String {
        let mut key = String::new();
        for segment in self
            .namespace
            .iter()
            .map(String::as_str)
            .chain([database_name, RULES_NODE, rule_type, item_type])
        {
            key.push(PATH_SEPARATOR);
            key.push_str(segment);
        }
        key
    }
}

fn unrecognized(
    key: &str,
    reason: &str,
) -> Error {
    ClassifyError::UnrecognizedPath {
        key: key.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
