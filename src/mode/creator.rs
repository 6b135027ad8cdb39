//! Event creators.
//!
//! Two levels of dispatch: a [`RuleChangedEventCreator`] per rule category,
//! which routes by item type to one [`NamedRuleItemChangedEventCreator`] or
//! [`UniqueRuleItemChangedEventCreator`]. Item creators own the mapping from
//! operation kind to `Add`/`Alter`/`Delete` and decode the payload into the
//! item's configuration shape.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use tracing::trace;

use crate::DataChangedEvent;
use crate::DataChangedType;
use crate::DispatchError;
use crate::Error;
use crate::GovernanceEvent;
use crate::NamedItemEvent;
use crate::RegistrationError;
use crate::Result;
use crate::RuleItemKind;
use crate::RuleNodePath;
use crate::UniqueItemEvent;

pub trait NamedRuleItemChangedEventCreator: Send + Sync + 'static {
    fn create(
        &self,
        database_name: &str,
        item_name: &str,
        event: &DataChangedEvent,
    ) -> Result<GovernanceEvent>;
}

pub trait UniqueRuleItemChangedEventCreator: Send + Sync + 'static {
    fn create(
        &self,
        database_name: &str,
        event: &DataChangedEvent,
    ) -> Result<GovernanceEvent>;
}

/// Category-level creator, looked up by rule type in the registry.
pub trait RuleChangedEventCreator: Send + Sync + 'static {
    fn rule_type(&self) -> &'static str;

    fn node_path(&self) -> &RuleNodePath;

    fn create_named(
        &self,
        database_name: &str,
        item_type: &str,
        item_name: &str,
        event: &DataChangedEvent,
    ) -> Result<GovernanceEvent>;

    fn create_unique(
        &self,
        database_name: &str,
        item_type: &str,
        event: &DataChangedEvent,
    ) -> Result<GovernanceEvent>;
}

/// Configuration shape stored under one rule item key.
pub trait RuleItemPayload: Sized + Send + Sync + 'static {
    fn decode(value: &str) -> std::result::Result<Self, String>;
}

/// Decodes a JSON document into `T`.
pub fn decode_json<T: DeserializeOwned>(value: &str) -> std::result::Result<T, String> {
    serde_json::from_str(value).map_err(|e| e.to_string())
}

/// Implements [`RuleItemPayload`] for serde types stored as JSON documents.
#[macro_export]
macro_rules! json_payload {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::RuleItemPayload for $ty {
                fn decode(value: &str) -> std::result::Result<Self, String> {
                    $crate::decode_json(value)
                }
            }
        )+
    };
}

/// Plain string items (e.g. a column name) may be stored raw or as a JSON string.
impl RuleItemPayload for String {
    fn decode(value: &str) -> std::result::Result<Self, String> {
        let value = value.trim();
        if value.starts_with('"') {
            return decode_json(value);
        }
        Ok(value.to_string())
    }
}

fn decode_payload<T: RuleItemPayload>(event: &DataChangedEvent) -> Result<T> {
    if event.value.trim().is_empty() {
        return Err(Error::PayloadDeserialization {
            key: event.key.clone(),
            reason: "empty value".to_string(),
        });
    }
    T::decode(&event.value).map_err(|reason| Error::PayloadDeserialization {
        key: event.key.clone(),
        reason,
    })
}

/// Named item creator for payload type `T`. `wrap` lifts the item event into
/// the owning category's event.
pub struct NamedItemEventCreator<T> {
    wrap: fn(NamedItemEvent<T>) -> GovernanceEvent,
}

impl<T: RuleItemPayload> NamedItemEventCreator<T> {
    pub fn new(wrap: fn(NamedItemEvent<T>) -> GovernanceEvent) -> Self {
        Self { wrap }
    }
}

impl<T: RuleItemPayload> NamedRuleItemChangedEventCreator for NamedItemEventCreator<T> {
    fn create(
        &self,
        database_name: &str,
        item_name: &str,
        event: &DataChangedEvent,
    ) -> Result<GovernanceEvent> {
        // Anything that is neither ADDED nor UPDATED is treated as a delete.
        let item = match event.event_type {
            DataChangedType::Added => NamedItemEvent::Add {
                database_name: database_name.to_string(),
                item_name: item_name.to_string(),
                key: event.key.clone(),
                config: decode_payload(event)?,
            },
            DataChangedType::Updated => NamedItemEvent::Alter {
                database_name: database_name.to_string(),
                item_name: item_name.to_string(),
                key: event.key.clone(),
                config: decode_payload(event)?,
            },
            _ => NamedItemEvent::Delete {
                database_name: database_name.to_string(),
                item_name: item_name.to_string(),
            },
        };
        Ok((self.wrap)(item))
    }
}

pub struct UniqueItemEventCreator<T> {
    wrap: fn(UniqueItemEvent<T>) -> GovernanceEvent,
}

impl<T: RuleItemPayload> UniqueItemEventCreator<T> {
    pub fn new(wrap: fn(UniqueItemEvent<T>) -> GovernanceEvent) -> Self {
        Self { wrap }
    }
}

impl<T: RuleItemPayload> UniqueRuleItemChangedEventCreator for UniqueItemEventCreator<T> {
    fn create(
        &self,
        database_name: &str,
        event: &DataChangedEvent,
    ) -> Result<GovernanceEvent> {
        let item = match event.event_type {
            DataChangedType::Added => UniqueItemEvent::Add {
                database_name: database_name.to_string(),
                key: event.key.clone(),
                config: decode_payload(event)?,
            },
            DataChangedType::Updated => UniqueItemEvent::Alter {
                database_name: database_name.to_string(),
                key: event.key.clone(),
                config: decode_payload(event)?,
            },
            _ => UniqueItemEvent::Delete {
                database_name: database_name.to_string(),
            },
        };
        Ok((self.wrap)(item))
    }
}

/// Table of item creators for one rule category, keyed by item type.
///
/// Every registered item type must be declared in the category's node path
/// with the same kind. Declared item types without a creator are allowed and
/// fail at dispatch time.
pub struct RuleItemEventCreators {
    node_path: RuleNodePath,
    named: HashMap<&'static str, Box<dyn NamedRuleItemChangedEventCreator>>,
    unique: HashMap<&'static str, Box<dyn UniqueRuleItemChangedEventCreator>>,
}

impl RuleItemEventCreators {
    pub fn new(node_path: RuleNodePath) -> Result<Self> {
        node_path.validate()?;
        Ok(Self {
            node_path,
            named: HashMap::new(),
            unique: HashMap::new(),
        })
    }

    pub fn named(
        mut self,
        item_type: &'static str,
        creator: impl NamedRuleItemChangedEventCreator,
    ) -> Result<Self> {
        self.check_declared(item_type, RuleItemKind::Named)?;
        if self.named.insert(item_type, Box::new(creator)).is_some() {
            return Err(self.duplicate(item_type));
        }
        Ok(self)
    }

    pub fn unique(
        mut self,
        item_type: &'static str,
        creator: impl UniqueRuleItemChangedEventCreator,
    ) -> Result<Self> {
        self.check_declared(item_type, RuleItemKind::Unique)?;
        if self.unique.insert(item_type, Box::new(creator)).is_some() {
            return Err(self.duplicate(item_type));
        }
        Ok(self)
    }

    fn check_declared(
        &self,
        item_type: &'static str,
        registered: RuleItemKind,
    ) -> Result<()> {
        let rule_type = self.node_path.rule_type().to_string();
        match self.node_path.item_kind(item_type) {
            None => Err(RegistrationError::UnknownItemType {
                rule_type,
                item_type: item_type.to_string(),
            }
            .into()),
            Some(declared) if declared != registered => Err(RegistrationError::ItemKindMismatch {
                rule_type,
                item_type: item_type.to_string(),
                declared,
                registered,
            }
            .into()),
            Some(_) => Ok(()),
        }
    }

    fn duplicate(
        &self,
        item_type: &'static str,
    ) -> Error {
        RegistrationError::DuplicateItemType {
            rule_type: self.node_path.rule_type().to_string(),
            item_type: item_type.to_string(),
        }
        .into()
    }

    fn unsupported(
        &self,
        item_type: &str,
        kind: RuleItemKind,
    ) -> Error {
        DispatchError::UnsupportedItemType {
            rule_type: self.node_path.rule_type().to_string(),
            item_type: item_type.to_string(),
            kind,
        }
        .into()
    }
}

impl RuleChangedEventCreator for RuleItemEventCreators {
    fn rule_type(&self) -> &'static str {
        self.node_path.rule_type()
    }

    fn node_path(&self) -> &RuleNodePath {
        &self.node_path
    }

    fn create_named(
        &self,
        database_name: &str,
        item_type: &str,
        item_name: &str,
        event: &DataChangedEvent,
    ) -> Result<GovernanceEvent> {
        let creator = self
            .named
            .get(item_type)
            .ok_or_else(|| self.unsupported(item_type, RuleItemKind::Named))?;
        trace!(rule_type = self.rule_type(), item_type, item_name, "create named item event");
        creator.create(database_name, item_name, event)
    }

    fn create_unique(
        &self,
        database_name: &str,
        item_type: &str,
        event: &DataChangedEvent,
    ) -> Result<GovernanceEvent> {
        let creator = self
            .unique
            .get(item_type)
            .ok_or_else(|| self.unsupported(item_type, RuleItemKind::Unique))?;
        trace!(rule_type = self.rule_type(), item_type, "create unique item event");
        creator.create(database_name, event)
    }
}
