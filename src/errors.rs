//! Rule Change Error Hierarchy
//!
//! Errors are grouped by the pipeline stage that raises them: classification of
//! the raw key, dispatch to a registered creator, registration of creators at
//! startup, and application to live state.

use ::config::ConfigError;

use crate::RuleItemKind;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Raw key could not be mapped onto the rule key-path schema
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    /// Classified change has no registered creator
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Creator or schema rejected at registration time
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// Value cannot be parsed into the item's configuration shape
    #[error("Failed to deserialize payload of {key}: {reason}")]
    PayloadDeserialization { key: String, reason: String },

    /// Target database is unknown to this node
    #[error("Database {0} not found")]
    DatabaseNotFound(String),

    /// Subscriber received an event before its wiring hooks were called
    #[error("Subscriber is not bound: missing {0}")]
    ContextNotBound(&'static str),

    /// Configuration source failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Configuration validation failures
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Inbound queue of the dispatcher is gone
    #[error("Change event dispatcher is closed")]
    DispatcherClosed,

    /// Shutdown signal received
    #[error("Exit")]
    Exit,

    /// Unrecoverable failures
    #[error("Fatal error: {0}")]
    Fatal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("Unrecognized path {key}: {reason}")]
    UnrecognizedPath { key: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Unsupported rule category: {0}")]
    UnsupportedRuleCategory(String),

    #[error("Unsupported {kind} item type {item_type} for rule {rule_type}")]
    UnsupportedItemType {
        rule_type: String,
        item_type: String,
        kind: RuleItemKind,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Rule type {0} is already registered")]
    DuplicateRuleType(String),

    #[error("Item type {item_type} is declared twice for rule {rule_type}")]
    DuplicateItemType {
        rule_type: String,
        item_type: String,
    },

    #[error("Item type {item_type} is not declared in the node path of rule {rule_type}")]
    UnknownItemType {
        rule_type: String,
        item_type: String,
    },

    #[error("Item type {item_type} of rule {rule_type} is declared {declared} but registered {registered}")]
    ItemKindMismatch {
        rule_type: String,
        item_type: String,
        declared: RuleItemKind,
        registered: RuleItemKind,
    },

    #[error("Invalid token {token:?} in node path of rule {rule_type}")]
    InvalidItemType { rule_type: String, token: String },
}

impl Error {
    /// Errors that indicate version skew between configuration writer and
    /// reader rather than a bad notification.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Dispatch(_))
    }
}
