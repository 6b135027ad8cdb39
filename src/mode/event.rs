use std::fmt;

/// Operation kind reported by the coordination-service watch client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataChangedType {
    Added,
    Updated,
    Deleted,
    /// Raised by the watch client for nodes it does not track (e.g. parent
    /// directories). Carries no configuration change.
    Ignored,
}

impl fmt::Display for DataChangedType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            DataChangedType::Added => "ADDED",
            DataChangedType::Updated => "UPDATED",
            DataChangedType::Deleted => "DELETED",
            DataChangedType::Ignored => "IGNORED",
        };
        f.write_str(name)
    }
}

/// Raw notification for one key mutation. Produced once per notification and
/// owned by the pipeline invocation that handles it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataChangedEvent {
    pub key: String,
    pub value: String,
    pub event_type: DataChangedType,
}

impl DataChangedEvent {
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        event_type: DataChangedType,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            event_type,
        }
    }

    pub fn added(
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(key, value, DataChangedType::Added)
    }

    pub fn updated(
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(key, value, DataChangedType::Updated)
    }

    pub fn deleted(key: impl Into<String>) -> Self {
        Self::new(key, String::new(), DataChangedType::Deleted)
    }
}
