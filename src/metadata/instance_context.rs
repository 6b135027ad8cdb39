use crate::NodeConfig;

/// Identity of the node process applying rule changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceContext {
    instance_id: String,
}

impl InstanceContext {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
        }
    }

    /// Uses the configured instance id, or generates one.
    pub fn from_config(config: &NodeConfig) -> Self {
        match &config.instance_id {
            Some(instance_id) => Self::new(instance_id.clone()),
            None => Self::new(nanoid::nanoid!()),
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }
}
