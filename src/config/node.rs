use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct NodeConfig {
    /// Stable id of this node; generated at startup when absent
    #[serde(default)]
    pub instance_id: Option<String>,

    /// Key prefix in front of `<database>/rules/...`, e.g. `/metadata`.
    /// Empty when rule keys start with the database name.
    #[serde(default)]
    pub namespace: String,
}

impl NodeConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(instance_id) = &self.instance_id {
            if instance_id.trim().is_empty() {
                return Err(Error::InvalidConfig("instance_id cannot be blank".into()));
            }
        }

        if self.namespace.is_empty() {
            return Ok(());
        }
        if !self.namespace.starts_with('/') {
            return Err(Error::InvalidConfig(format!(
                "namespace {} must start with '/'",
                self.namespace
            )));
        }
        if self.namespace[1..].split('/').any(str::is_empty) {
            return Err(Error::InvalidConfig(format!(
                "namespace {} contains an empty segment",
                self.namespace
            )));
        }
        Ok(())
    }
}
