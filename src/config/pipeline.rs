use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PipelineConfig {
    /// Number of workers; notifications for one key always go to the same worker
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    /// Bounded queue length per worker
    #[serde(default = "default_worker_queue_size")]
    pub worker_queue_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            worker_count: default_worker_count(),
            worker_queue_size: default_worker_queue_size(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(Error::InvalidConfig("worker_count must be greater than 0".into()));
        }
        if self.worker_queue_size == 0 {
            return Err(Error::InvalidConfig(
                "worker_queue_size must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

fn default_worker_count() -> usize {
    4
}
fn default_worker_queue_size() -> usize {
    1024
}
