//! Configuration management for the rule change pipeline.
//!
//! Provides hierarchical configuration loading and validation with:
//! - Default values as code base
//! - Configuration file support
//! - Environment variable overrides
//! - Component-wise validation
mod node;
mod pipeline;
pub use node::*;
pub use pipeline::*;


use std::env;

use ::config::Config;
use ::config::Environment;
use ::config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::Result;

/// Environment variable naming an extra configuration file
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

/// Prefix of environment overrides, e.g. `RULE_SYNC__PIPELINE__WORKER_COUNT`
pub const ENV_PREFIX: &str = "RULE_SYNC";

/// Main configuration container
///
/// Combines all subsystem configurations with hierarchical override support:
/// 1. Default values from code implementation
/// 2. Configuration file specified by `CONFIG_PATH`
/// 3. Environment variables (highest priority)
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RuleSyncConfig {
    /// Node identity and key namespace
    #[serde(default)]
    pub node: NodeConfig,
    /// Change event delivery
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl RuleSyncConfig {
    /// Loads configuration from hierarchical sources without validation.
    ///
    /// Callers MUST call `validate()` before using the configuration.
    pub fn new() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            builder = builder.add_source(File::with_name(&config_path).required(true));
        }

        let config: Self = builder
            .add_source(environment())
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Applies additional configuration overrides from file without validation.
    ///
    /// Merging order (later sources override earlier):
    /// 1. Current configuration values
    /// 2. New configuration file
    /// 3. Latest environment variables (highest priority)
    pub fn with_override_config(
        &self,
        path: &str,
    ) -> Result<Self> {
        let config: Self = Config::builder()
            .add_source(Config::try_from(self)?)
            .add_source(File::with_name(path))
            .add_source(environment())
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Validates configuration and returns validated instance.
    pub fn validate(self) -> Result<Self> {
        self.node.validate()?;
        self.pipeline.validate()?;
        Ok(self)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .ignore_empty(true)
        .try_parsing(true)
}
