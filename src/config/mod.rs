use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::controller_config::ControllerConfig;
use crate::constants::DEFAULT_UPDATE_INTERVAL;

pub mod controller_config;

pub fn default_update_interval() -> Duration {
    DEFAULT_UPDATE_INTERVAL
}

pub fn default_verify_ssl() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct MonitoringConfig {
    #[serde(rename = "controller", default)]
    pub controllers: Vec<ControllerConfig>,
}

impl MonitoringConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(raw)?;
        if config.controllers.is_empty() {
            anyhow::bail!("At least one [[controller]] entry must be configured");
        }
        for controller in &config.controllers {
            controller.validate()?;
        }
        Ok(config)
    }
}
