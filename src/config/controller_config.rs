use std::fmt;
use std::time::Duration;

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::constants::STATIONS_PATH;

/// Pre-shared key sent in the `X-API-KEY` header. Never printed.
#[derive(Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    #[cfg(test)]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// One configured controller. Each one becomes an independent entry with its
/// own poller, snapshot and timer.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct ControllerConfig {
    pub host: String,
    pub api_key: ApiKey,
    #[serde(default = "super::default_verify_ssl")]
    pub verify_ssl: bool,
    #[serde(with = "humantime_serde", default = "super::default_update_interval")]
    pub update_interval: Duration,
}

impl ControllerConfig {
    pub fn stations_url(&self) -> String {
        format!("https://{}{}", self.host.trim_end_matches('/'), STATIONS_PATH)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.host.trim().is_empty() {
            bail!("Controller host must not be empty");
        }
        if self.api_key.expose().is_empty() {
            bail!("Controller {} has an empty api_key", self.host);
        }
        if self.update_interval.is_zero() {
            bail!("Controller {} has a zero update_interval", self.host);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(host: &str) -> ControllerConfig {
        ControllerConfig {
            host: host.to_string(),
            api_key: ApiKey::new("secret"),
            verify_ssl: true,
            update_interval: Duration::from_secs(30),
        }
    }

    #[test]
    fn test_stations_url() {
        assert_eq!(
            controller("192.168.1.1").stations_url(),
            "https://192.168.1.1/proxy/network/api/s/default/stat/sta"
        );
        assert_eq!(
            controller("unifi.local:8443/").stations_url(),
            "https://unifi.local:8443/proxy/network/api/s/default/stat/sta"
        );
    }

    #[test]
    fn test_api_key_is_redacted() {
        let debug = format!("{:?}", controller("gw"));
        assert!(!debug.contains("secret"));
        assert!(debug.contains("ApiKey(***)"));
    }
}
