use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use tracing::{info, warn};

use crate::collect::poller::StationSource;
use crate::collect::update_failed::UpdateFailed;
use crate::config::controller_config::ControllerConfig;
use crate::constants::{API_KEY_HEADER, REQUEST_TIMEOUT};

/// Authenticated client for the controller's `stat/sta` endpoint.
#[derive(Debug, Clone)]
pub struct UnifiClient {
    http: reqwest::Client,
    url: String,
}

impl UnifiClient {
    pub fn new(config: &ControllerConfig) -> anyhow::Result<Self> {
        Self::with_url(config, config.stations_url())
    }

    fn with_url(config: &ControllerConfig, url: String) -> anyhow::Result<Self> {
        info!(%url, verify_ssl = config.verify_ssl, "Creating UniFi API client");
        if !config.verify_ssl {
            warn!(host = %config.host, "TLS certificate verification is disabled");
        }

        let http = reqwest::Client::builder()
            .default_headers(default_headers(config)?)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, url })
    }
}

fn default_headers(config: &ControllerConfig) -> anyhow::Result<HeaderMap> {
    let mut api_key = HeaderValue::from_str(config.api_key.expose())
        .context("API key is not a valid header value")?;
    api_key.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(API_KEY_HEADER, api_key);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}

impl StationSource for UnifiClient {
    async fn fetch_stations(&self) -> Result<String, UpdateFailed> {
        let response = self.http.get(&self.url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
