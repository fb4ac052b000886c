use std::time::Duration;

pub const STATIONS_PATH: &str = "/proxy/network/api/s/default/stat/sta";
pub const API_KEY_HEADER: &str = "x-api-key";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(30);

pub const DEFAULT_CONFIG_PATH: &str = "/etc/unifi_bandwidth/monitoring.toml";

pub const CLIENT_ID_FIELD: &str = "mac";
pub const HOSTNAME_FIELD: &str = "hostname";
pub const NAME_FIELD: &str = "name";
pub const DOWNLOAD_RATE_FIELD: &str = "rx_bytes-r";
pub const UPLOAD_RATE_FIELD: &str = "tx_bytes-r";

pub const RATE_UNIT: &str = "B/s";
