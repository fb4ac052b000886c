use std::fmt;

use serde::Serialize;

use crate::collect::poller::PollStatus;
use crate::collect::snapshot::Snapshot;
use crate::constants::{DOWNLOAD_RATE_FIELD, UPLOAD_RATE_FIELD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Download,
    Upload,
}

impl MetricKind {
    pub const ALL: [MetricKind; 2] = [MetricKind::Download, MetricKind::Upload];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Download => "download",
            MetricKind::Upload => "upload",
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            MetricKind::Download => DOWNLOAD_RATE_FIELD,
            MetricKind::Upload => UPLOAD_RATE_FIELD,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rate of `kind` for `client_id`; a client missing from the snapshot reads 0.
pub fn value(snapshot: &Snapshot, client_id: &str, kind: MetricKind) -> f64 {
    snapshot
        .get(client_id)
        .map(|record| record.number_field(kind.field(), 0.0))
        .unwrap_or(0.0)
}

/// Mirrors the poller's last outcome only. A client that left the snapshot
/// stays available with a value of 0.
pub fn is_available(status: &PollStatus) -> bool {
    status.last_update_success
}

/// A (client, kind) pair. Holds no value of its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reading {
    client_id: String,
    kind: MetricKind,
}

impl Reading {
    pub fn new(client_id: impl Into<String>, kind: MetricKind) -> Self {
        Self {
            client_id: client_id.into(),
            kind,
        }
    }

    pub fn unique_id(&self) -> String {
        format!("{}_{}", self.client_id, self.kind)
    }

    pub fn value(&self, snapshot: &Snapshot) -> f64 {
        value(snapshot, &self.client_id, self.kind)
    }

    pub fn is_available(&self, status: &PollStatus) -> bool {
        is_available(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::poller::PollerState;

    fn status(last_update_success: bool) -> PollStatus {
        PollStatus {
            state: PollerState::Idle,
            last_update_success,
            last_success_at: None,
        }
    }

    #[test]
    fn test_download_and_upload_values() {
        let snapshot =
            Snapshot::from_payload(r#"{"data":[{"mac":"aa:bb","rx_bytes-r":1000,"tx_bytes-r":200}]}"#)
                .unwrap();

        assert_eq!(value(&snapshot, "aa:bb", MetricKind::Download), 1000.0);
        assert_eq!(value(&snapshot, "aa:bb", MetricKind::Upload), 200.0);
        assert!(is_available(&status(true)));
    }

    #[test]
    fn test_absent_client_reads_zero() {
        let snapshot = Snapshot::from_payload(r#"{"data":[]}"#).unwrap();
        let reading = Reading::new("aa:bb", MetricKind::Download);

        assert_eq!(reading.value(&snapshot), 0.0);
        assert!(reading.is_available(&status(true)));
    }

    #[test]
    fn test_missing_fields_read_zero() {
        let snapshot =
            Snapshot::from_payload(r#"{"data":[{"mac":"aa:bb","tx_bytes-r":3.5}]}"#).unwrap();

        assert_eq!(value(&snapshot, "aa:bb", MetricKind::Download), 0.0);
        assert_eq!(value(&snapshot, "aa:bb", MetricKind::Upload), 3.5);
    }

    #[test]
    fn test_availability_mirrors_last_outcome() {
        let reading = Reading::new("aa:bb", MetricKind::Upload);
        assert!(reading.is_available(&status(true)));
        assert!(!reading.is_available(&status(false)));
    }

    #[test]
    fn test_unique_id() {
        assert_eq!(Reading::new("aa:bb", MetricKind::Download).unique_id(), "aa:bb_download");
        assert_eq!(Reading::new("aa:bb", MetricKind::Upload).unique_id(), "aa:bb_upload");
    }
}
