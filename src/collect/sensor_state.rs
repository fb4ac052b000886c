use serde::Serialize;

use crate::collect::poller::PollStatus;
use crate::collect::reading::Reading;
use crate::collect::snapshot::Snapshot;
use crate::constants::RATE_UNIT;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorState {
    pub native_value: f64,
    pub available: bool,
    pub unit: &'static str,
}

impl SensorState {
    pub fn read(reading: &Reading, snapshot: &Snapshot, status: &PollStatus) -> Self {
        Self {
            native_value: reading.value(snapshot),
            available: reading.is_available(status),
            unit: RATE_UNIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::poller::PollerState;
    use crate::collect::reading::MetricKind;

    #[test]
    fn test_stale_snapshot_reads_unavailable() {
        let snapshot =
            Snapshot::from_payload(r#"{"data":[{"mac":"aa:bb","rx_bytes-r":1000}]}"#).unwrap();
        let status = PollStatus {
            state: PollerState::Failed,
            last_update_success: false,
            last_success_at: None,
        };

        let state = SensorState::read(&Reading::new("aa:bb", MetricKind::Download), &snapshot, &status);
        assert_eq!(state.native_value, 1000.0);
        assert!(!state.available);
        assert_eq!(state.unit, "B/s");
    }
}
