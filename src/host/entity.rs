use crate::collect::poller::Poller;
use crate::collect::reading::{MetricKind, Reading};
use crate::collect::sensor_state::SensorState;
use crate::collect::snapshot::{ClientRecord, Snapshot};
use crate::constants::RATE_UNIT;

/// Host-facing sensor for one reading of one client.
#[derive(Debug, Clone, PartialEq)]
pub struct BandwidthSensor {
    reading: Reading,
    name: String,
    entity_id: String,
}

impl BandwidthSensor {
    pub fn new(client_id: &str, record: &ClientRecord, kind: MetricKind) -> Self {
        let device_name = record.display_name().unwrap_or(client_id);
        Self {
            reading: Reading::new(client_id, kind),
            name: format!("UniFi {device_name} {kind}"),
            entity_id: format!("sensor.unifi_{kind}_{}", client_id.replace(':', "_")),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn unique_id(&self) -> String {
        self.reading.unique_id()
    }

    pub fn unit(&self) -> &'static str {
        RATE_UNIT
    }

    pub fn state<S>(&self, poller: &Poller<S>) -> SensorState {
        SensorState::read(&self.reading, poller.snapshot(), &poller.status())
    }
}

/// A download and an upload sensor for every client in `snapshot`.
pub fn sensors_for(snapshot: &Snapshot) -> Vec<BandwidthSensor> {
    snapshot
        .iter()
        .flat_map(|(client_id, record)| {
            MetricKind::ALL
                .into_iter()
                .map(move |kind| BandwidthSensor::new(client_id, record, kind))
        })
        .collect()
}
