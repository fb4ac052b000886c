use std::time::Duration;

use anyhow::Context;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::info;

use crate::api::unifi::UnifiClient;
use crate::collect::poller::{Poller, StationSource};
use crate::collect::update_failed::UpdateFailed;
use crate::config::controller_config::ControllerConfig;
use crate::host::entity::{sensors_for, BandwidthSensor};
use crate::host::registry::EntityRegistry;

/// Everything one configured controller owns for as long as it is set up.
#[derive(Debug)]
pub struct EntryContext<S> {
    poller: Poller<S>,
    sensors: Vec<BandwidthSensor>,
    update_interval: Duration,
}

pub async fn setup_entry(
    config: &ControllerConfig,
    registry: &mut impl EntityRegistry,
) -> anyhow::Result<EntryContext<UnifiClient>> {
    let client = UnifiClient::new(config)?;
    EntryContext::setup(client, config.update_interval, registry).await
}

pub fn unload_entry<S>(entry: EntryContext<S>, registry: &mut impl EntityRegistry) -> bool {
    let unique_ids: Vec<_> = entry.sensors.iter().map(BandwidthSensor::unique_id).collect();
    registry.remove_entities(&unique_ids)
}

impl<S: StationSource> EntryContext<S> {
    /// Sensors are created from the clients of the first refresh, which must
    /// succeed for the entry to be set up at all.
    pub async fn setup(
        source: S,
        update_interval: Duration,
        registry: &mut impl EntityRegistry,
    ) -> anyhow::Result<Self> {
        let mut poller = Poller::new(source);
        let snapshot = poller
            .refresh()
            .await
            .context("Entry not ready, first refresh failed")?;

        let sensors = sensors_for(&snapshot);
        registry.add_entities(&sensors);

        let entry = Self {
            poller,
            sensors,
            update_interval,
        };
        entry.publish(registry);
        Ok(entry.settled())
    }

    pub async fn refresh_now(
        &mut self,
        registry: &mut impl EntityRegistry,
    ) -> Result<(), UpdateFailed> {
        let result = self.poller.refresh().await.map(|_| ());
        self.publish(registry);
        self.poller.settle();
        result
    }

    /// Refreshes on every tick until `shutdown` changes. A refresh is awaited
    /// before the next tick is taken, so fetches never overlap.
    pub async fn run(
        &mut self,
        registry: &mut impl EntityRegistry,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut ticker = interval_at(Instant::now() + self.update_interval, self.update_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval = %humantime::format_duration(self.update_interval),
            sensors = self.sensors.len(),
            "Polling started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // failures are logged by the poller and surface as unavailable sensors
                    let _ = self.refresh_now(registry).await;
                }
                _ = shutdown.changed() => {
                    info!("Polling stopped");
                    break;
                }
            }
        }
    }
}

impl<S> EntryContext<S> {
    pub fn poller(&self) -> &Poller<S> {
        &self.poller
    }

    pub fn sensors(&self) -> &[BandwidthSensor] {
        &self.sensors
    }

    pub fn publish(&self, registry: &mut impl EntityRegistry) {
        for sensor in &self.sensors {
            registry.update_state(&sensor.unique_id(), sensor.state(&self.poller));
        }
    }

    fn settled(mut self) -> Self {
        self.poller.settle();
        self
    }
}
