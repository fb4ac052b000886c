use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::time::timeout;
use tracing::{debug, error};

use crate::collect::snapshot::Snapshot;
use crate::collect::update_failed::UpdateFailed;
use crate::constants::REQUEST_TIMEOUT;

/// Where the raw `stat/sta` payload comes from.
pub trait StationSource {
    fn fetch_stations(&self) -> impl Future<Output = Result<String, UpdateFailed>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Fetching,
    Succeeded,
    Failed,
}

/// What readings need to know about the last refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollStatus {
    pub state: PollerState,
    pub last_update_success: bool,
    pub last_success_at: Option<DateTime<Utc>>,
}

/// Owns the latest good snapshot. A failed refresh keeps the previous one and
/// only flips `last_update_success`.
#[derive(Debug)]
pub struct Poller<S> {
    source: S,
    snapshot: Arc<Snapshot>,
    state: PollerState,
    last_update_success: bool,
    last_success_at: Option<DateTime<Utc>>,
}

impl<S: StationSource> Poller<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            snapshot: Default::default(),
            state: PollerState::Idle,
            last_update_success: false,
            last_success_at: None,
        }
    }

    pub async fn refresh(&mut self) -> Result<Arc<Snapshot>, UpdateFailed> {
        self.transition(PollerState::Fetching);

        match self.fetch().await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.snapshot = Arc::clone(&snapshot);
                self.last_update_success = true;
                self.last_success_at = Some(Utc::now());
                self.transition(PollerState::Succeeded);
                debug!(clients = snapshot.len(), "Client statistics refreshed");
                Ok(snapshot)
            }
            Err(err) => {
                if err.is_timeout() {
                    error!("Timeout while fetching data from UniFi API");
                } else {
                    error!(%err, "Error fetching data from UniFi API");
                }
                self.last_update_success = false;
                self.transition(PollerState::Failed);
                Err(err)
            }
        }
    }

    async fn fetch(&self) -> Result<Snapshot, UpdateFailed> {
        let body = timeout(REQUEST_TIMEOUT, self.source.fetch_stations())
            .await
            .map_err(|_| UpdateFailed::Timeout)??;
        debug!(payload = %body, "API data received");
        Snapshot::from_payload(&body)
    }
}

impl<S> Poller<S> {
    pub fn snapshot(&self) -> &Arc<Snapshot> {
        &self.snapshot
    }

    #[cfg(test)]
    pub fn last_update_success(&self) -> bool {
        self.last_update_success
    }

    #[cfg(test)]
    pub fn state(&self) -> PollerState {
        self.state
    }

    pub fn status(&self) -> PollStatus {
        PollStatus {
            state: self.state,
            last_update_success: self.last_update_success,
            last_success_at: self.last_success_at,
        }
    }

    /// Back to `Idle` once the outcome of the last refresh has been consumed.
    pub fn settle(&mut self) {
        if matches!(self.state, PollerState::Succeeded | PollerState::Failed) {
            self.transition(PollerState::Idle);
        }
    }

    fn transition(&mut self, next: PollerState) {
        debug!(from = ?self.state, to = ?next, "Poller state change");
        self.state = next;
    }
}
