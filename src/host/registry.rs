use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::collect::sensor_state::SensorState;
use crate::host::entity::BandwidthSensor;

/// The host side of an entry: where sensors are registered and their state
/// is published.
pub trait EntityRegistry {
    /// Registering an already known unique id replaces the previous entity.
    fn add_entities(&mut self, entities: &[BandwidthSensor]);

    fn update_state(&mut self, unique_id: &str, state: SensorState);

    /// `true` when every id was registered and is now gone.
    fn remove_entities(&mut self, unique_ids: &[String]) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredEntity {
    pub entity_id: String,
    pub name: String,
    pub state: Option<SensorState>,
}

/// In-process registry that logs every state change.
#[derive(Debug, Default)]
pub struct LogRegistry {
    entities: BTreeMap<String, RegisteredEntity>,
}

#[cfg(test)]
impl LogRegistry {
    pub fn get(&self, unique_id: &str) -> Option<&RegisteredEntity> {
        self.entities.get(unique_id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityRegistry for LogRegistry {
    fn add_entities(&mut self, entities: &[BandwidthSensor]) {
        for sensor in entities {
            let entity = RegisteredEntity {
                entity_id: sensor.entity_id().to_string(),
                name: sensor.name().to_string(),
                state: None,
            };
            if self.entities.insert(sensor.unique_id(), entity).is_some() {
                debug!(unique_id = %sensor.unique_id(), "Entity re-registered");
            }
        }
        info!(count = entities.len(), "Entities registered");
    }

    fn update_state(&mut self, unique_id: &str, state: SensorState) {
        let Some(entity) = self.entities.get_mut(unique_id) else {
            warn!(unique_id, "State update for unknown entity");
            return;
        };
        if entity.state == Some(state) {
            return;
        }
        entity.state = Some(state);

        info!(
            entity_id = %entity.entity_id,
            value = state.native_value,
            unit = state.unit,
            available = state.available,
            "{}",
            entity.name
        );
    }

    fn remove_entities(&mut self, unique_ids: &[String]) -> bool {
        let removed = unique_ids
            .iter()
            .filter(|id| self.entities.remove(id.as_str()).is_some())
            .count();
        info!(count = removed, "Entities removed");
        removed == unique_ids.len()
    }
}
