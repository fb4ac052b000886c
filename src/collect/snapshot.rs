use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::collect::update_failed::UpdateFailed;
use crate::constants::{CLIENT_ID_FIELD, HOSTNAME_FIELD, NAME_FIELD};

/// One entry of the controller's `data` list, kept as the flat key-value
/// record the controller sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientRecord(Map<String, Value>);

impl ClientRecord {
    pub fn client_id(&self) -> Option<&str> {
        self.0.get(CLIENT_ID_FIELD).and_then(Value::as_str)
    }

    /// Non-empty string field, `None` when absent or not a string.
    pub fn text_field(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Numeric field with a declared default for absent or non-numeric values.
    pub fn number_field(&self, key: &str, default: f64) -> f64 {
        self.0.get(key).and_then(Value::as_f64).unwrap_or(default)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.text_field(HOSTNAME_FIELD)
            .or_else(|| self.text_field(NAME_FIELD))
    }
}

#[derive(Debug, Deserialize)]
struct StationResponse {
    data: Vec<ClientRecord>,
}

/// Client records of one successful fetch, indexed by client identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    clients: BTreeMap<String, ClientRecord>,
}

impl Snapshot {
    pub fn from_payload(body: &str) -> Result<Self, UpdateFailed> {
        let response: StationResponse = serde_json::from_str(body)?;
        Self::from_records(response.data)
    }

    /// A later record with an already seen identifier replaces the earlier one.
    pub fn from_records(records: Vec<ClientRecord>) -> Result<Self, UpdateFailed> {
        let mut clients = BTreeMap::new();
        for (index, record) in records.into_iter().enumerate() {
            let client_id = record
                .client_id()
                .ok_or(UpdateFailed::MissingIdentifier { index })?
                .to_string();
            clients.insert(client_id, record);
        }
        Ok(Self { clients })
    }

    pub fn get(&self, client_id: &str) -> Option<&ClientRecord> {
        self.clients.get(client_id)
    }

    #[cfg(test)]
    pub fn client_ids(&self) -> impl Iterator<Item = &str> {
        self.clients.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClientRecord)> {
        self.clients.iter().map(|(id, record)| (id.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
