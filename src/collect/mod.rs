pub mod poller;
pub mod reading;
pub mod sensor_state;
pub mod snapshot;
pub mod update_failed;

#[cfg(test)]
pub mod fake_source;
