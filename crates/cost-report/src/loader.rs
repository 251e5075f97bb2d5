//! Request, batch and engine configuration files

use crate::{BatchRequest, ReportError, Result};
use delay_cost_engine::{EngineConfig, FlightCostRequest};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_request(path: impl AsRef<Path>) -> Result<FlightCostRequest> {
    let path = path.as_ref();
    info!("Loading flight request from {:?}", path);
    read_json(path)
}

/// Load a `{"flights": {label: request}}` file; an empty batch is an error
pub fn load_batch(path: impl AsRef<Path>) -> Result<BatchRequest> {
    let path = path.as_ref();
    info!("Loading flight batch from {:?}", path);
    let batch: BatchRequest = read_json(path)?;
    if batch.flights.is_empty() {
        return Err(ReportError::EmptyBatch);
    }
    info!("Loaded {} flights", batch.flights.len());
    Ok(batch)
}

pub fn load_engine_config(path: impl AsRef<Path>) -> Result<EngineConfig> {
    let path = path.as_ref();
    info!("Loading engine configuration from {:?}", path);
    read_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use delay_cost_engine::RateUnit;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_request() {
        let file = write_temp(
            r#"{"aircraft_type": "B738", "flight_phase": "TAXI", "missed_connections": [[33, 177]]}"#,
        );
        let request = load_request(file.path()).unwrap();
        assert_eq!(request.aircraft_type, "B738");
        assert_eq!(request.missed_connections.len(), 1);
    }

    #[test]
    fn test_empty_batch_rejected() {
        let file = write_temp(r#"{"flights": {}}"#);
        assert!(matches!(load_batch(file.path()), Err(ReportError::EmptyBatch)));
    }

    #[test]
    fn test_load_engine_config() {
        let file = write_temp(r#"{"exact_rate_unit": "per_hour"}"#);
        let config = load_engine_config(file.path()).unwrap();
        assert_eq!(config.exact_rate_unit, RateUnit::PerHour);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_request("/nonexistent/request.json"),
            Err(ReportError::Io(_))
        ));
    }
}
