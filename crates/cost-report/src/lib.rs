//! Delay Cost Reports
//!
//! Samples resolved cost functions over a delay grid:
//!
//! - a single flight as one breakdown row per delay ([`CostReport`])
//! - a batch of labelled flights as one row of whole-unit totals per
//!   flight ([`BatchReport`]), with failed flights listed separately

use cost_model::AircraftCluster;
use delay_cost_engine::{CostBreakdown, CostResolutionError, DerivedParameters, EngineConfig, FlightCostRequest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub mod loader;
pub mod report;

pub use report::{build_batch_report, build_report};

/// Delays (minutes) sampled when none are given
pub const DEFAULT_DELAYS: [f64; 10] = [5.0, 10.0, 15.0, 30.0, 45.0, 60.0, 90.0, 120.0, 240.0, 300.0];

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Cost resolution failed: {0}")]
    Resolution(#[from] CostResolutionError),
    #[error("Invalid delay: {0}")]
    InvalidDelay(f64),
    #[error("Batch contains no flights")]
    EmptyBatch,
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// Labelled flights resolved together
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchRequest {
    pub flights: BTreeMap<String, FlightCostRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub delays: Vec<f64>,
    pub engine_config: EngineConfig,
    pub flights: usize,
    pub failures: usize,
}

/// Breakdown of one flight over the delay grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostReport {
    pub metadata: ReportMetadata,
    pub rows: Vec<CostBreakdown>,
    pub derived: DerivedParameters,
}

/// Total cost of one flight at each delay, rounded to whole currency units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRow {
    pub label: String,
    pub aircraft_cluster: AircraftCluster,
    pub passengers_on_board: u32,
    pub missed_connection_passengers: usize,
    pub costs: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub metadata: ReportMetadata,
    pub rows: Vec<BatchRow>,
    /// Label → reason, for flights that could not be resolved
    pub failures: BTreeMap<String, String>,
}

/// Delays must be finite and non-negative
pub fn validate_delays(delays: &[f64]) -> Result<()> {
    match delays.iter().find(|d| !d.is_finite() || **d < 0.0) {
        Some(&bad) => Err(ReportError::InvalidDelay(bad)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delays_are_valid() {
        assert!(validate_delays(&DEFAULT_DELAYS).is_ok());
        assert!(DEFAULT_DELAYS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_negative_delay_rejected() {
        assert!(matches!(
            validate_delays(&[0.0, -5.0]),
            Err(ReportError::InvalidDelay(d)) if d == -5.0
        ));
        assert!(validate_delays(&[f64::NAN]).is_err());
    }

    #[test]
    fn test_batch_request_shape() {
        let batch: BatchRequest = serde_json::from_str(
            r#"{"flights": {"A320": {"aircraft_type": "A320", "flight_phase": "AT_GATE", "passengers": 150}}}"#,
        )
        .unwrap();
        assert_eq!(batch.flights.len(), 1);
        assert_eq!(batch.flights["A320"].passengers, Some(150));
    }
}
