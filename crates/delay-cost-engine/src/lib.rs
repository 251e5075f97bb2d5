//! Delay Cost Engine
//!
//! Turns a partial description of a delayed flight into a single function
//! mapping delay (minutes) to total cost, together with every intermediate
//! the composition was built from.
//!
//! # Composition
//!
//! ```text
//! total(d) = crew(d) + maintenance(d) + fuel(d) + curfew(d) + passengers(d)
//! ```
//!
//! | Dimension   | Exact value      | Scenario          | Neither            |
//! |-------------|------------------|-------------------|--------------------|
//! | Crew        | rate × d         | table lookup      | BASE table lookup  |
//! | Maintenance | rate × d         | table lookup      | BASE table lookup  |
//! | Fuel        | rate × d         | unsupported       | zero               |
//! | Curfew      | lump sum         | threshold lookup  | zero               |
//! | Passengers  | n/a              | hard + soft table | BASE tables        |
//!
//! A scenario derived from the airline and the destination airport fills
//! the crew, maintenance and passenger dimensions the caller left open.
//! Every failure aborts the whole request; nothing is silently defaulted
//! after an error.

use cost_model::{AircraftCluster, CostDimension};
use reference_data::{ReferenceData, ReferenceError, ReferenceTables};
use thiserror::Error;

pub mod config;
pub mod dimension;
pub mod passenger;
pub mod request;
pub mod resolver;
pub mod result;
pub mod scenario;

pub use config::{EngineConfig, RateUnit};
pub use request::{CurfewSpec, FlightCostRequest, MissedConnection};
pub use resolver::{resolve, ResolvedContext};
pub use result::{CostBreakdown, CostResult, DerivedParameters};
pub use scenario::derive_scenario;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CostResolutionError {
    #[error("Aircraft {0} not found")]
    UnknownAircraft(String),
    #[error("Flight phase {0} not found")]
    UnknownPhase(String),
    #[error("Airport {0} not found")]
    UnknownAirport(String),
    #[error("Airline {0} not found")]
    UnknownAirline(String),
    #[error("Invalid flight length: {0} km")]
    InvalidLength(f64),
    #[error("Both an exact value and a scenario were given for {dimension} costs")]
    ParameterConflict { dimension: CostDimension },
    #[error("Scenario-based {dimension} costs are not available, supply an exact value")]
    UnsupportedOperation { dimension: CostDimension },
    #[error("No passenger count given and no scenario to estimate the load from")]
    MissingScenario,
    #[error("Invalid exact value for {dimension} costs: {value}")]
    InvalidExactValue { dimension: CostDimension, value: f64 },
    #[error("No cost data for aircraft cluster {0}")]
    MissingReferenceData(AircraftCluster),
}

impl CostResolutionError {
    /// Stable machine-readable name of the error variant
    pub fn kind(&self) -> &'static str {
        match self {
            CostResolutionError::UnknownAircraft(_) => "unknown_aircraft",
            CostResolutionError::UnknownPhase(_) => "unknown_phase",
            CostResolutionError::UnknownAirport(_) => "unknown_airport",
            CostResolutionError::UnknownAirline(_) => "unknown_airline",
            CostResolutionError::InvalidLength(_) => "invalid_length",
            CostResolutionError::ParameterConflict { .. } => "parameter_conflict",
            CostResolutionError::UnsupportedOperation { .. } => "unsupported_operation",
            CostResolutionError::MissingScenario => "missing_scenario",
            CostResolutionError::InvalidExactValue { .. } => "invalid_exact_value",
            CostResolutionError::MissingReferenceData(_) => "missing_reference_data",
        }
    }
}

impl From<ReferenceError> for CostResolutionError {
    fn from(err: ReferenceError) -> Self {
        match err {
            ReferenceError::UnknownAircraft(code) => CostResolutionError::UnknownAircraft(code),
            ReferenceError::UnknownPhase(code) => CostResolutionError::UnknownPhase(code),
            ReferenceError::UnknownAirport(code) => CostResolutionError::UnknownAirport(code),
            ReferenceError::UnknownAirline(code) => CostResolutionError::UnknownAirline(code),
            ReferenceError::InvalidLength(km) => CostResolutionError::InvalidLength(km),
            ReferenceError::MissingClusterData(cluster) => CostResolutionError::MissingReferenceData(cluster),
        }
    }
}

pub type Result<T> = std::result::Result<T, CostResolutionError>;

/// Reference data and configuration bundled for repeated resolutions.
///
/// Holds no mutable state; one engine can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct CostEngine<R = ReferenceTables> {
    reference: R,
    config: EngineConfig,
}

impl<R: ReferenceData> CostEngine<R> {
    pub fn new(reference: R) -> Self {
        Self {
            reference,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn reference(&self) -> &R {
        &self.reference
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve one request into its composed cost function
    pub fn resolve(&self, request: &FlightCostRequest) -> Result<CostResult> {
        resolve(request, &self.reference, &self.config)
    }
}

impl CostEngine<ReferenceTables> {
    /// Engine over the compiled-in reference tables
    pub fn builtin() -> Self {
        Self::new(ReferenceTables::builtin())
    }
}

impl Default for CostEngine<ReferenceTables> {
    fn default() -> Self {
        Self::builtin()
    }
}
