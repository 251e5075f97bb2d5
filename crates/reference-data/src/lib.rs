//! Reference Data Library
//!
//! Static classification and cost tables consumed by the delay cost engine:
//! aircraft-to-cluster mapping, flight phase normalization, airport validity
//! and passenger-volume grouping, airline low-cost classification, haul
//! classification and the per-dimension cost tables.
//!
//! The engine only sees the [`ReferenceData`] trait. [`ReferenceTables`] is
//! the in-memory implementation, built from compiled-in defaults with
//! [`ReferenceTables::builtin`] or read from JSON with [`loader::load_tables`].

use cost_model::{AircraftCluster, CostFunction, FlightPhase, Haul, ScenarioTier, VolumeGroup};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod loader;
pub mod tables;

pub use loader::{load_tables, LoadError};
pub use tables::{AirlineRecord, AirportRecord, ClusterProfile, PassengerCostCurves, ReferenceTables};

/// Annual passengers above which an airport belongs to volume group 1
pub const GROUP_1_THRESHOLD_PASSENGERS: u64 = 25_000_000;

/// Flights shorter than this are short haul (km)
pub const SHORT_HAUL_MAX_KM: f64 = 1500.0;

/// Flights shorter than this (and not short haul) are medium haul (km)
pub const MEDIUM_HAUL_MAX_KM: f64 = 4000.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReferenceError {
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
    #[error("No cost data for aircraft cluster {0}")]
    MissingClusterData(AircraftCluster),
}

pub type Result<T> = std::result::Result<T, ReferenceError>;

/// Thresholds and factors that shape the classification and cost lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Annual passengers above which a destination is GROUP_1
    pub group_1_threshold: u64,
    pub short_haul_max_km: f64,
    pub medium_haul_max_km: f64,
    /// Seat load factors per scenario (LOW, BASE, HIGH)
    pub load_factors: [f64; 3],
    /// BASE load factor for wide-body clusters
    pub wide_body_base_load_factor: f64,
    /// Maintenance multipliers relative to the at-gate rate
    pub taxi_maintenance_factor: f64,
    pub en_route_maintenance_factor: f64,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            group_1_threshold: GROUP_1_THRESHOLD_PASSENGERS,
            short_haul_max_km: SHORT_HAUL_MAX_KM,
            medium_haul_max_km: MEDIUM_HAUL_MAX_KM,
            load_factors: [0.65, 0.80, 0.95],
            wide_body_base_load_factor: 0.85,
            taxi_maintenance_factor: 4.0,
            en_route_maintenance_factor: 12.0,
        }
    }
}

impl ReferenceConfig {
    /// Maintenance multiplier for a flight phase
    pub fn phase_factor(&self, phase: FlightPhase) -> f64 {
        match phase {
            FlightPhase::AtGate => 1.0,
            FlightPhase::Taxi => self.taxi_maintenance_factor,
            FlightPhase::EnRoute => self.en_route_maintenance_factor,
        }
    }

    /// Seat load factor for a scenario
    pub fn load_factor(&self, scenario: ScenarioTier, wide_body: bool) -> f64 {
        match scenario {
            ScenarioTier::Base if wide_body => self.wide_body_base_load_factor,
            other => self.load_factors[other.index()],
        }
    }
}

/// Classification lookups and cost tables the delay cost engine consumes.
///
/// Implementations are read-only once built and must be safe to share
/// between concurrent resolutions.
pub trait ReferenceData: Send + Sync {
    /// Map an aircraft type designator to the cluster it is priced as
    fn aircraft_cluster(&self, aircraft_type: &str) -> Result<AircraftCluster>;

    fn normalize_flight_phase(&self, code: &str) -> Result<FlightPhase>;

    /// Succeeds when the ICAO code names a known airport
    fn validate_airport(&self, icao: &str) -> Result<()>;

    fn airport_volume_group(&self, icao: &str) -> Result<VolumeGroup>;

    fn is_low_cost_airline(&self, icao: &str) -> Result<bool>;

    fn haul_class(&self, length_km: f64) -> Result<Haul>;

    fn crew_cost_table(&self, cluster: AircraftCluster, scenario: ScenarioTier) -> Result<CostFunction>;

    fn maintenance_cost_table(
        &self,
        cluster: AircraftCluster,
        scenario: ScenarioTier,
        phase: FlightPhase,
    ) -> Result<CostFunction>;

    /// Lump-sum cost of a curfew violation affecting `affected_passengers`
    fn curfew_cost_table(&self, cluster: AircraftCluster, affected_passengers: u32) -> Result<CostFunction>;

    fn hard_passenger_cost_table(&self, passengers: u32, scenario: ScenarioTier, haul: Haul) -> CostFunction;

    fn soft_passenger_cost_table(&self, passengers: u32, scenario: ScenarioTier) -> CostFunction;

    /// Expected boarded passengers when the caller did not supply a count
    fn passenger_load_estimate(&self, cluster: AircraftCluster, scenario: ScenarioTier) -> Result<u32>;
}

/// Trim and upper-case an identifier before looking it up
pub(crate) fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
