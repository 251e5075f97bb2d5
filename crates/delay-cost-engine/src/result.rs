//! Resolution result

use crate::request::FlightCostRequest;
use cost_model::{AircraftCluster, CostDimension, CostFunction, FlightPhase, Haul, ScenarioTier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Request fields, in the order they are reported
pub const INPUT_PARAMETERS: [&str; 19] = [
    "aircraft_type",
    "flight_phase",
    "passengers",
    "passenger_scenario",
    "is_low_cost_airline",
    "airline",
    "flight_length_km",
    "origin_airport",
    "destination_airport",
    "curfew_violated",
    "curfew_cost",
    "curfew",
    "crew_cost",
    "crew_scenario",
    "maintenance_cost",
    "maintenance_scenario",
    "fuel_cost",
    "fuel_scenario",
    "missed_connections",
];

/// Intermediates recorded during resolution
pub const DERIVED_PARAMETERS: [&str; 19] = [
    "aircraft_cluster",
    "flight_phase",
    "haul",
    "origin_airport",
    "destination_airport",
    "is_low_cost_airline",
    "cost_scenario",
    "passenger_scenario",
    "passengers_on_board",
    "adjusted_passengers",
    "missed_connection_passengers",
    "crew_costs",
    "maintenance_costs",
    "fuel_costs",
    "curfew_costs",
    "passengers_hard_costs",
    "passengers_soft_costs",
    "missed_connection_costs",
    "passenger_costs",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedParameters {
    pub aircraft_cluster: AircraftCluster,
    pub flight_phase: FlightPhase,
    /// Absent when no flight length was given
    pub haul: Option<Haul>,
    pub origin_airport: Option<String>,
    pub destination_airport: Option<String>,
    pub is_low_cost_airline: Option<bool>,
    /// Default tier derived from the airline and the destination
    pub cost_scenario: Option<ScenarioTier>,
    pub passenger_scenario: ScenarioTier,
    pub passengers_on_board: u32,
    /// Boarded passengers excluding missed connections
    pub adjusted_passengers: u32,
    pub missed_connection_passengers: usize,
    pub crew_costs: CostFunction,
    pub maintenance_costs: CostFunction,
    pub fuel_costs: CostFunction,
    pub curfew_costs: CostFunction,
    pub passengers_hard_costs: CostFunction,
    pub passengers_soft_costs: CostFunction,
    pub missed_connection_costs: CostFunction,
    pub passenger_costs: CostFunction,
}

impl DerivedParameters {
    /// Cost function of a single dimension
    pub fn dimension(&self, dimension: CostDimension) -> &CostFunction {
        match dimension {
            CostDimension::Crew => &self.crew_costs,
            CostDimension::Maintenance => &self.maintenance_costs,
            CostDimension::Fuel => &self.fuel_costs,
            CostDimension::Curfew => &self.curfew_costs,
            CostDimension::Passenger => &self.passenger_costs,
        }
    }
}

/// Per-dimension amounts at one delay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub delay: f64,
    pub crew: f64,
    pub maintenance: f64,
    pub fuel: f64,
    pub curfew: f64,
    pub passengers: f64,
    pub total: f64,
}

/// Total cost function plus the request and intermediates it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    pub cost_function: CostFunction,
    pub parameters: FlightCostRequest,
    pub derived: DerivedParameters,
}

impl CostResult {
    /// Total cost at `delay` minutes
    pub fn cost(&self, delay: f64) -> f64 {
        self.cost_function.cost(delay)
    }

    pub fn costs_at(&self, delays: &[f64]) -> Vec<f64> {
        self.cost_function.costs_at(delays)
    }

    pub fn breakdown(&self, delay: f64) -> CostBreakdown {
        let at = |dimension: CostDimension| self.derived.dimension(dimension).cost(delay);
        CostBreakdown {
            delay,
            crew: at(CostDimension::Crew),
            maintenance: at(CostDimension::Maintenance),
            fuel: at(CostDimension::Fuel),
            curfew: at(CostDimension::Curfew),
            passengers: at(CostDimension::Passenger),
            total: self.cost(delay),
        }
    }

    pub fn breakdowns(&self, delays: &[f64]) -> Vec<CostBreakdown> {
        delays.iter().map(|&d| self.breakdown(d)).collect()
    }

    /// Names of the input and derived parameters carried by the result
    pub fn parameter_names(&self) -> Vec<&'static str> {
        std::iter::once("cost_function")
            .chain(INPUT_PARAMETERS)
            .chain(DERIVED_PARAMETERS)
            .collect()
    }
}

fn or_dash<T: fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl fmt::Display for CostResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let request = &self.parameters;
        let derived = &self.derived;

        writeln!(f, "Input parameters")?;
        writeln!(f, "  aircraft_type: {}", request.aircraft_type)?;
        writeln!(f, "  flight_phase: {}", request.flight_phase)?;
        writeln!(f, "  passengers: {}", or_dash(&request.passengers))?;
        writeln!(f, "  passenger_scenario: {}", or_dash(&request.passenger_scenario))?;
        writeln!(f, "  is_low_cost_airline: {}", or_dash(&request.is_low_cost_airline))?;
        writeln!(f, "  airline: {}", or_dash(&request.airline))?;
        writeln!(f, "  flight_length_km: {}", or_dash(&request.flight_length_km))?;
        writeln!(f, "  origin_airport: {}", or_dash(&request.origin_airport))?;
        writeln!(f, "  destination_airport: {}", or_dash(&request.destination_airport))?;
        writeln!(f, "  curfew_violated: {}", request.curfew_violated)?;
        writeln!(f, "  missed_connections: {}", request.missed_connections.len())?;

        writeln!(f, "Derived parameters")?;
        writeln!(f, "  aircraft_cluster: {}", derived.aircraft_cluster)?;
        writeln!(f, "  flight_phase: {}", derived.flight_phase)?;
        writeln!(f, "  haul: {}", or_dash(&derived.haul))?;
        writeln!(f, "  cost_scenario: {}", or_dash(&derived.cost_scenario))?;
        writeln!(f, "  passenger_scenario: {}", derived.passenger_scenario)?;
        writeln!(f, "  passengers_on_board: {}", derived.passengers_on_board)?;
        writeln!(f, "  adjusted_passengers: {}", derived.adjusted_passengers)?;
        writeln!(
            f,
            "  missed_connection_passengers: {}",
            derived.missed_connection_passengers
        )?;

        writeln!(f, "Cost at delay")?;
        for delay in [15.0, 30.0, 60.0, 120.0] {
            let b = self.breakdown(delay);
            writeln!(
                f,
                "  {:>4} min: total {:.2} (crew {:.2}, maintenance {:.2}, fuel {:.2}, curfew {:.2}, passengers {:.2})",
                delay, b.total, b.crew, b.maintenance, b.fuel, b.curfew, b.passengers
            )?;
        }
        Ok(())
    }
}
