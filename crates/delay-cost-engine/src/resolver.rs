//! Resolution pipeline
//!
//! Classification first, then exact-value validation, scenario
//! derivation and the passenger count, then crew, maintenance, fuel,
//! curfew and passengers in that order. The first failure aborts the
//! whole request.

use crate::config::EngineConfig;
use crate::dimension::{fuel_lookup, resolve_curfew, resolve_dimension, DimensionInput, DimensionPolicy};
use crate::passenger::{adjusted_count, passenger_count, resolve_passenger_costs};
use crate::request::FlightCostRequest;
use crate::result::{CostResult, DerivedParameters};
use crate::scenario::derive_scenario;
use crate::{CostResolutionError, Result};
use cost_model::{AircraftCluster, CostDimension, CostFunction, FlightPhase, Haul, ScenarioTier, VolumeGroup};
use reference_data::ReferenceData;
use tracing::debug;

/// Classification of a request, threaded explicitly through resolution
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContext {
    pub cluster: AircraftCluster,
    pub phase: FlightPhase,
    pub haul: Option<Haul>,
    pub origin_airport: Option<String>,
    pub destination_airport: Option<String>,
    pub destination_group: Option<VolumeGroup>,
    pub is_low_cost_airline: Option<bool>,
    pub scenario: Option<ScenarioTier>,
    pub passenger_scenario: ScenarioTier,
    pub passengers_on_board: u32,
    pub adjusted_passengers: u32,
}

impl ResolvedContext {
    /// Run classification, validation, scenario derivation and the
    /// passenger count for a request
    pub fn build<R: ReferenceData + ?Sized>(
        request: &FlightCostRequest,
        reference: &R,
        config: &EngineConfig,
    ) -> Result<Self> {
        let cluster = reference.aircraft_cluster(&request.aircraft_type)?;
        let phase = reference.normalize_flight_phase(&request.flight_phase)?;
        let haul = request
            .flight_length_km
            .map(|km| reference.haul_class(km))
            .transpose()?;

        let origin_airport = match request.origin_airport.as_deref() {
            Some(code) => {
                reference.validate_airport(code)?;
                Some(normalize_code(code))
            }
            None => None,
        };

        let (destination_airport, destination_group) = match request.destination_airport.as_deref() {
            Some(code) => {
                reference.validate_airport(code)?;
                let group = reference.airport_volume_group(code)?;
                (Some(normalize_code(code)), Some(group))
            }
            None => (None, None),
        };

        let airline_low_cost = request
            .airline
            .as_deref()
            .map(|code| reference.is_low_cost_airline(code))
            .transpose()?;
        let is_low_cost_airline = request.is_low_cost_airline.or(airline_low_cost);

        validate_exact_values(request)?;

        let scenario = derive_scenario(is_low_cost_airline, destination_group);
        if let Some(scenario) = scenario {
            debug!("Derived default scenario {}", scenario);
        }

        let requested_scenario = request.passenger_scenario.or(scenario);
        let passengers_on_board = passenger_count(reference, cluster, request.passengers, requested_scenario)?;
        let passenger_scenario = requested_scenario.unwrap_or(config.baseline_scenario);
        let adjusted_passengers = adjusted_count(passengers_on_board, request.missed_connections.len());

        Ok(Self {
            cluster,
            phase,
            haul,
            origin_airport,
            destination_airport,
            destination_group,
            is_low_cost_airline,
            scenario,
            passenger_scenario,
            passengers_on_board,
            adjusted_passengers,
        })
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Exact values must be finite and non-negative. A curfew cost only
/// counts when the curfew was violated.
fn validate_exact_values(request: &FlightCostRequest) -> Result<()> {
    let curfew_cost = request.curfew_cost.filter(|_| request.curfew_violated);
    let exact = [
        (CostDimension::Crew, request.crew_cost),
        (CostDimension::Maintenance, request.maintenance_cost),
        (CostDimension::Fuel, request.fuel_cost),
        (CostDimension::Curfew, curfew_cost),
    ];

    for (dimension, value) in exact {
        if let Some(value) = value {
            if !value.is_finite() || value < 0.0 {
                return Err(CostResolutionError::InvalidExactValue { dimension, value });
            }
        }
    }
    Ok(())
}

/// Resolve a flight description into its composed cost-of-delay function
pub fn resolve<R: ReferenceData + ?Sized>(
    request: &FlightCostRequest,
    reference: &R,
    config: &EngineConfig,
) -> Result<CostResult> {
    let context = ResolvedContext::build(request, reference, config)?;
    let cluster = context.cluster;
    let rate_unit = config.exact_rate_unit;

    let crew_costs = resolve_dimension(
        &DimensionPolicy::crew(config.baseline_scenario),
        DimensionInput::from_parts(request.crew_cost, request.crew_scenario),
        context.scenario,
        rate_unit,
        |scenario| Ok(reference.crew_cost_table(cluster, scenario)?),
    )?;

    let maintenance_costs = resolve_dimension(
        &DimensionPolicy::maintenance(config.baseline_scenario),
        DimensionInput::from_parts(request.maintenance_cost, request.maintenance_scenario),
        context.scenario,
        rate_unit,
        |scenario| Ok(reference.maintenance_cost_table(cluster, scenario, context.phase)?),
    )?;

    let fuel_costs = resolve_dimension(
        &DimensionPolicy::fuel(),
        DimensionInput::from_parts(request.fuel_cost, request.fuel_scenario),
        context.scenario,
        rate_unit,
        fuel_lookup,
    )?;

    let curfew_costs = resolve_curfew(
        request.curfew_violated,
        request.curfew_cost,
        request.curfew,
        context.passengers_on_board,
        |affected| Ok(reference.curfew_cost_table(cluster, affected)?),
    )?;

    let haul = context.haul.unwrap_or_else(|| {
        debug!("No flight length, pricing passengers as {} haul", config.fallback_haul);
        config.fallback_haul
    });
    let passengers = resolve_passenger_costs(
        reference,
        context.adjusted_passengers,
        context.passenger_scenario,
        haul,
        &request.missed_connections,
    );
    let passenger_costs = passengers.total();

    let cost_function = CostFunction::sum([
        crew_costs.clone(),
        maintenance_costs.clone(),
        fuel_costs.clone(),
        curfew_costs.clone(),
        passenger_costs.clone(),
    ]);

    debug!(
        "Resolved {} ({}) with {} passengers on board",
        request.aircraft_type, cluster, context.passengers_on_board
    );

    Ok(CostResult {
        cost_function,
        parameters: request.clone(),
        derived: DerivedParameters {
            aircraft_cluster: cluster,
            flight_phase: context.phase,
            haul: context.haul,
            origin_airport: context.origin_airport,
            destination_airport: context.destination_airport,
            is_low_cost_airline: context.is_low_cost_airline,
            cost_scenario: context.scenario,
            passenger_scenario: context.passenger_scenario,
            passengers_on_board: context.passengers_on_board,
            adjusted_passengers: context.adjusted_passengers,
            missed_connection_passengers: request.missed_connections.len(),
            crew_costs,
            maintenance_costs,
            fuel_costs,
            curfew_costs,
            passengers_hard_costs: passengers.hard,
            passengers_soft_costs: passengers.soft,
            missed_connection_costs: passengers.missed_connections,
            passenger_costs,
        },
    })
}
