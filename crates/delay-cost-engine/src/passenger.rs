//! Passenger cost resolution
//!
//! Boarded passengers who keep their itinerary are charged through the
//! hard and soft tables at the adjusted count. Each passenger who misses a
//! connection is charged one unit of hard + soft cost evaluated at the
//! actual delay until their threshold, and at their rebooked delay after.

use crate::request::MissedConnection;
use crate::{CostResolutionError, Result};
use cost_model::{AircraftCluster, CostFunction, Haul, ScenarioTier};
use reference_data::ReferenceData;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Resolved passenger cost functions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerCosts {
    pub hard: CostFunction,
    pub soft: CostFunction,
    pub missed_connections: CostFunction,
}

impl PassengerCosts {
    pub fn total(&self) -> CostFunction {
        CostFunction::sum([
            self.hard.clone(),
            self.soft.clone(),
            self.missed_connections.clone(),
        ])
    }
}

/// Passengers on board: the supplied count, else the load estimate for
/// the scenario. Fails with `MissingScenario` when neither is available.
pub fn passenger_count<R: ReferenceData + ?Sized>(
    reference: &R,
    cluster: AircraftCluster,
    supplied: Option<u32>,
    scenario: Option<ScenarioTier>,
) -> Result<u32> {
    match (supplied, scenario) {
        (Some(count), _) => Ok(count),
        (None, Some(scenario)) => {
            let estimate = reference.passenger_load_estimate(cluster, scenario)?;
            debug!("Estimated {} passengers for {} at {}", estimate, cluster, scenario);
            Ok(estimate)
        }
        (None, None) => Err(CostResolutionError::MissingScenario),
    }
}

/// Boarded passengers excluding those who miss their connection
pub fn adjusted_count(passengers: u32, missed: usize) -> u32 {
    let missed = u32::try_from(missed).unwrap_or(u32::MAX);
    if missed > passengers {
        warn!(
            "{} missed connections exceed {} passengers on board, adjusted count clamped to 0",
            missed, passengers
        );
    }
    passengers.saturating_sub(missed)
}

/// Build the hard, soft and missed-connection passenger cost functions
pub fn resolve_passenger_costs<R: ReferenceData + ?Sized>(
    reference: &R,
    adjusted: u32,
    scenario: ScenarioTier,
    haul: Haul,
    missed_connections: &[MissedConnection],
) -> PassengerCosts {
    let hard = reference.hard_passenger_cost_table(adjusted, scenario, haul);
    let soft = reference.soft_passenger_cost_table(adjusted, scenario);

    let missed = if missed_connections.is_empty() {
        CostFunction::zero()
    } else {
        let unit = reference.hard_passenger_cost_table(1, scenario, haul) + reference.soft_passenger_cost_table(1, scenario);
        missed_connections
            .iter()
            .map(|connection| unit.clone().capped(connection.threshold, connection.perceived_delay))
            .sum::<CostFunction>()
    };

    debug!(
        "Passenger costs: {} boarded, {} missed connections, {} scenario, {} haul",
        adjusted,
        missed_connections.len(),
        scenario,
        haul
    );

    PassengerCosts {
        hard,
        soft,
        missed_connections: missed,
    }
}
