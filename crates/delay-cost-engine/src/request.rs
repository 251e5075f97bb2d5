//! Flight cost request
//!
//! Everything except the aircraft type and flight phase is optional. The
//! request is kept exactly as supplied and echoed back in the result.

use cost_model::ScenarioTier;
use serde::{Deserialize, Serialize};

/// Passenger who misses an onward connection once the delay reaches
/// `threshold` and then arrives `perceived_delay` minutes late on the
/// rebooked itinerary. Serialized as a `[threshold, perceived_delay]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct MissedConnection {
    pub threshold: f64,
    pub perceived_delay: f64,
}

impl MissedConnection {
    pub fn new(threshold: f64, perceived_delay: f64) -> Self {
        Self {
            threshold,
            perceived_delay,
        }
    }
}

impl From<(f64, f64)> for MissedConnection {
    fn from((threshold, perceived_delay): (f64, f64)) -> Self {
        Self::new(threshold, perceived_delay)
    }
}

impl From<MissedConnection> for (f64, f64) {
    fn from(connection: MissedConnection) -> Self {
        (connection.threshold, connection.perceived_delay)
    }
}

/// Curfew specification: the delay from which the curfew is breached and,
/// optionally, how many passengers are affected.
///
/// `Uniform(threshold)` is written as a bare number and affects every
/// passenger on board; `Affected(threshold, n)` is written as a pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurfewSpec {
    Affected(f64, u32),
    Uniform(f64),
}

impl CurfewSpec {
    pub fn threshold(&self) -> f64 {
        match self {
            CurfewSpec::Affected(threshold, _) | CurfewSpec::Uniform(threshold) => *threshold,
        }
    }

    /// Affected passengers, when the specification names them
    pub fn affected_passengers(&self) -> Option<u32> {
        match self {
            CurfewSpec::Affected(_, passengers) => Some(*passengers),
            CurfewSpec::Uniform(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightCostRequest {
    /// ICAO aircraft type designator
    pub aircraft_type: String,
    pub flight_phase: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passengers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_scenario: Option<ScenarioTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_low_cost_airline: Option<bool>,
    /// ICAO code of the operator; consulted for the low-cost flag when
    /// `is_low_cost_airline` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_length_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_airport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_airport: Option<String>,
    #[serde(default)]
    pub curfew_violated: bool,
    /// Lump sum charged for a curfew violation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curfew_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curfew: Option<CurfewSpec>,
    /// Exact crew rate per minute of delay (per hour when so configured)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_scenario: Option<ScenarioTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_scenario: Option<ScenarioTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_scenario: Option<ScenarioTier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missed_connections: Vec<MissedConnection>,
}

impl FlightCostRequest {
    pub fn new(aircraft_type: impl Into<String>, flight_phase: impl Into<String>) -> Self {
        Self {
            aircraft_type: aircraft_type.into(),
            flight_phase: flight_phase.into(),
            passengers: None,
            passenger_scenario: None,
            is_low_cost_airline: None,
            airline: None,
            flight_length_km: None,
            origin_airport: None,
            destination_airport: None,
            curfew_violated: false,
            curfew_cost: None,
            curfew: None,
            crew_cost: None,
            crew_scenario: None,
            maintenance_cost: None,
            maintenance_scenario: None,
            fuel_cost: None,
            fuel_scenario: None,
            missed_connections: Vec::new(),
        }
    }

    pub fn with_passengers(mut self, passengers: u32) -> Self {
        self.passengers = Some(passengers);
        self
    }

    pub fn with_passenger_scenario(mut self, scenario: ScenarioTier) -> Self {
        self.passenger_scenario = Some(scenario);
        self
    }

    pub fn with_low_cost_airline(mut self, is_low_cost: bool) -> Self {
        self.is_low_cost_airline = Some(is_low_cost);
        self
    }

    pub fn with_airline(mut self, icao: impl Into<String>) -> Self {
        self.airline = Some(icao.into());
        self
    }

    pub fn with_flight_length(mut self, length_km: f64) -> Self {
        self.flight_length_km = Some(length_km);
        self
    }

    pub fn with_origin(mut self, icao: impl Into<String>) -> Self {
        self.origin_airport = Some(icao.into());
        self
    }

    pub fn with_destination(mut self, icao: impl Into<String>) -> Self {
        self.destination_airport = Some(icao.into());
        self
    }

    /// Mark the flight as breaching a curfew
    pub fn with_curfew_violation(mut self) -> Self {
        self.curfew_violated = true;
        self
    }

    pub fn with_curfew_cost(mut self, amount: f64) -> Self {
        self.curfew_cost = Some(amount);
        self
    }

    pub fn with_curfew(mut self, spec: CurfewSpec) -> Self {
        self.curfew = Some(spec);
        self
    }

    pub fn with_crew_cost(mut self, rate: f64) -> Self {
        self.crew_cost = Some(rate);
        self
    }

    pub fn with_crew_scenario(mut self, scenario: ScenarioTier) -> Self {
        self.crew_scenario = Some(scenario);
        self
    }

    pub fn with_maintenance_cost(mut self, rate: f64) -> Self {
        self.maintenance_cost = Some(rate);
        self
    }

    pub fn with_maintenance_scenario(mut self, scenario: ScenarioTier) -> Self {
        self.maintenance_scenario = Some(scenario);
        self
    }

    pub fn with_fuel_cost(mut self, rate: f64) -> Self {
        self.fuel_cost = Some(rate);
        self
    }

    pub fn with_fuel_scenario(mut self, scenario: ScenarioTier) -> Self {
        self.fuel_scenario = Some(scenario);
        self
    }

    pub fn with_missed_connection(mut self, threshold: f64, perceived_delay: f64) -> Self {
        self.missed_connections
            .push(MissedConnection::new(threshold, perceived_delay));
        self
    }

    pub fn with_missed_connections(mut self, connections: impl IntoIterator<Item = MissedConnection>) -> Self {
        self.missed_connections.extend(connections);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_request_deserializes() {
        let request: FlightCostRequest =
            serde_json::from_str(r#"{"aircraft_type": "A320", "flight_phase": "AT_GATE"}"#).unwrap();
        assert_eq!(request, FlightCostRequest::new("A320", "AT_GATE"));
        assert!(!request.curfew_violated);
        assert!(request.missed_connections.is_empty());
    }

    #[test]
    fn test_missed_connections_are_pairs() {
        let request: FlightCostRequest = serde_json::from_str(
            r#"{
                "aircraft_type": "A320",
                "flight_phase": "AT_GATE",
                "passengers": 170,
                "passenger_scenario": "base",
                "missed_connections": [[20, 300], [40, 200]]
            }"#,
        )
        .unwrap();

        assert_eq!(request.passenger_scenario, Some(ScenarioTier::Base));
        assert_eq!(
            request.missed_connections,
            vec![MissedConnection::new(20.0, 300.0), MissedConnection::new(40.0, 200.0)]
        );

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["missed_connections"][0], serde_json::json!([20.0, 300.0]));
    }

    #[test]
    fn test_curfew_spec_number_or_pair() {
        let uniform: CurfewSpec = serde_json::from_str("240").unwrap();
        assert_eq!(uniform, CurfewSpec::Uniform(240.0));
        assert_eq!(uniform.affected_passengers(), None);

        let affected: CurfewSpec = serde_json::from_str("[180, 45]").unwrap();
        assert_eq!(affected, CurfewSpec::Affected(180.0, 45));
        assert_eq!(affected.threshold(), 180.0);
        assert_eq!(affected.affected_passengers(), Some(45));
    }

    #[test]
    fn test_builder_sets_fields() {
        let request = FlightCostRequest::new("B738", "TAXI")
            .with_airline("RYR")
            .with_destination("EGLL")
            .with_curfew_violation()
            .with_curfew(CurfewSpec::Uniform(200.0))
            .with_missed_connection(25.0, 185.0);

        assert_eq!(request.airline.as_deref(), Some("RYR"));
        assert!(request.curfew_violated);
        assert_eq!(request.curfew.map(|c| c.threshold()), Some(200.0));
        assert_eq!(request.missed_connections.len(), 1);
    }
}
