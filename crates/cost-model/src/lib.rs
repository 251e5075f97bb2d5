//! Cost Model Library
//!
//! Value types shared by the delay cost workspace: the composable
//! [`CostFunction`] mapping a delay in minutes to a monetary amount, and the
//! normalized categories (scenario tier, flight phase, haul, aircraft
//! cluster, airport volume group) that reference tables are keyed by.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod function;

pub use function::CostFunction;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CategoryError {
    #[error("Scenario {0} not found")]
    UnknownScenario(String),
    #[error("Flight phase {0} not found")]
    UnknownPhase(String),
    #[error("Haul {0} not found")]
    UnknownHaul(String),
    #[error("Aircraft cluster {0} not found")]
    UnknownCluster(String),
    #[error("Cost dimension {0} not found")]
    UnknownDimension(String),
}

pub type Result<T> = std::result::Result<T, CategoryError>;

/// Coarse cost-intensity classification applied uniformly across dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScenarioTier {
    #[serde(alias = "low", alias = "Low")]
    Low,
    #[serde(alias = "base", alias = "Base")]
    Base,
    #[serde(alias = "high", alias = "High")]
    High,
}

impl ScenarioTier {
    pub const ALL: [ScenarioTier; 3] = [ScenarioTier::Low, ScenarioTier::Base, ScenarioTier::High];

    /// Position of the tier in per-scenario rate arrays (LOW, BASE, HIGH)
    pub fn index(&self) -> usize {
        match self {
            ScenarioTier::Low => 0,
            ScenarioTier::Base => 1,
            ScenarioTier::High => 2,
        }
    }
}

impl fmt::Display for ScenarioTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScenarioTier::Low => "LOW",
            ScenarioTier::Base => "BASE",
            ScenarioTier::High => "HIGH",
        })
    }
}

impl FromStr for ScenarioTier {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(ScenarioTier::Low),
            "base" => Ok(ScenarioTier::Base),
            "high" => Ok(ScenarioTier::High),
            _ => Err(CategoryError::UnknownScenario(s.to_string())),
        }
    }
}

/// Normalized flight phase at the moment the delay is incurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightPhase {
    AtGate,
    Taxi,
    EnRoute,
}

impl fmt::Display for FlightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FlightPhase::AtGate => "AT_GATE",
            FlightPhase::Taxi => "TAXI",
            FlightPhase::EnRoute => "EN_ROUTE",
        })
    }
}

impl FromStr for FlightPhase {
    type Err = CategoryError;

    /// Accepts the canonical names in any case, with spaces or dashes in
    /// place of underscores, plus the `ATGATE`, `GATE` and `ENROUTE` aliases
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();

        match normalized.as_str() {
            "AT_GATE" | "ATGATE" | "GATE" => Ok(FlightPhase::AtGate),
            "TAXI" => Ok(FlightPhase::Taxi),
            "EN_ROUTE" | "ENROUTE" => Ok(FlightPhase::EnRoute),
            _ => Err(CategoryError::UnknownPhase(s.to_string())),
        }
    }
}

/// Flight-length category used by the passenger hard-cost tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Haul {
    Short,
    Medium,
    Long,
}

impl fmt::Display for Haul {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Haul::Short => "SHORT",
            Haul::Medium => "MEDIUM",
            Haul::Long => "LONG",
        })
    }
}

impl FromStr for Haul {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SHORT" => Ok(Haul::Short),
            "MEDIUM" => Ok(Haul::Medium),
            "LONG" => Ok(Haul::Long),
            _ => Err(CategoryError::UnknownHaul(s.to_string())),
        }
    }
}

/// Destination airport passenger-volume group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolumeGroup {
    /// Airports above the high-volume threshold (25M annual passengers by default)
    #[serde(rename = "GROUP_1")]
    Group1,
    Other,
}

impl fmt::Display for VolumeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VolumeGroup::Group1 => "GROUP_1",
            VolumeGroup::Other => "OTHER",
        })
    }
}

/// An independently resolved contributor to total delay cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CostDimension {
    Crew,
    Maintenance,
    Fuel,
    Curfew,
    Passenger,
}

impl CostDimension {
    pub const ALL: [CostDimension; 5] = [
        CostDimension::Crew,
        CostDimension::Maintenance,
        CostDimension::Fuel,
        CostDimension::Curfew,
        CostDimension::Passenger,
    ];
}

impl fmt::Display for CostDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CostDimension::Crew => "CREW",
            CostDimension::Maintenance => "MAINTENANCE",
            CostDimension::Fuel => "FUEL",
            CostDimension::Curfew => "CURFEW",
            CostDimension::Passenger => "PASSENGER",
        })
    }
}

impl FromStr for CostDimension {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self> {
        CostDimension::ALL
            .into_iter()
            .find(|d| d.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CategoryError::UnknownDimension(s.to_string()))
    }
}

/// Reference aircraft a concrete aircraft type is priced as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AircraftCluster {
    A319,
    A320,
    A321,
    A332,
    AT43,
    AT72,
    AT76,
    B733,
    B734,
    B735,
    B737,
    B738,
    B744,
    B752,
    B763,
    CRJX,
    DH8D,
    E190,
}

impl AircraftCluster {
    pub const ALL: [AircraftCluster; 18] = [
        AircraftCluster::A319,
        AircraftCluster::A320,
        AircraftCluster::A321,
        AircraftCluster::A332,
        AircraftCluster::AT43,
        AircraftCluster::AT72,
        AircraftCluster::AT76,
        AircraftCluster::B733,
        AircraftCluster::B734,
        AircraftCluster::B735,
        AircraftCluster::B737,
        AircraftCluster::B738,
        AircraftCluster::B744,
        AircraftCluster::B752,
        AircraftCluster::B763,
        AircraftCluster::CRJX,
        AircraftCluster::DH8D,
        AircraftCluster::E190,
    ];

    /// ICAO type designator of the reference aircraft
    pub fn code(&self) -> &'static str {
        match self {
            AircraftCluster::A319 => "A319",
            AircraftCluster::A320 => "A320",
            AircraftCluster::A321 => "A321",
            AircraftCluster::A332 => "A332",
            AircraftCluster::AT43 => "AT43",
            AircraftCluster::AT72 => "AT72",
            AircraftCluster::AT76 => "AT76",
            AircraftCluster::B733 => "B733",
            AircraftCluster::B734 => "B734",
            AircraftCluster::B735 => "B735",
            AircraftCluster::B737 => "B737",
            AircraftCluster::B738 => "B738",
            AircraftCluster::B744 => "B744",
            AircraftCluster::B752 => "B752",
            AircraftCluster::B763 => "B763",
            AircraftCluster::CRJX => "CRJX",
            AircraftCluster::DH8D => "DH8D",
            AircraftCluster::E190 => "E190",
        }
    }
}

impl fmt::Display for AircraftCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AircraftCluster {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_uppercase();
        AircraftCluster::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| CategoryError::UnknownCluster(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_parsing_is_case_insensitive() {
        assert_eq!("low".parse::<ScenarioTier>(), Ok(ScenarioTier::Low));
        assert_eq!(" Base ".parse::<ScenarioTier>(), Ok(ScenarioTier::Base));
        assert_eq!("HIGH".parse::<ScenarioTier>(), Ok(ScenarioTier::High));
        assert_eq!(
            "extreme".parse::<ScenarioTier>(),
            Err(CategoryError::UnknownScenario("extreme".to_string()))
        );
    }

    #[test]
    fn test_flight_phase_aliases() {
        assert_eq!("at_gate".parse::<FlightPhase>(), Ok(FlightPhase::AtGate));
        assert_eq!(" AT GATE ".parse::<FlightPhase>(), Ok(FlightPhase::AtGate));
        assert_eq!("en-route".parse::<FlightPhase>(), Ok(FlightPhase::EnRoute));
        assert_eq!("ENROUTE".parse::<FlightPhase>(), Ok(FlightPhase::EnRoute));
        assert_eq!("Taxi".parse::<FlightPhase>(), Ok(FlightPhase::Taxi));
        assert!("CRUISE".parse::<FlightPhase>().is_err());
    }

    #[test]
    fn test_categories_serialize_screaming_snake_case() {
        assert_eq!(serde_json::to_string(&FlightPhase::EnRoute).unwrap(), "\"EN_ROUTE\"");
        assert_eq!(serde_json::to_string(&VolumeGroup::Group1).unwrap(), "\"GROUP_1\"");
        assert_eq!(serde_json::to_string(&AircraftCluster::B738).unwrap(), "\"B738\"");
        assert_eq!(FlightPhase::EnRoute.to_string(), "EN_ROUTE");
    }

    #[test]
    fn test_volume_group_serde_matches_display() {
        for group in [VolumeGroup::Group1, VolumeGroup::Other] {
            let json = serde_json::to_string(&group).unwrap();
            assert_eq!(json, format!("\"{}\"", group));
            assert_eq!(serde_json::from_str::<VolumeGroup>(&json).unwrap(), group);
        }
    }

    #[test]
    fn test_scenario_deserializes_lowercase() {
        let tier: ScenarioTier = serde_json::from_str("\"base\"").unwrap();
        assert_eq!(tier, ScenarioTier::Base);
        let tier: ScenarioTier = serde_json::from_str("\"HIGH\"").unwrap();
        assert_eq!(tier, ScenarioTier::High);
    }

    #[test]
    fn test_cluster_round_trips_through_code() {
        for cluster in AircraftCluster::ALL {
            assert_eq!(cluster.code().parse::<AircraftCluster>(), Ok(cluster));
        }
        assert!("B77W".parse::<AircraftCluster>().is_err());
    }

    #[test]
    fn test_dimension_from_str() {
        assert_eq!("crew".parse::<CostDimension>(), Ok(CostDimension::Crew));
        assert_eq!("CURFEW".parse::<CostDimension>(), Ok(CostDimension::Curfew));
        assert!("catering".parse::<CostDimension>().is_err());
    }

    #[test]
    fn test_scenario_index_order() {
        let indices: Vec<usize> = ScenarioTier::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
