//! In-memory reference tables
//!
//! Built-in values follow the European tactical delay cost reference model:
//! per-minute crew and maintenance rates per reference aircraft and
//! scenario, per-passenger hard (rebooking, compensation, care) and soft
//! (loss of goodwill) cost curves, and a curfew lump sum.

use crate::{normalize_code, ReferenceConfig, ReferenceData, ReferenceError, Result};
use cost_model::{AircraftCluster, CostFunction, FlightPhase, Haul, ScenarioTier, VolumeGroup};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Delay breakpoints (minutes) of the built-in passenger cost curves
const PASSENGER_CURVE_DELAYS: [f64; 10] = [0.0, 15.0, 30.0, 45.0, 60.0, 90.0, 120.0, 180.0, 240.0, 300.0];

/// Per-passenger hard costs (EUR), BASE scenario
const HARD_SHORT: [f64; 10] = [0.0, 0.1, 0.4, 0.9, 1.6, 3.5, 6.5, 18.0, 26.0, 33.0];
const HARD_MEDIUM: [f64; 10] = [0.0, 0.1, 0.5, 1.1, 2.0, 4.2, 7.8, 21.0, 33.0, 42.0];
const HARD_LONG: [f64; 10] = [0.0, 0.2, 0.7, 1.5, 2.6, 5.3, 9.6, 26.0, 44.0, 58.0];

/// Per-passenger soft costs (EUR), BASE scenario
const SOFT: [f64; 10] = [0.0, 0.3, 1.2, 2.6, 4.4, 8.9, 14.5, 27.0, 41.0, 56.0];

/// Cost profile of a reference aircraft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterProfile {
    /// Seat capacity
    pub seats: u32,
    pub wide_body: bool,
    /// Crew cost per minute of delay (LOW, BASE, HIGH)
    pub crew_per_minute: [f64; 3],
    /// Maintenance cost per minute of delay at gate (LOW, BASE, HIGH)
    pub maintenance_at_gate_per_minute: [f64; 3],
    /// Aircraft-related part of a curfew violation (diversion, positioning)
    pub curfew_fixed_cost: f64,
}

impl ClusterProfile {
    pub fn new(
        seats: u32,
        wide_body: bool,
        crew_per_minute: [f64; 3],
        maintenance_at_gate_per_minute: [f64; 3],
        curfew_fixed_cost: f64,
    ) -> Self {
        Self {
            seats,
            wide_body,
            crew_per_minute,
            maintenance_at_gate_per_minute,
            curfew_fixed_cost,
        }
    }

    /// Rates and seats must be usable as cost table entries
    pub fn is_valid(&self) -> bool {
        let rates_ok = self
            .crew_per_minute
            .iter()
            .chain(self.maintenance_at_gate_per_minute.iter())
            .chain(std::iter::once(&self.curfew_fixed_cost))
            .all(|r| r.is_finite() && *r >= 0.0);
        rates_ok && self.seats > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    pub name: String,
    pub annual_passengers: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlineRecord {
    pub name: String,
    pub low_cost: bool,
}

/// Per-passenger cost curves and scenario multipliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerCostCurves {
    pub hard_short: Vec<(f64, f64)>,
    pub hard_medium: Vec<(f64, f64)>,
    pub hard_long: Vec<(f64, f64)>,
    pub soft: Vec<(f64, f64)>,
    /// Multipliers per scenario (LOW, BASE, HIGH)
    pub hard_scenario_factors: [f64; 3],
    pub soft_scenario_factors: [f64; 3],
    /// Care and accommodation per passenger affected by a curfew
    pub curfew_cost_per_passenger: f64,
}

impl Default for PassengerCostCurves {
    fn default() -> Self {
        let curve = |costs: [f64; 10]| -> Vec<(f64, f64)> { PASSENGER_CURVE_DELAYS.iter().copied().zip(costs).collect() };
        Self {
            hard_short: curve(HARD_SHORT),
            hard_medium: curve(HARD_MEDIUM),
            hard_long: curve(HARD_LONG),
            soft: curve(SOFT),
            hard_scenario_factors: [0.5, 1.0, 1.6],
            soft_scenario_factors: [0.5, 1.0, 1.7],
            curfew_cost_per_passenger: 180.0,
        }
    }
}

/// Breakpoints must have distinct finite delays and finite costs that
/// never fall as delay grows
fn is_valid_curve(points: &[(f64, f64)]) -> bool {
    let mut sorted = points.to_vec();
    if sorted.iter().any(|(delay, cost)| !delay.is_finite() || !cost.is_finite() || *cost < 0.0) {
        return false;
    }
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
    sorted.windows(2).all(|w| w[1].0 > w[0].0 && w[1].1 >= w[0].1)
}

impl PassengerCostCurves {
    /// Curves and multipliers must keep passenger costs non-negative
    pub fn is_valid(&self) -> bool {
        let curves_ok = [&self.hard_short, &self.hard_medium, &self.hard_long, &self.soft]
            .into_iter()
            .all(|curve| is_valid_curve(curve));
        let factors_ok = self
            .hard_scenario_factors
            .iter()
            .chain(self.soft_scenario_factors.iter())
            .chain(std::iter::once(&self.curfew_cost_per_passenger))
            .all(|f| f.is_finite() && *f >= 0.0);
        curves_ok && factors_ok
    }

    fn hard_curve(&self, haul: Haul) -> &[(f64, f64)] {
        match haul {
            Haul::Short => &self.hard_short,
            Haul::Medium => &self.hard_medium,
            Haul::Long => &self.hard_long,
        }
    }
}

/// In-memory [`ReferenceData`] implementation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceTables {
    config: ReferenceConfig,
    /// Variant designator → reference cluster (reference codes map to themselves)
    aircraft_aliases: BTreeMap<String, AircraftCluster>,
    clusters: BTreeMap<AircraftCluster, ClusterProfile>,
    airports: BTreeMap<String, AirportRecord>,
    airlines: BTreeMap<String, AirlineRecord>,
    passenger_costs: PassengerCostCurves,
}

impl ReferenceTables {
    /// Empty tables with default configuration and passenger curves
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables populated with the compiled-in reference values
    pub fn builtin() -> Self {
        let mut tables = Self::new();
        tables.load_clusters();
        tables.load_aliases();
        tables.load_airports();
        tables.load_airlines();
        tables
    }

    pub fn with_config(mut self, config: ReferenceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_passenger_costs(mut self, curves: PassengerCostCurves) -> Self {
        self.passenger_costs = curves;
        self
    }

    pub fn config(&self) -> &ReferenceConfig {
        &self.config
    }

    pub fn insert_cluster(&mut self, cluster: AircraftCluster, profile: ClusterProfile) {
        self.clusters.insert(cluster, profile);
    }

    pub fn insert_alias(&mut self, aircraft_type: &str, cluster: AircraftCluster) {
        self.aircraft_aliases.insert(normalize_code(aircraft_type), cluster);
    }

    pub fn insert_airport(&mut self, icao: &str, name: impl Into<String>, annual_passengers: u64) {
        self.airports.insert(
            normalize_code(icao),
            AirportRecord {
                name: name.into(),
                annual_passengers,
            },
        );
    }

    pub fn insert_airline(&mut self, icao: &str, name: impl Into<String>, low_cost: bool) {
        self.airlines.insert(
            normalize_code(icao),
            AirlineRecord {
                name: name.into(),
                low_cost,
            },
        );
    }

    /// Clusters with a cost profile, in code order
    pub fn clusters(&self) -> impl Iterator<Item = (&AircraftCluster, &ClusterProfile)> {
        self.clusters.iter()
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    pub fn airline_count(&self) -> usize {
        self.airlines.len()
    }

    fn profile(&self, cluster: AircraftCluster) -> Result<&ClusterProfile> {
        self.clusters
            .get(&cluster)
            .ok_or(ReferenceError::MissingClusterData(cluster))
    }

    fn airport(&self, icao: &str) -> Result<&AirportRecord> {
        self.airports
            .get(&normalize_code(icao))
            .ok_or_else(|| ReferenceError::UnknownAirport(icao.to_string()))
    }

    fn load_clusters(&mut self) {
        use AircraftCluster::*;

        // (cluster, seats, wide body, crew €/min, maintenance at gate €/min, curfew fixed €)
        let profiles = [
            (A319, 156, false, [0.0, 7.4, 12.6], [0.4, 0.9, 1.5], 18_000.0),
            (A320, 188, false, [0.0, 8.3, 14.1], [0.5, 1.0, 1.7], 20_000.0),
            (A321, 235, false, [0.0, 9.6, 16.2], [0.6, 1.2, 2.0], 23_000.0),
            (A332, 328, true, [0.0, 17.9, 30.4], [1.1, 2.3, 3.8], 45_000.0),
            (AT43, 48, false, [0.0, 3.1, 5.2], [0.2, 0.4, 0.6], 7_000.0),
            (AT72, 74, false, [0.0, 3.6, 6.1], [0.2, 0.5, 0.8], 8_500.0),
            (AT76, 78, false, [0.0, 3.8, 6.4], [0.2, 0.5, 0.8], 9_000.0),
            (B733, 148, false, [0.0, 7.0, 11.9], [0.5, 1.0, 1.7], 17_000.0),
            (B734, 176, false, [0.0, 7.8, 13.2], [0.5, 1.1, 1.8], 19_000.0),
            (B735, 126, false, [0.0, 6.6, 11.2], [0.4, 0.9, 1.5], 16_000.0),
            (B737, 149, false, [0.0, 7.2, 12.2], [0.4, 0.9, 1.5], 18_000.0),
            (B738, 189, false, [0.0, 8.4, 14.3], [0.5, 1.0, 1.7], 20_000.0),
            (B744, 455, true, [0.0, 22.5, 38.2], [1.6, 3.3, 5.5], 60_000.0),
            (B752, 235, false, [0.0, 10.9, 18.5], [0.7, 1.4, 2.3], 25_000.0),
            (B763, 270, true, [0.0, 14.6, 24.8], [0.9, 1.9, 3.1], 38_000.0),
            (CRJX, 100, false, [0.0, 4.9, 8.3], [0.3, 0.6, 1.0], 11_000.0),
            (DH8D, 80, false, [0.0, 4.1, 7.0], [0.2, 0.5, 0.8], 9_500.0),
            (E190, 106, false, [0.0, 5.3, 9.0], [0.3, 0.7, 1.1], 12_000.0),
        ];

        for (cluster, seats, wide_body, crew, maintenance, curfew) in profiles {
            self.insert_cluster(cluster, ClusterProfile::new(seats, wide_body, crew, maintenance, curfew));
        }
    }

    fn load_aliases(&mut self) {
        use AircraftCluster::*;

        let aliases = [
            ("A318", A319),
            ("A19N", A319),
            ("A20N", A320),
            ("A21N", A321),
            ("A333", A332),
            ("A339", A332),
            ("A359", A332),
            ("AT45", AT43),
            ("AT75", AT72),
            ("B736", B737),
            ("B37M", B737),
            ("B739", B738),
            ("B38M", B738),
            ("B39M", B738),
            ("B753", B752),
            ("B762", B763),
            ("B764", B763),
            ("B788", B763),
            ("B789", B763),
            ("B748", B744),
            ("CRJ7", CRJX),
            ("CRJ9", CRJX),
            ("DH8C", DH8D),
            ("E170", E190),
            ("E195", E190),
            ("E75L", E190),
            ("E290", E190),
            ("E295", E190),
        ];

        for (code, cluster) in aliases {
            self.insert_alias(code, cluster);
        }
    }

    fn load_airports(&mut self) {
        let airports = [
            ("EGLL", "London Heathrow", 80_900_000),
            ("LFPG", "Paris Charles de Gaulle", 76_100_000),
            ("EHAM", "Amsterdam Schiphol", 71_700_000),
            ("EDDF", "Frankfurt", 70_500_000),
            ("LEMD", "Madrid Barajas", 61_700_000),
            ("LEBL", "Barcelona El Prat", 52_700_000),
            ("LTFM", "Istanbul", 52_000_000),
            ("EDDM", "Munich", 47_900_000),
            ("EGKK", "London Gatwick", 46_600_000),
            ("LIRF", "Rome Fiumicino", 43_500_000),
            ("LFPO", "Paris Orly", 33_100_000),
            ("EIDW", "Dublin", 32_900_000),
            ("LOWW", "Vienna", 31_700_000),
            ("LSZH", "Zurich", 31_500_000),
            ("LPPT", "Lisbon", 31_200_000),
            ("EKCH", "Copenhagen", 30_300_000),
            ("LEPA", "Palma de Mallorca", 29_700_000),
            ("EGCC", "Manchester", 29_400_000),
            ("LIMC", "Milan Malpensa", 28_800_000),
            ("ENGM", "Oslo Gardermoen", 28_600_000),
            ("EBBR", "Brussels", 26_400_000),
            ("ESSA", "Stockholm Arlanda", 25_600_000),
            ("LGAV", "Athens", 25_500_000),
            ("EDDB", "Berlin Brandenburg", 24_000_000),
            ("EFHK", "Helsinki", 21_900_000),
            ("EPWA", "Warsaw Chopin", 18_800_000),
            ("LKPR", "Prague", 17_800_000),
            ("LHBP", "Budapest", 16_200_000),
            ("EGPH", "Edinburgh", 14_700_000),
            ("LROP", "Bucharest Otopeni", 14_700_000),
            ("LFML", "Marseille Provence", 10_100_000),
            ("LIML", "Milan Linate", 6_500_000),
        ];

        for (icao, name, passengers) in airports {
            self.insert_airport(icao, name, passengers);
        }
    }

    fn load_airlines(&mut self) {
        let airlines = [
            ("RYR", "Ryanair", true),
            ("EZY", "easyJet", true),
            ("EJU", "easyJet Europe", true),
            ("WZZ", "Wizz Air", true),
            ("VLG", "Vueling", true),
            ("NAX", "Norwegian Air Shuttle", true),
            ("EWG", "Eurowings", true),
            ("TRA", "Transavia", true),
            ("DLH", "Lufthansa", false),
            ("AFR", "Air France", false),
            ("BAW", "British Airways", false),
            ("KLM", "KLM Royal Dutch Airlines", false),
            ("IBE", "Iberia", false),
            ("ITY", "ITA Airways", false),
            ("SAS", "Scandinavian Airlines", false),
            ("TAP", "TAP Air Portugal", false),
            ("SWR", "Swiss International Air Lines", false),
            ("AUA", "Austrian Airlines", false),
            ("THY", "Turkish Airlines", false),
            ("FIN", "Finnair", false),
            ("LOT", "LOT Polish Airlines", false),
            ("EIN", "Aer Lingus", false),
        ];

        for (icao, name, low_cost) in airlines {
            self.insert_airline(icao, name, low_cost);
        }
    }
}

impl ReferenceData for ReferenceTables {
    fn aircraft_cluster(&self, aircraft_type: &str) -> Result<AircraftCluster> {
        let code = normalize_code(aircraft_type);
        if let Some(cluster) = self.aircraft_aliases.get(&code) {
            return Ok(*cluster);
        }
        code.parse::<AircraftCluster>()
            .map_err(|_| ReferenceError::UnknownAircraft(aircraft_type.to_string()))
    }

    fn normalize_flight_phase(&self, code: &str) -> Result<FlightPhase> {
        code.parse::<FlightPhase>()
            .map_err(|_| ReferenceError::UnknownPhase(code.to_string()))
    }

    fn validate_airport(&self, icao: &str) -> Result<()> {
        self.airport(icao).map(|_| ())
    }

    fn airport_volume_group(&self, icao: &str) -> Result<VolumeGroup> {
        let airport = self.airport(icao)?;
        if airport.annual_passengers > self.config.group_1_threshold {
            Ok(VolumeGroup::Group1)
        } else {
            Ok(VolumeGroup::Other)
        }
    }

    fn is_low_cost_airline(&self, icao: &str) -> Result<bool> {
        self.airlines
            .get(&normalize_code(icao))
            .map(|airline| airline.low_cost)
            .ok_or_else(|| ReferenceError::UnknownAirline(icao.to_string()))
    }

    fn haul_class(&self, length_km: f64) -> Result<Haul> {
        if !length_km.is_finite() || length_km <= 0.0 {
            return Err(ReferenceError::InvalidLength(length_km));
        }
        if length_km < self.config.short_haul_max_km {
            Ok(Haul::Short)
        } else if length_km < self.config.medium_haul_max_km {
            Ok(Haul::Medium)
        } else {
            Ok(Haul::Long)
        }
    }

    fn crew_cost_table(&self, cluster: AircraftCluster, scenario: ScenarioTier) -> Result<CostFunction> {
        let profile = self.profile(cluster)?;
        Ok(CostFunction::linear(profile.crew_per_minute[scenario.index()]))
    }

    fn maintenance_cost_table(
        &self,
        cluster: AircraftCluster,
        scenario: ScenarioTier,
        phase: FlightPhase,
    ) -> Result<CostFunction> {
        let profile = self.profile(cluster)?;
        let rate = profile.maintenance_at_gate_per_minute[scenario.index()] * self.config.phase_factor(phase);
        Ok(CostFunction::linear(rate))
    }

    fn curfew_cost_table(&self, cluster: AircraftCluster, affected_passengers: u32) -> Result<CostFunction> {
        let profile = self.profile(cluster)?;
        let amount = profile.curfew_fixed_cost
            + self.passenger_costs.curfew_cost_per_passenger * f64::from(affected_passengers);
        Ok(CostFunction::constant(amount))
    }

    fn hard_passenger_cost_table(&self, passengers: u32, scenario: ScenarioTier, haul: Haul) -> CostFunction {
        if passengers == 0 {
            return CostFunction::zero();
        }
        let factor = self.passenger_costs.hard_scenario_factors[scenario.index()];
        CostFunction::piecewise(self.passenger_costs.hard_curve(haul).iter().copied())
            .scaled(factor * f64::from(passengers))
    }

    fn soft_passenger_cost_table(&self, passengers: u32, scenario: ScenarioTier) -> CostFunction {
        if passengers == 0 {
            return CostFunction::zero();
        }
        let factor = self.passenger_costs.soft_scenario_factors[scenario.index()];
        CostFunction::piecewise(self.passenger_costs.soft.iter().copied()).scaled(factor * f64::from(passengers))
    }

    fn passenger_load_estimate(&self, cluster: AircraftCluster, scenario: ScenarioTier) -> Result<u32> {
        let profile = self.profile(cluster)?;
        let factor = self.config.load_factor(scenario, profile.wide_body);
        Ok((f64::from(profile.seats) * factor).round() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_cluster() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.cluster_count(), AircraftCluster::ALL.len());
        for (_, profile) in tables.clusters() {
            assert!(profile.is_valid());
            assert!(profile.crew_per_minute[1] > 0.0, "BASE crew rate must be non-zero");
            assert!(profile.maintenance_at_gate_per_minute[1] > 0.0);
        }
    }

    #[test]
    fn test_aircraft_cluster_lookup() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.aircraft_cluster("A320"), Ok(AircraftCluster::A320));
        assert_eq!(tables.aircraft_cluster(" a20n "), Ok(AircraftCluster::A320));
        assert_eq!(tables.aircraft_cluster("B38M"), Ok(AircraftCluster::B738));
        assert_eq!(
            tables.aircraft_cluster("ZZZZ"),
            Err(ReferenceError::UnknownAircraft("ZZZZ".to_string()))
        );
    }

    #[test]
    fn test_flight_phase_normalization() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.normalize_flight_phase(" at_gate "), Ok(FlightPhase::AtGate));
        assert_eq!(
            tables.normalize_flight_phase("BOARDING"),
            Err(ReferenceError::UnknownPhase("BOARDING".to_string()))
        );
    }

    #[test]
    fn test_airport_volume_groups() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.airport_volume_group("EGLL"), Ok(VolumeGroup::Group1));
        assert_eq!(tables.airport_volume_group("lgav"), Ok(VolumeGroup::Group1));
        assert_eq!(tables.airport_volume_group("EDDB"), Ok(VolumeGroup::Other));
        assert_eq!(tables.validate_airport("LKPR"), Ok(()));
        assert_eq!(
            tables.validate_airport("XXXX"),
            Err(ReferenceError::UnknownAirport("XXXX".to_string()))
        );
    }

    #[test]
    fn test_volume_group_threshold_is_configurable() {
        let config = ReferenceConfig {
            group_1_threshold: 60_000_000,
            ..ReferenceConfig::default()
        };
        let tables = ReferenceTables::builtin().with_config(config);
        assert_eq!(tables.airport_volume_group("EGLL"), Ok(VolumeGroup::Group1));
        assert_eq!(tables.airport_volume_group("LIRF"), Ok(VolumeGroup::Other));
    }

    #[test]
    fn test_low_cost_airlines() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.is_low_cost_airline("RYR"), Ok(true));
        assert_eq!(tables.is_low_cost_airline("dlh"), Ok(false));
        assert_eq!(
            tables.is_low_cost_airline("QQQ"),
            Err(ReferenceError::UnknownAirline("QQQ".to_string()))
        );
    }

    #[test]
    fn test_haul_classes() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.haul_class(800.0), Ok(Haul::Short));
        assert_eq!(tables.haul_class(2000.0), Ok(Haul::Medium));
        assert_eq!(tables.haul_class(6500.0), Ok(Haul::Long));
        assert_eq!(tables.haul_class(0.0), Err(ReferenceError::InvalidLength(0.0)));
        assert!(tables.haul_class(-10.0).is_err());
        assert!(tables.haul_class(f64::NAN).is_err());
    }

    #[test]
    fn test_crew_and_maintenance_tables() {
        let tables = ReferenceTables::builtin();
        let crew = tables.crew_cost_table(AircraftCluster::A320, ScenarioTier::Base).unwrap();
        assert!((crew.cost(10.0) - 83.0).abs() < 1e-9);

        let low = tables.crew_cost_table(AircraftCluster::A320, ScenarioTier::Low).unwrap();
        assert_eq!(low.cost(60.0), 0.0);

        let gate = tables
            .maintenance_cost_table(AircraftCluster::A320, ScenarioTier::Base, FlightPhase::AtGate)
            .unwrap();
        let airborne = tables
            .maintenance_cost_table(AircraftCluster::A320, ScenarioTier::Base, FlightPhase::EnRoute)
            .unwrap();
        assert!((airborne.cost(10.0) - 12.0 * gate.cost(10.0)).abs() < 1e-9);
    }

    #[test]
    fn test_missing_cluster_profile() {
        let tables = ReferenceTables::new();
        assert_eq!(
            tables.crew_cost_table(AircraftCluster::B744, ScenarioTier::Base),
            Err(ReferenceError::MissingClusterData(AircraftCluster::B744))
        );
    }

    #[test]
    fn test_passenger_tables_scale_with_count() {
        let tables = ReferenceTables::builtin();
        let one = tables.hard_passenger_cost_table(1, ScenarioTier::Base, Haul::Short);
        let many = tables.hard_passenger_cost_table(170, ScenarioTier::Base, Haul::Short);
        assert_eq!(one.cost(0.0), 0.0);
        assert!((many.cost(60.0) - 170.0 * one.cost(60.0)).abs() < 1e-6);

        let soft = tables.soft_passenger_cost_table(1, ScenarioTier::High);
        let soft_base = tables.soft_passenger_cost_table(1, ScenarioTier::Base);
        assert!(soft.cost(90.0) > soft_base.cost(90.0));
        assert!(tables.soft_passenger_cost_table(0, ScenarioTier::Base).is_zero());
    }

    #[test]
    fn test_longer_hauls_cost_more() {
        let tables = ReferenceTables::builtin();
        let short = tables.hard_passenger_cost_table(1, ScenarioTier::Base, Haul::Short);
        let long = tables.hard_passenger_cost_table(1, ScenarioTier::Base, Haul::Long);
        assert!(long.cost(180.0) > short.cost(180.0));
    }

    #[test]
    fn test_curfew_lump_sum() {
        let tables = ReferenceTables::builtin();
        let curfew = tables.curfew_cost_table(AircraftCluster::A320, 100).unwrap();
        assert_eq!(curfew.cost(0.0), 20_000.0 + 180.0 * 100.0);
    }

    #[test]
    fn test_passenger_load_estimate() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.passenger_load_estimate(AircraftCluster::A320, ScenarioTier::Base), Ok(150));
        assert_eq!(tables.passenger_load_estimate(AircraftCluster::B738, ScenarioTier::Base), Ok(151));
        // Wide-body BASE uses the 85% load factor
        assert_eq!(tables.passenger_load_estimate(AircraftCluster::B744, ScenarioTier::Base), Ok(387));
        assert_eq!(tables.passenger_load_estimate(AircraftCluster::A320, ScenarioTier::Low), Ok(122));
    }

    #[test]
    fn test_tables_serialize() {
        let tables = ReferenceTables::builtin();
        let json = serde_json::to_value(&tables).unwrap();
        assert_eq!(json["clusters"]["A320"]["seats"], 188);
        assert_eq!(json["airlines"]["RYR"]["low_cost"], true);
    }
}
