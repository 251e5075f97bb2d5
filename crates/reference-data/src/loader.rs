//! Reference table loading from JSON files

use crate::tables::{ClusterProfile, PassengerCostCurves, ReferenceTables};
use crate::{normalize_code, ReferenceConfig};
use cost_model::AircraftCluster;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No usable aircraft cluster profiles found")]
    Empty,
}

/// Raw reference file; every section is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawReferenceFile {
    config: Option<ReferenceConfig>,
    passenger_costs: Option<PassengerCostCurves>,
    clusters: Vec<RawCluster>,
    aircraft: Vec<RawAircraft>,
    airports: Vec<RawAirport>,
    airlines: Vec<RawAirline>,
}

#[derive(Debug, Deserialize)]
struct RawCluster {
    cluster: Option<String>,
    seats: Option<u32>,
    #[serde(default)]
    wide_body: bool,
    crew_per_minute: Option<[f64; 3]>,
    maintenance_at_gate_per_minute: Option<[f64; 3]>,
    #[serde(default)]
    curfew_fixed_cost: f64,
}

#[derive(Debug, Deserialize)]
struct RawAircraft {
    type_code: Option<String>,
    cluster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAirport {
    icao: Option<String>,
    name: Option<String>,
    annual_passengers: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawAirline {
    icao: Option<String>,
    name: Option<String>,
    low_cost: Option<bool>,
}

/// ICAO-style identifiers are 2-4 alphanumeric characters
fn is_valid_code(code: &str) -> bool {
    let code = code.trim();
    (2..=4).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Load reference tables from a JSON file
pub fn load_tables(path: impl AsRef<Path>) -> Result<ReferenceTables, LoadError> {
    let path = path.as_ref();
    info!("Loading reference tables from {:?}", path);

    let file = File::open(path)?;
    read_tables(BufReader::new(file))
}

/// Load reference tables from any JSON reader
pub fn read_tables(reader: impl Read) -> Result<ReferenceTables, LoadError> {
    let raw: RawReferenceFile = serde_json::from_reader(reader)?;
    build_tables(raw)
}

/// Load reference tables from a JSON string
pub fn parse_tables(json: &str) -> Result<ReferenceTables, LoadError> {
    let raw: RawReferenceFile = serde_json::from_str(json)?;
    build_tables(raw)
}

fn build_tables(raw: RawReferenceFile) -> Result<ReferenceTables, LoadError> {
    let mut skipped = 0;

    let passenger_costs = match raw.passenger_costs {
        Some(curves) if curves.is_valid() => curves,
        Some(_) => {
            warn!("Ignoring passenger costs: negative or decreasing curve, using defaults");
            skipped += 1;
            PassengerCostCurves::default()
        }
        None => PassengerCostCurves::default(),
    };
    let mut tables = ReferenceTables::new()
        .with_config(raw.config.unwrap_or_default())
        .with_passenger_costs(passenger_costs);

    for record in raw.clusters {
        let cluster = match record.cluster.as_deref().map(str::parse::<AircraftCluster>) {
            Some(Ok(cluster)) => cluster,
            _ => {
                warn!("Skipping cluster {:?}: unknown cluster", record.cluster);
                skipped += 1;
                continue;
            }
        };
        let (seats, crew, maintenance) = match (
            record.seats,
            record.crew_per_minute,
            record.maintenance_at_gate_per_minute,
        ) {
            (Some(seats), Some(crew), Some(maintenance)) => (seats, crew, maintenance),
            _ => {
                warn!("Skipping cluster {}: missing seats or rates", cluster);
                skipped += 1;
                continue;
            }
        };

        let profile = ClusterProfile::new(seats, record.wide_body, crew, maintenance, record.curfew_fixed_cost);
        if !profile.is_valid() {
            warn!("Skipping cluster {}: negative rate or zero seats", cluster);
            skipped += 1;
            continue;
        }
        tables.insert_cluster(cluster, profile);
    }

    if tables.cluster_count() == 0 {
        return Err(LoadError::Empty);
    }

    // Every reference code maps to itself; aliases extend that
    for record in raw.aircraft {
        let type_code = match record.type_code {
            Some(code) if is_valid_code(&code) => code,
            other => {
                warn!("Skipping aircraft {:?}: invalid type code", other);
                skipped += 1;
                continue;
            }
        };
        match record.cluster.as_deref().map(str::parse::<AircraftCluster>) {
            Some(Ok(cluster)) => tables.insert_alias(&type_code, cluster),
            _ => {
                warn!("Skipping aircraft {}: unknown cluster", type_code);
                skipped += 1;
            }
        }
    }

    for record in raw.airports {
        match (record.icao, record.annual_passengers) {
            (Some(icao), Some(passengers)) if is_valid_code(&icao) => {
                let name = record.name.unwrap_or_else(|| normalize_code(&icao));
                tables.insert_airport(&icao, name, passengers);
            }
            (icao, _) => {
                warn!("Skipping airport {:?}: invalid code or no passenger count", icao);
                skipped += 1;
            }
        }
    }

    for record in raw.airlines {
        match (record.icao, record.low_cost) {
            (Some(icao), Some(low_cost)) if is_valid_code(&icao) => {
                let name = record.name.unwrap_or_else(|| normalize_code(&icao));
                tables.insert_airline(&icao, name, low_cost);
            }
            (icao, _) => {
                warn!("Skipping airline {:?}: invalid code or no low-cost flag", icao);
                skipped += 1;
            }
        }
    }

    info!(
        "Loaded {} clusters, {} airports, {} airlines ({} records skipped)",
        tables.cluster_count(),
        tables.airport_count(),
        tables.airline_count(),
        skipped
    );

    Ok(tables)
}
