//! Report building

use crate::{validate_delays, BatchReport, BatchRequest, BatchRow, CostReport, ReportMetadata, Result};
use delay_cost_engine::{CostEngine, FlightCostRequest};
use reference_data::ReferenceData;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

fn metadata<R: ReferenceData>(engine: &CostEngine<R>, delays: &[f64], flights: usize, failures: usize) -> ReportMetadata {
    ReportMetadata {
        generated_at: chrono::Utc::now().to_rfc3339(),
        delays: delays.to_vec(),
        engine_config: engine.config().clone(),
        flights,
        failures,
    }
}

/// Resolve one flight and break its cost down at every delay
pub fn build_report<R: ReferenceData>(
    engine: &CostEngine<R>,
    request: &FlightCostRequest,
    delays: &[f64],
) -> Result<CostReport> {
    validate_delays(delays)?;

    let result = engine.resolve(request)?;
    debug!("\n{}", result);

    Ok(CostReport {
        metadata: metadata(engine, delays, 1, 0),
        rows: result.breakdowns(delays),
        derived: result.derived,
    })
}

/// Resolve every flight of a batch. Flights that fail are recorded in
/// `failures` and do not stop the others.
pub fn build_batch_report<R: ReferenceData>(
    engine: &CostEngine<R>,
    batch: &BatchRequest,
    delays: &[f64],
) -> Result<BatchReport> {
    validate_delays(delays)?;
    info!(
        "Resolving {} flights over {} delays",
        batch.flights.len(),
        delays.len()
    );

    let mut rows = Vec::with_capacity(batch.flights.len());
    let mut failures = BTreeMap::new();

    for (label, request) in &batch.flights {
        match engine.resolve(request) {
            Ok(result) => {
                let costs = result
                    .costs_at(delays)
                    .into_iter()
                    .map(|c| c.round() as i64)
                    .collect();
                rows.push(BatchRow {
                    label: label.clone(),
                    aircraft_cluster: result.derived.aircraft_cluster,
                    passengers_on_board: result.derived.passengers_on_board,
                    missed_connection_passengers: result.derived.missed_connection_passengers,
                    costs,
                });
            }
            Err(e) => {
                warn!("Flight {} failed: {}", label, e);
                failures.insert(label.clone(), e.to_string());
            }
        }
    }

    info!("Resolved {} flights, {} failed", rows.len(), failures.len());

    Ok(BatchReport {
        metadata: metadata(engine, delays, batch.flights.len(), failures.len()),
        rows,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ReportError, DEFAULT_DELAYS};
    use cost_model::ScenarioTier;

    fn flight(aircraft: &str, passengers: u32) -> FlightCostRequest {
        FlightCostRequest::new(aircraft, "AT_GATE")
            .with_flight_length(2000.0)
            .with_passenger_scenario(ScenarioTier::Base)
            .with_crew_scenario(ScenarioTier::Base)
            .with_maintenance_scenario(ScenarioTier::Base)
            .with_passengers(passengers)
    }

    #[test]
    fn test_single_report_rows() {
        let engine = CostEngine::builtin();
        let report = build_report(&engine, &flight("B738", 151), &DEFAULT_DELAYS).unwrap();

        assert_eq!(report.rows.len(), DEFAULT_DELAYS.len());
        assert_eq!(report.rows[0].delay, 5.0);
        assert!(report.rows.windows(2).all(|w| w[1].total >= w[0].total));
        assert_eq!(report.metadata.flights, 1);
        assert_eq!(report.derived.adjusted_passengers, 151);
    }

    #[test]
    fn test_single_report_propagates_resolution_error() {
        let engine = CostEngine::builtin();
        let result = build_report(&engine, &flight("ZZZZ", 10), &DEFAULT_DELAYS);
        assert!(matches!(result, Err(ReportError::Resolution(_))));
    }

    #[test]
    fn test_batch_keeps_going_after_failure() {
        let engine = CostEngine::builtin();
        let mut batch = BatchRequest::default();
        batch.flights.insert("B738".to_string(), flight("B738", 151));
        batch.flights.insert(
            "B738 missed".to_string(),
            flight("B738", 151)
                .with_missed_connection(33.0, 177.0)
                .with_missed_connection(38.0, 247.0),
        );
        batch.flights.insert("bogus".to_string(), flight("ZZZZ", 10));

        let report = build_batch_report(&engine, &batch, &DEFAULT_DELAYS).unwrap();

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures["bogus"].contains("ZZZZ"));
        assert_eq!(report.metadata.flights, 3);
        assert_eq!(report.metadata.failures, 1);

        let plain = &report.rows[0];
        let missed = &report.rows[1];
        assert_eq!(plain.label, "B738");
        assert_eq!(missed.missed_connection_passengers, 2);
        assert_eq!(plain.costs.len(), DEFAULT_DELAYS.len());
        // 120 min is past both thresholds and short of both rebooked delays
        assert!(missed.costs[7] > plain.costs[7]);
    }

    #[test]
    fn test_invalid_delays_rejected() {
        let engine = CostEngine::builtin();
        let batch = BatchRequest::default();
        assert!(matches!(
            build_batch_report(&engine, &batch, &[10.0, -1.0]),
            Err(ReportError::InvalidDelay(_))
        ));
    }
}
