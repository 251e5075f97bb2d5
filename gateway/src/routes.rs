use axum::{extract::State, http::StatusCode, Json};
use cost_model::{AircraftCluster, CostFunction};
use cost_report::{validate_delays, DEFAULT_DELAYS};
use delay_cost_engine::{resolve, CostBreakdown, CostResolutionError, CostResult, DerivedParameters, FlightCostRequest};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;

#[derive(Deserialize)]
pub struct CostRequest {
    pub request: FlightCostRequest,
    pub delays: Option<Vec<f64>>,
}

#[derive(Serialize)]
pub struct CostResponse {
    pub id: Uuid,
    pub generated_at: String,
    pub total: CostFunction,
    pub breakdown: Vec<CostBreakdown>,
    pub derived: DerivedParameters,
}

#[derive(Deserialize)]
pub struct CompareRequest {
    pub baseline: FlightCostRequest,
    pub alternative: FlightCostRequest,
    pub delays: Option<Vec<f64>>,
}

#[derive(Serialize)]
pub struct CompareResponse {
    pub id: Uuid,
    pub generated_at: String,
    pub delays: Vec<f64>,
    pub baseline: Vec<f64>,
    pub alternative: Vec<f64>,
    /// alternative − baseline at each delay
    pub difference: Vec<f64>,
}

#[derive(Serialize)]
pub struct AircraftInfo {
    pub cluster: AircraftCluster,
    pub seats: u32,
    pub wide_body: bool,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn resolution_error(e: CostResolutionError) -> ApiError {
    tracing::debug!("Resolution failed: {}", e);
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorBody {
            error: e.to_string(),
            kind: e.kind(),
        }),
    )
}

fn delay_grid(delays: Option<Vec<f64>>) -> Result<Vec<f64>, ApiError> {
    let delays = delays.unwrap_or_else(|| DEFAULT_DELAYS.to_vec());
    validate_delays(&delays).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: e.to_string(),
                kind: "invalid_delay",
            }),
        )
    })?;
    Ok(delays)
}

fn resolve_with(state: &AppState, request: &FlightCostRequest) -> Result<CostResult, ApiError> {
    resolve(request, state.reference.as_ref(), &state.config).map_err(resolution_error)
}

pub async fn resolve_costs(
    State(state): State<AppState>,
    Json(body): Json<CostRequest>,
) -> Result<Json<CostResponse>, ApiError> {
    let delays = delay_grid(body.delays)?;
    let result = resolve_with(&state, &body.request)?;

    Ok(Json(CostResponse {
        id: Uuid::new_v4(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        breakdown: result.breakdowns(&delays),
        total: result.cost_function,
        derived: result.derived,
    }))
}

pub async fn compare_costs(
    State(state): State<AppState>,
    Json(body): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, ApiError> {
    let delays = delay_grid(body.delays)?;
    let baseline = resolve_with(&state, &body.baseline)?.costs_at(&delays);
    let alternative = resolve_with(&state, &body.alternative)?.costs_at(&delays);
    let difference = baseline
        .iter()
        .zip(&alternative)
        .map(|(b, a)| a - b)
        .collect();

    Ok(Json(CompareResponse {
        id: Uuid::new_v4(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        delays,
        baseline,
        alternative,
        difference,
    }))
}

pub async fn list_aircraft(State(state): State<AppState>) -> Json<Vec<AircraftInfo>> {
    let aircraft = state
        .reference
        .clusters()
        .map(|(cluster, profile)| AircraftInfo {
            cluster: *cluster,
            seats: profile.seats,
            wide_body: profile.wide_body,
        })
        .collect();

    Json(aircraft)
}
