use anyhow::Result;
use axum::{
    routing::{get, post},
    Json, Router,
};
use delay_cost_engine::EngineConfig;
use reference_data::{load_tables, ReferenceTables};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod routes;

/// Read-only state shared by every request
#[derive(Clone)]
pub struct AppState {
    pub reference: Arc<ReferenceTables>,
    pub config: EngineConfig,
}

impl AppState {
    pub fn new(reference: ReferenceTables, config: EngineConfig) -> Self {
        Self {
            reference: Arc::new(reference),
            config,
        }
    }
}

pub fn app(state: AppState) -> Router {
    let cost_routes = Router::new()
        .route("/costs", post(routes::resolve_costs))
        .route("/costs/compare", post(routes::compare_costs))
        .route("/reference/aircraft", get(routes::list_aircraft))
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", cost_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "cost_gateway=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let reference = match std::env::var("COST_REFERENCE_PATH") {
        Ok(path) => {
            tracing::info!("   Loading reference tables from {}", path);
            load_tables(&path)?
        }
        Err(_) => ReferenceTables::builtin(),
    };
    tracing::info!(
        "   Reference data: {} aircraft clusters, {} airports, {} airlines",
        reference.cluster_count(),
        reference.airport_count(),
        reference.airline_count()
    );

    let state = AppState::new(reference, EngineConfig::default());

    let port = std::env::var("COST_GATEWAY_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "18700".to_string());
    let addr = format!("0.0.0.0:{}", port);

    tracing::info!("Cost Gateway starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "cost-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
