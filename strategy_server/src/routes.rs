use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use strategy_engine::{CompoundKnowledgeBase, RaceConditions, StrategyError, StrategyGenerator};

use crate::types::{HealthOut, StrategiesOut};

type ApiError = (StatusCode, Json<serde_json::Value>);

// ---------- Server state ----------

/// Read-only; requests never lock or mutate anything.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<StrategyGenerator>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/compounds", get(compounds))
        .route("/strategies", post(strategies))
        .with_state(state)
}

fn error(status: StatusCode, msg: impl ToString) -> ApiError {
    (status, Json(json!({ "error": msg.to_string() })))
}

fn engine_error(e: StrategyError) -> ApiError {
    match e {
        StrategyError::InvalidInput(_) => error(StatusCode::BAD_REQUEST, e),
        _ => {
            tracing::error!("engine fault: {}", e);
            error(StatusCode::INTERNAL_SERVER_ERROR, e)
        }
    }
}

// ---------- Handlers ----------

async fn health(State(state): State<AppState>) -> Json<HealthOut> {
    Json(HealthOut {
        status: "ok",
        config_version: state.generator.config().version,
    })
}

async fn compounds(State(state): State<AppState>) -> Json<CompoundKnowledgeBase> {
    Json(state.generator.knowledge().clone())
}

async fn strategies(
    State(state): State<AppState>,
    payload: Result<Json<RaceConditions>, JsonRejection>,
) -> Result<Json<StrategiesOut>, ApiError> {
    let Json(conditions) = payload.map_err(|e| error(StatusCode::BAD_REQUEST, e.body_text()))?;

    let plans = state.generator.generate(&conditions).map_err(engine_error)?;
    tracing::info!(
        "laps={} track={:.1}C air={:.1}C severity={} rain={} -> {} plan(s)",
        conditions.total_race_laps,
        conditions.track_temp_c,
        conditions.air_temp_c,
        conditions.tyre_severity,
        conditions.rainfall,
        plans.len()
    );

    Ok(Json(StrategiesOut::from(plans)))
}
