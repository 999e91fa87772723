//! Prediction endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::info;

use super::engine_error_response;
use crate::AppState;

/// Create prediction routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/predict/match/{match_key}", get(predict_match))
        .route("/predict/event/{event_key}", get(predict_event))
        .route(
            "/predict/event/{event_key}/playoff/{simulation_count}",
            get(simulate_playoffs),
        )
}

/// Predict a single match, merged with its actual result when available
async fn predict_match(
    State(state): State<AppState>,
    Path(match_key): Path<String>,
) -> impl IntoResponse {
    info!("Received API request for match: {}", match_key);

    match state.aggregator.predict_match(&match_key).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => engine_error_response(&e, "Failed to get prediction from prediction service"),
    }
}

/// Predict every match of an event
async fn predict_event(
    State(state): State<AppState>,
    Path(event_key): Path<String>,
) -> impl IntoResponse {
    info!("Received API request for event: {}", event_key);

    match state.aggregator.predict_event(&event_key).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => engine_error_response(&e, "Failed to get predictions from prediction service"),
    }
}

/// Simulate an event's playoffs
async fn simulate_playoffs(
    State(state): State<AppState>,
    Path((event_key, simulation_count)): Path<(String, String)>,
) -> impl IntoResponse {
    info!(
        "Received API request for simulation: {} ({} runs)",
        event_key, simulation_count
    );

    match state.aggregator.simulate(&event_key, &simulation_count).await {
        Ok(simulation) => (StatusCode::OK, Json(simulation)).into_response(),
        Err(e) => engine_error_response(&e, "Failed to get playoff simulation from prediction service"),
    }
}
