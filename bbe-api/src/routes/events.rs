//! Season event listing

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::{error, info};

use super::error_response;
use crate::AppState;

/// Create event routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/events/{year}", get(list_events))
}

/// List every event of a season
async fn list_events(State(state): State<AppState>, Path(year): Path<String>) -> impl IntoResponse {
    let Ok(year) = year.trim().parse::<u16>() else {
        return error_response(StatusCode::BAD_REQUEST, format!("Invalid year: {}", year));
    };

    info!("Received API request for events in {}", year);

    match state.aggregator.list_events(year).await {
        Ok(events) => (StatusCode::OK, Json(events)).into_response(),
        Err(e) => {
            error!("Failed to list events for {}: {}", year, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch events")
        }
    }
}
