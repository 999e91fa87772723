//! API route definitions

mod events;
mod health;
mod predict;

use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use bbe_core::EngineError;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(predict::routes())
        .merge(events::routes())
        .merge(health::routes())
}

/// Build the full application router
pub fn router(state: AppState) -> Router {
    // Configure CORS for the UI
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub(crate) fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

/// Validation failures are reported as-is; anything else gets `fallback`
pub(crate) fn engine_error_response(err: &EngineError, fallback: &str) -> Response {
    match err {
        EngineError::Validation(msg) => error_response(StatusCode::BAD_REQUEST, msg.clone()),
        _ => error_response(StatusCode::INTERNAL_SERVER_ERROR, fallback),
    }
}
