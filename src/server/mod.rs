//! HTTP surface: router, shared state and handlers.

pub mod handlers;
mod state;

pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::error::ApiError;

/// Builds the dashboard API router. CORS is open to all origins; the
/// dashboard is served from a different host than this bridge.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/test-connection", get(handlers::test_connection))
        .route("/api/raw-data", get(handlers::raw_data))
        .route("/api/lines", get(handlers::lines))
        .route("/api/production-data", get(handlers::production_data))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Every failure is terminal for its request: HTTP 500 with the classified
/// message in an `error` field.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("request failed: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
