//! Health check endpoints.

use axum::{Json, Router, routing::get};
use purser_core::currency::RateSource;
use purser_core::purchase::TransactionStore;
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check handler.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates health check routes.
pub fn routes<S, R>() -> Router<AppState<S, R>>
where
    S: TransactionStore + 'static,
    R: RateSource + 'static,
{
    Router::new().route("/health", get(health_check))
}
