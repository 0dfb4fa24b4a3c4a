//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for recording and converting purchases
//! - Mapping of domain errors to HTTP responses
//! - Request validation

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use purser_core::currency::RateSource;
use purser_core::purchase::{PurchaseService, TransactionStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
pub struct AppState<S: TransactionStore, R: RateSource> {
    /// Purchase recording and conversion.
    pub purchases: Arc<PurchaseService<S, R>>,
}

impl<S: TransactionStore, R: RateSource> AppState<S, R> {
    /// Creates the state around a purchase service.
    #[must_use]
    pub fn new(purchases: PurchaseService<S, R>) -> Self {
        Self {
            purchases: Arc::new(purchases),
        }
    }
}

impl<S: TransactionStore, R: RateSource> Clone for AppState<S, R> {
    fn clone(&self) -> Self {
        Self {
            purchases: Arc::clone(&self.purchases),
        }
    }
}

/// Creates the main application router.
pub fn create_router<S, R>(state: AppState<S, R>) -> Router
where
    S: TransactionStore + 'static,
    R: RateSource + 'static,
{
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
