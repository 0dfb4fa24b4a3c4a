//! API route definitions.

use axum::Router;
use purser_core::currency::RateSource;
use purser_core::purchase::TransactionStore;

use crate::AppState;

pub mod health;
pub mod purchases;

/// Creates the API router with all routes.
pub fn api_routes<S, R>() -> Router<AppState<S, R>>
where
    S: TransactionStore + 'static,
    R: RateSource + 'static,
{
    Router::new()
        .merge(health::routes())
        .merge(purchases::routes())
}
