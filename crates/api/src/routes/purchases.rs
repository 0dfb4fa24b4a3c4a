//! Purchase routes.
//!
//! - `POST /purchase` records a purchase in USD
//! - `GET /purchase/{id}?country=&currency=` converts a recorded purchase

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
    routing::{get, post},
};
use chrono::SecondsFormat;
use purser_core::currency::RateSource;
use purser_core::purchase::{
    ConvertedPurchase, CreatePurchaseInput, PurchaseTransaction, TransactionStore,
};
use purser_shared::{AppError, PurchaseId};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;
use validator::{Validate, ValidationErrors};

use crate::{AppState, error::ApiError};

/// Creates the purchase routes.
pub fn routes<S, R>() -> Router<AppState<S, R>>
where
    S: TransactionStore + 'static,
    R: RateSource + 'static,
{
    Router::new()
        .route("/purchase", post(create_purchase::<S, R>))
        .route("/purchase/{id}", get(get_converted_purchase::<S, R>))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for recording a purchase.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreatePurchaseRequest {
    /// Amount in USD as a decimal string.
    pub amount: String,
    /// Description, at most 50 characters.
    #[validate(length(max = 50, message = "description must not exceed 50 characters"))]
    pub description: String,
}

/// Query parameters for converting a purchase.
#[derive(Debug, Deserialize, Validate)]
pub struct ConvertQuery {
    /// Target country, e.g. `Nepal`.
    #[serde(default)]
    #[validate(length(min = 1, message = "country is required"))]
    pub country: String,
    /// Target currency, e.g. `Rupee`.
    #[serde(default)]
    #[validate(length(min = 1, message = "currency is required"))]
    pub currency: String,
}

/// A recorded purchase.
#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    /// Transaction ID.
    pub id: String,
    /// Amount in USD, rounded to the cent.
    #[serde(rename = "amountInUSD")]
    pub amount_in_usd: String,
    /// Purchase timestamp (RFC 3339, UTC).
    pub date: String,
    /// Description.
    pub description: String,
}

impl From<PurchaseTransaction> for PurchaseResponse {
    fn from(tx: PurchaseTransaction) -> Self {
        Self {
            id: tx.id.to_string(),
            amount_in_usd: tx.amount.to_string(),
            date: tx.date.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            description: tx.description,
        }
    }
}

/// Conversion part of the response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedDetails {
    /// Converted amount, rounded to the cent.
    pub amount: String,
    /// Target country.
    pub country: String,
    /// Target currency.
    pub currency: String,
    /// Exchange rate applied.
    pub exchange_rate_used: String,
    /// Record date of the exchange rate (`YYYY-MM-DD`).
    pub exchange_rate_date: String,
}

/// A purchase with its conversion.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedPurchaseResponse {
    /// The recorded purchase.
    pub transaction_details: PurchaseResponse,
    /// The conversion.
    pub converted_details: ConvertedDetails,
}

impl From<ConvertedPurchase> for ConvertedPurchaseResponse {
    fn from(converted: ConvertedPurchase) -> Self {
        let conversion = converted.conversion;
        Self {
            transaction_details: converted.transaction.into(),
            converted_details: ConvertedDetails {
                amount: conversion.converted_amount.to_string(),
                country: conversion.country,
                currency: conversion.currency,
                exchange_rate_used: conversion.exchange_rate_used,
                exchange_rate_date: conversion.exchange_rate_date.format("%Y-%m-%d").to_string(),
            },
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Flatten validator errors into one message.
fn validation_error(errors: &ValidationErrors) -> ApiError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map_or_else(|| format!("{field} is invalid"), ToString::to_string)
            })
        })
        .collect();
    messages.sort();
    AppError::Validation(messages.join("; ")).into()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/purchase`
/// Record a purchase in USD.
async fn create_purchase<S, R>(
    State(state): State<AppState<S, R>>,
    payload: Result<Json<CreatePurchaseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PurchaseResponse>), ApiError>
where
    S: TransactionStore + 'static,
    R: RateSource + 'static,
{
    let Json(payload) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    payload.validate().map_err(|e| validation_error(&e))?;

    let tx = state
        .purchases
        .create_purchase(CreatePurchaseInput {
            amount: payload.amount,
            description: payload.description,
        })
        .await?;

    info!(transaction_id = %tx.id, "Purchase recorded");
    Ok((StatusCode::CREATED, Json(tx.into())))
}

/// GET `/purchase/{id}?country=&currency=`
/// Convert a recorded purchase to the currency of a country.
async fn get_converted_purchase<S, R>(
    State(state): State<AppState<S, R>>,
    Path(id): Path<String>,
    query: Result<Query<ConvertQuery>, QueryRejection>,
) -> Result<Json<ConvertedPurchaseResponse>, ApiError>
where
    S: TransactionStore + 'static,
    R: RateSource + 'static,
{
    let id: PurchaseId = id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid transaction id: {id}")))?;
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    query.validate().map_err(|e| validation_error(&e))?;

    // Dropping the request future cancels the lookup and any backoff sleep.
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let converted = state
        .purchases
        .convert_purchase(id, &query.country, &query.currency, &cancel)
        .await?;

    Ok(Json(converted.into()))
}
