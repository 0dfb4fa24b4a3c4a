//! Purchase service implementation.

use std::sync::Arc;

use chrono::Utc;
use purser_shared::{Amount, PurchaseId};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::types::{ConvertedPurchase, CreatePurchaseInput, NewPurchase, PurchaseTransaction};
use crate::currency::{RateQuery, RateSource, convert, ensure_recent};
use crate::error::PurchaseError;

/// Repository trait for purchase persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait TransactionStore: Send + Sync {
    /// Persist a new purchase and return it with its assigned ID.
    fn create(
        &self,
        purchase: NewPurchase,
    ) -> impl std::future::Future<Output = Result<PurchaseTransaction, PurchaseError>> + Send;

    /// Find a purchase by ID.
    fn find_by_id(
        &self,
        id: PurchaseId,
    ) -> impl std::future::Future<Output = Result<Option<PurchaseTransaction>, PurchaseError>> + Send;
}

/// Records purchases and converts them to foreign currencies.
pub struct PurchaseService<S: TransactionStore, R: RateSource> {
    store: Arc<S>,
    rates: Arc<R>,
}

impl<S: TransactionStore, R: RateSource> PurchaseService<S, R> {
    /// Create a new purchase service.
    #[must_use]
    pub fn new(store: Arc<S>, rates: Arc<R>) -> Self {
        Self { store, rates }
    }

    /// Validate, round and persist a new purchase.
    ///
    /// The purchase is dated with the current UTC time.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is not a decimal number
    /// - The amount is negative
    /// - The store fails
    pub async fn create_purchase(
        &self,
        input: CreatePurchaseInput,
    ) -> Result<PurchaseTransaction, PurchaseError> {
        info!(amount = %input.amount, "Creating purchase transaction");

        let amount = Amount::parse(&input.amount)?;
        if amount.is_negative() {
            return Err(PurchaseError::NegativeAmount(input.amount));
        }

        let purchase = NewPurchase {
            amount: amount.round_to_cents(),
            date: Utc::now(),
            description: input.description,
        };

        let transaction = self.store.create(purchase).await?;
        info!(
            transaction_id = %transaction.id,
            amount = %transaction.amount,
            "Purchase transaction stored"
        );
        Ok(transaction)
    }

    /// Fetch a stored purchase.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseError::TransactionNotFound`] if no purchase has this ID,
    /// or a storage error if the store fails.
    pub async fn get_purchase(&self, id: PurchaseId) -> Result<PurchaseTransaction, PurchaseError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(PurchaseError::TransactionNotFound(id))
    }

    /// Convert a stored purchase to the currency of `country`.
    ///
    /// Uses the latest quote recorded on or before the purchase date, which
    /// must be no older than six months before it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The purchase does not exist
    /// - The rate lookup fails or is cancelled
    /// - No quote exists, or the latest one is too old
    /// - The quoted rate is not a decimal
    pub async fn convert_purchase(
        &self,
        id: PurchaseId,
        country: &str,
        currency: &str,
        cancel: &CancellationToken,
    ) -> Result<ConvertedPurchase, PurchaseError> {
        let transaction = self.get_purchase(id).await?;
        let query = RateQuery::new(country, currency, transaction.purchase_date());
        debug!(
            transaction_id = %id,
            target = %query.country_currency_desc(),
            purchase_date = %query.purchase_date(),
            "Looking up exchange rate"
        );

        let quote = self.rates.latest_quote(&query, cancel).await?;
        if let Err(e) = ensure_recent(&quote, query.purchase_date()) {
            warn!(
                transaction_id = %id,
                record_date = %quote.record_date,
                "Exchange rate is outside the recency window"
            );
            return Err(e);
        }

        let conversion = convert(transaction.amount, &query, &quote)?;
        info!(
            transaction_id = %id,
            rate = %conversion.exchange_rate_used,
            converted = %conversion.converted_amount,
            "Purchase converted"
        );

        Ok(ConvertedPurchase {
            transaction,
            conversion,
        })
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
