//! Exchange-rate source abstraction.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use super::exchange::{RateQuery, RateQuote};
use crate::error::PurchaseError;

/// A source of historical exchange rates.
///
/// Implemented by the Treasury client; tests substitute in-memory sources.
pub trait RateSource: Send + Sync {
    /// Returns the most recent quote recorded on or before the query's
    /// purchase date.
    ///
    /// Implementations must stop waiting and return
    /// [`PurchaseError::RateLookupFailed`] as soon as `cancel` fires.
    ///
    /// # Errors
    ///
    /// - [`PurchaseError::RateUnavailable`] if the source has no matching row
    /// - [`PurchaseError::RateLookupFailed`] if the source cannot be queried
    fn latest_quote(
        &self,
        query: &RateQuery,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<RateQuote, PurchaseError>> + Send;
}
