//! Error taxonomy for the purchase and conversion pipeline.

use purser_shared::{AmountError, AppError, PurchaseId};
use thiserror::Error;

/// Errors raised while recording or converting a purchase.
///
/// Every component returns the most specific variant it can; callers pass
/// them through unchanged and only the HTTP boundary maps them to a status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    /// The submitted amount is not a decimal number.
    #[error("unable to parse '{0}' as an amount")]
    InvalidAmount(String),

    /// The submitted amount is below zero.
    #[error("amount cannot be negative number: {0}")]
    NegativeAmount(String),

    /// No usable quote for the requested country and currency.
    #[error("the purchase cannot be converted to the target currency: {0}")]
    RateUnavailable(String),

    /// The exchange-rate source could not be queried.
    #[error("exchange rate lookup failed: {0}")]
    RateLookupFailed(String),

    /// The exchange-rate source returned a rate that is not a decimal.
    #[error("exchange rate '{0}' is not a valid decimal")]
    InvalidRate(String),

    /// The converted amount does not fit in the decimal representation.
    #[error("converted amount is out of range: {0}")]
    ConversionOverflow(String),

    /// No purchase transaction with this identifier.
    #[error("given transaction id not found: {0}")]
    TransactionNotFound(PurchaseId),

    /// The transaction store failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl PurchaseError {
    /// Create a rate unavailable error.
    #[must_use]
    pub fn rate_unavailable(msg: impl Into<String>) -> Self {
        Self::RateUnavailable(msg.into())
    }

    /// Create a rate lookup failure.
    #[must_use]
    pub fn lookup_failed(msg: impl Into<String>) -> Self {
        Self::RateLookupFailed(msg.into())
    }

    /// Create a storage error.
    #[must_use]
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Returns true if the caller's input caused the failure.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_)
                | Self::NegativeAmount(_)
                | Self::RateUnavailable(_)
                | Self::TransactionNotFound(_)
        )
    }
}

impl From<AmountError> for PurchaseError {
    fn from(err: AmountError) -> Self {
        match err {
            AmountError::Invalid(text) => Self::InvalidAmount(text),
            AmountError::Overflow(..) => Self::ConversionOverflow(err.to_string()),
        }
    }
}

impl From<PurchaseError> for AppError {
    fn from(err: PurchaseError) -> Self {
        let message = err.to_string();
        match err {
            PurchaseError::InvalidAmount(_) | PurchaseError::NegativeAmount(_) => {
                Self::Validation(message)
            }
            PurchaseError::RateUnavailable(_) => Self::BadRequest(message),
            PurchaseError::TransactionNotFound(_) => Self::NotFound(message),
            PurchaseError::RateLookupFailed(_) => Self::ExternalService(message),
            PurchaseError::InvalidRate(_) | PurchaseError::ConversionOverflow(_) => {
                Self::Internal(message)
            }
            PurchaseError::Storage(_) => Self::Database(message),
        }
    }
}
