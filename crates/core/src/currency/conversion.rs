//! Currency conversion logic.
//!
//! CRITICAL: Rounding strategy:
//! - Multiply at full decimal precision
//! - Round once, at the end, to the cent (midpoint away from zero)

use chrono::NaiveDate;
use purser_shared::Amount;
use purser_shared::types::BASE_CURRENCY;
use serde::Serialize;

use super::exchange::{RateQuery, RateQuote};
use crate::error::PurchaseError;

/// Result of converting a base-currency amount with a selected quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    /// Amount in the base currency.
    pub original_amount: Amount,
    /// Base currency code.
    pub base_currency: &'static str,
    /// Target country.
    pub country: String,
    /// Target currency.
    pub currency: String,
    /// Exchange rate used, as returned by the source.
    pub exchange_rate_used: String,
    /// Record date of the exchange rate used.
    pub exchange_rate_date: NaiveDate,
    /// Converted amount, rounded to the cent.
    pub converted_amount: Amount,
}

/// Converts an amount with the quote's rate, rounding to the cent.
///
/// # Errors
///
/// - [`PurchaseError::InvalidRate`] if the quote's rate is not a decimal
/// - [`PurchaseError::ConversionOverflow`] if the product is out of range
pub fn convert_amount(amount: Amount, quote: &RateQuote) -> Result<Amount, PurchaseError> {
    let rate = quote.rate()?;
    let product = amount.checked_mul(rate)?;
    Ok(product.round_to_cents())
}

/// Builds the full conversion result for a query and its selected quote.
///
/// # Errors
///
/// Same as [`convert_amount`].
pub fn convert(
    amount: Amount,
    query: &RateQuery,
    quote: &RateQuote,
) -> Result<Conversion, PurchaseError> {
    let converted_amount = convert_amount(amount, quote)?;

    Ok(Conversion {
        original_amount: amount,
        base_currency: BASE_CURRENCY,
        country: query.country().to_string(),
        currency: query.currency().to_string(),
        exchange_rate_used: quote.exchange_rate.clone(),
        exchange_rate_date: quote.record_date,
        converted_amount,
    })
}
