//! Recency window for exchange-rate quotes.
//!
//! A quote may be used for a purchase only if it was recorded no earlier than
//! six calendar months before the purchase date.

use chrono::{Months, NaiveDate};

use super::exchange::RateQuote;
use crate::error::PurchaseError;

/// Length of the recency window in calendar months.
pub const RECENCY_WINDOW_MONTHS: u32 = 6;

/// Oldest record date still usable for a purchase made on `purchase_date`.
///
/// Month arithmetic is calendar aware: the day of month is kept when it
/// exists in the target month and clamped to the month's last day otherwise
/// (`2023-08-31` gives `2023-02-28`).
#[must_use]
pub fn recency_cutoff(purchase_date: NaiveDate) -> NaiveDate {
    purchase_date
        .checked_sub_months(Months::new(RECENCY_WINDOW_MONTHS))
        .unwrap_or(NaiveDate::MIN)
}

/// Rejects quotes recorded before the recency cutoff.
///
/// A quote dated exactly on the cutoff is accepted.
///
/// # Errors
///
/// Returns [`PurchaseError::RateUnavailable`] if the quote is too old.
pub fn ensure_recent(quote: &RateQuote, purchase_date: NaiveDate) -> Result<(), PurchaseError> {
    let cutoff = recency_cutoff(purchase_date);
    if quote.record_date < cutoff {
        return Err(PurchaseError::rate_unavailable(format!(
            "latest rate for {} is from {}, older than {cutoff}",
            quote.country_currency_desc, quote.record_date
        )));
    }
    Ok(())
}
