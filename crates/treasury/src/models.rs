//! Response payloads of the rates-of-exchange endpoint.

use chrono::NaiveDate;
use purser_core::PurchaseError;
use purser_core::currency::RateQuote;
use serde::Deserialize;

/// Top-level response body.
#[derive(Debug, Deserialize)]
pub struct RatesResponse {
    /// Matching rows, newest first.
    #[serde(default)]
    pub data: Vec<RateRecord>,
}

/// One dataset row. Every value arrives as a string.
#[derive(Debug, Clone, Deserialize)]
pub struct RateRecord {
    /// `Country-Currency` description.
    pub country_currency_desc: String,
    /// Decimal rate text.
    pub exchange_rate: String,
    /// `YYYY-MM-DD`.
    pub record_date: String,
}

impl RateRecord {
    /// Converts the row into a quote.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseError::RateLookupFailed`] if the record date is not
    /// a `YYYY-MM-DD` date.
    pub fn into_quote(self) -> Result<RateQuote, PurchaseError> {
        let record_date = NaiveDate::parse_from_str(&self.record_date, "%Y-%m-%d").map_err(|e| {
            PurchaseError::lookup_failed(format!(
                "invalid record_date '{}': {e}",
                self.record_date
            ))
        })?;
        Ok(RateQuote::new(
            self.country_currency_desc,
            self.exchange_rate,
            record_date,
        ))
    }
}
