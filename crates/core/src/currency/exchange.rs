//! Exchange rate query and quote types.

use chrono::NaiveDate;
use purser_shared::Amount;
use serde::{Deserialize, Serialize};

use crate::error::PurchaseError;

/// What to look up: a country/currency pair as of a purchase date.
///
/// Built per request and never persisted. Surrounding `"` characters are
/// stripped from the country and currency so query strings such as
/// `?country="Nepal"` behave like `?country=Nepal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateQuery {
    country: String,
    currency: String,
    purchase_date: NaiveDate,
}

impl RateQuery {
    /// Creates a query for the given country, currency and purchase date.
    #[must_use]
    pub fn new(country: &str, currency: &str, purchase_date: NaiveDate) -> Self {
        Self {
            country: strip_quotes(country),
            currency: strip_quotes(currency),
            purchase_date,
        }
    }

    /// Country name, quotes stripped.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Currency name, quotes stripped.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// The purchase date the quote must not be later than.
    #[must_use]
    pub const fn purchase_date(&self) -> NaiveDate {
        self.purchase_date
    }

    /// The `Country-Currency` description the rate source indexes on.
    #[must_use]
    pub fn country_currency_desc(&self) -> String {
        format!("{}-{}", self.country, self.currency)
    }
}

fn strip_quotes(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// One historical exchange-rate record returned by the rate source.
///
/// The rate is kept as the source's decimal text so nothing is lost before
/// the conversion step parses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateQuote {
    /// `Country-Currency` description, e.g. `Nepal-Rupee`.
    pub country_currency_desc: String,
    /// Units of the foreign currency per US dollar, as decimal text.
    pub exchange_rate: String,
    /// Date the rate was recorded.
    pub record_date: NaiveDate,
}

impl RateQuote {
    /// Creates a quote.
    #[must_use]
    pub fn new(
        country_currency_desc: impl Into<String>,
        exchange_rate: impl Into<String>,
        record_date: NaiveDate,
    ) -> Self {
        Self {
            country_currency_desc: country_currency_desc.into(),
            exchange_rate: exchange_rate.into(),
            record_date,
        }
    }

    /// Parses the exchange rate.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseError::InvalidRate`] if the text is not a decimal.
    pub fn rate(&self) -> Result<Amount, PurchaseError> {
        Amount::parse(&self.exchange_rate)
            .map_err(|_| PurchaseError::InvalidRate(self.exchange_rate.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_query_strips_surrounding_quotes() {
        let query = RateQuery::new("\"Nepal\"", "\"Rupee\"", date(2022, 11, 30));
        assert_eq!(query.country(), "Nepal");
        assert_eq!(query.currency(), "Rupee");
        assert_eq!(query.country_currency_desc(), "Nepal-Rupee");
    }

    #[test]
    fn test_query_keeps_inner_text() {
        let query = RateQuery::new("Antigua & Barbuda", "East Caribbean Dollar", date(2023, 1, 1));
        assert_eq!(
            query.country_currency_desc(),
            "Antigua & Barbuda-East Caribbean Dollar"
        );
        assert_eq!(query.purchase_date(), date(2023, 1, 1));
    }

    #[test]
    fn test_quote_rate_parses() {
        let quote = RateQuote::new("Nepal-Rupee", "130.5", date(2022, 9, 30));
        assert_eq!(quote.rate().unwrap().as_decimal(), dec!(130.5));
    }

    #[test]
    fn test_quote_rate_invalid() {
        let quote = RateQuote::new("Nepal-Rupee", "n/a", date(2022, 9, 30));
        assert_eq!(quote.rate(), Err(PurchaseError::InvalidRate("n/a".into())));
    }
}
