//! Query-string construction for the rates-of-exchange endpoint.

use purser_core::currency::RateQuery;
use urlencoding::encode;

/// Fields requested from the dataset.
pub const FIELDS: &str = "country_currency_desc,exchange_rate,record_date";

/// Newest record first.
pub const SORT: &str = "-record_date";

/// Builds the query string selecting the latest rate on or before the
/// purchase date for the query's `Country-Currency` description.
#[must_use]
pub fn query_string(query: &RateQuery) -> String {
    let filter = format!(
        "record_date:lte:{},country_currency_desc:eq:{}-{}",
        query.purchase_date().format("%Y-%m-%d"),
        encode(query.country()),
        encode(query.currency()),
    );
    format!("filter={filter}&fields={FIELDS}&sort={SORT}&page[size]=1")
}

/// Full request URL for `query` against `base_url`.
#[must_use]
pub fn request_url(base_url: &str, query: &RateQuery) -> String {
    format!("{}?{}", base_url.trim_end_matches('?'), query_string(query))
}
