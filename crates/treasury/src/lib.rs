//! Historical exchange rates from the US Treasury fiscal-data API.
//!
//! [`TreasuryClient`] implements [`purser_core::currency::RateSource`] against
//! the "rates of exchange" dataset:
//! - Builds the filtered, sorted, single-row query for a [`RateQuery`](purser_core::currency::RateQuery)
//! - Retries rate-limited (HTTP 429) responses with exponential backoff
//! - Decodes the single returned row into a quote

pub mod backoff;
pub mod client;
pub mod config;
pub mod models;
pub mod query;

pub use backoff::ExponentialBackoff;
pub use client::TreasuryClient;
pub use config::{BackoffPolicy, TreasuryConfig};
