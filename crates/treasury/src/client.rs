//! Rates-of-exchange HTTP client.

use std::sync::Arc;

use purser_core::PurchaseError;
use purser_core::currency::{RateQuery, RateQuote, RateSource};
use reqwest::{Client, RequestBuilder, StatusCode};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info_span, warn};

use crate::backoff::ExponentialBackoff;
use crate::config::TreasuryConfig;
use crate::models::RatesResponse;
use crate::query::request_url;

/// Client for the Treasury rates-of-exchange dataset.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct TreasuryClient {
    http: Client,
    config: Arc<TreasuryConfig>,
}

impl TreasuryClient {
    /// Creates a client with the given settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: TreasuryConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("purser/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// The settings this client was built with.
    #[must_use]
    pub fn config(&self) -> &TreasuryConfig {
        &self.config
    }

    /// Retries may not run past the backoff budget.
    fn request(&self, url: &str, backoff: &ExponentialBackoff, attempt: u32) -> RequestBuilder {
        let request = self.http.get(url);
        if attempt > 1 {
            request.timeout(self.config.request_timeout.min(backoff.remaining()))
        } else {
            request
        }
    }

    async fn fetch(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<RatesResponse, PurchaseError> {
        let mut backoff = ExponentialBackoff::new(self.config.backoff);
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            debug!(attempt, "Requesting exchange rate");

            let response = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(cancelled()),
                result = self.request(url, &backoff, attempt).send() => result
                    .map_err(|e| PurchaseError::lookup_failed(format!("request failed: {e}")))?,
            };

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                let Some(delay) = backoff.next_delay() else {
                    warn!(attempt, "Rate limited and retry budget exhausted");
                    return Err(PurchaseError::lookup_failed(format!(
                        "rate limited after {attempt} attempts"
                    )));
                };

                warn!(attempt, delay_ms = delay.as_millis(), "Rate limited, backing off");
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => return Err(cancelled()),
                    () = tokio::time::sleep(delay) => {}
                }
                continue;
            }

            if !status.is_success() {
                warn!(attempt, status = %status, "Exchange rate request failed");
                return Err(PurchaseError::lookup_failed(format!(
                    "unexpected status {status}"
                )));
            }

            return tokio::select! {
                biased;
                () = cancel.cancelled() => Err(cancelled()),
                body = response.json::<RatesResponse>() => body
                    .map_err(|e| PurchaseError::lookup_failed(format!("invalid response body: {e}"))),
            };
        }
    }
}

impl RateSource for TreasuryClient {
    async fn latest_quote(
        &self,
        query: &RateQuery,
        cancel: &CancellationToken,
    ) -> Result<RateQuote, PurchaseError> {
        let span = info_span!(
            "rate_lookup",
            country = %query.country(),
            currency = %query.currency(),
            purchase_date = %query.purchase_date(),
        );

        async {
            let url = request_url(&self.config.base_url, query);
            let response = self.fetch(&url, cancel).await?;

            let Some(record) = response.data.into_iter().next() else {
                debug!("No exchange rate rows returned");
                return Err(PurchaseError::rate_unavailable(format!(
                    "no exchange rate for {} on or before {}",
                    query.country_currency_desc(),
                    query.purchase_date()
                )));
            };

            let quote = record.into_quote()?;
            debug!(record_date = %quote.record_date, rate = %quote.exchange_rate, "Exchange rate found");
            Ok(quote)
        }
        .instrument(span)
        .await
    }
}

fn cancelled() -> PurchaseError {
    PurchaseError::lookup_failed("rate lookup cancelled")
}
