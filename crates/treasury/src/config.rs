//! Immutable client settings.

use std::time::Duration;

use purser_shared::ExchangeRateConfig;

/// Retry schedule for rate-limited requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Delay before the first retry.
    pub initial_interval: Duration,
    /// Upper bound for a single delay.
    pub max_interval: Duration,
    /// Total time budget, measured from the first attempt.
    pub max_elapsed: Duration,
    /// Growth per retry in percent (150 = 1.5x).
    pub multiplier_pct: u64,
    /// Randomization of each delay in percent (50 = ±50 %).
    pub jitter_pct: u64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::from(&ExchangeRateConfig::default())
    }
}

impl From<&ExchangeRateConfig> for BackoffPolicy {
    fn from(config: &ExchangeRateConfig) -> Self {
        Self {
            initial_interval: Duration::from_millis(config.initial_backoff_ms),
            max_interval: Duration::from_millis(config.max_backoff_ms),
            max_elapsed: Duration::from_secs(config.max_elapsed_secs),
            multiplier_pct: config.backoff_multiplier_pct,
            jitter_pct: config.jitter_pct.min(100),
        }
    }
}

/// Settings for [`TreasuryClient`](crate::TreasuryClient), fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreasuryConfig {
    /// Endpoint of the rates-of-exchange dataset.
    pub base_url: String,
    /// Timeout for a single HTTP request.
    pub request_timeout: Duration,
    /// Retry schedule for HTTP 429 responses.
    pub backoff: BackoffPolicy,
}

impl Default for TreasuryConfig {
    fn default() -> Self {
        Self::from(&ExchangeRateConfig::default())
    }
}

impl From<&ExchangeRateConfig> for TreasuryConfig {
    fn from(config: &ExchangeRateConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            backoff: BackoffPolicy::from(config),
        }
    }
}
