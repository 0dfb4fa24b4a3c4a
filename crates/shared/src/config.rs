//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Historical exchange-rate source configuration.
    #[serde(default)]
    pub exchange_rate: ExchangeRateConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Exchange-rate source configuration.
///
/// Durations are kept as integers so the whole retry schedule is computed
/// without floating point.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExchangeRateConfig {
    /// Endpoint of the rates-of-exchange dataset.
    #[serde(default = "default_exchange_rate_url")]
    pub base_url: String,
    /// Timeout for a single HTTP request in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// First backoff delay after a rate-limited response, in milliseconds.
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,
    /// Upper bound for a single backoff delay, in milliseconds.
    #[serde(default = "default_max_backoff")]
    pub max_backoff_ms: u64,
    /// Total time budget for retrying rate-limited requests, in seconds.
    #[serde(default = "default_max_elapsed")]
    pub max_elapsed_secs: u64,
    /// Growth of the backoff delay per retry, in percent (150 = 1.5x).
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier_pct: u64,
    /// Randomization applied to each delay, in percent (50 = ±50 %).
    #[serde(default = "default_jitter")]
    pub jitter_pct: u64,
}

impl Default for ExchangeRateConfig {
    fn default() -> Self {
        Self {
            base_url: default_exchange_rate_url(),
            request_timeout_secs: default_request_timeout(),
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_ms: default_max_backoff(),
            max_elapsed_secs: default_max_elapsed(),
            backoff_multiplier_pct: default_backoff_multiplier(),
            jitter_pct: default_jitter(),
        }
    }
}

fn default_exchange_rate_url() -> String {
    "https://api.fiscaldata.treasury.gov/services/api/fiscal_service/v1/accounting/od/rates_of_exchange"
        .to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_initial_backoff() -> u64 {
    500
}

fn default_max_backoff() -> u64 {
    60_000
}

fn default_max_elapsed() -> u64 {
    60
}

fn default_backoff_multiplier() -> u64 {
    150
}

fn default_jitter() -> u64 {
    50
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PURSER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
