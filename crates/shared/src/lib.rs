//! Shared types, errors, and configuration for Purser.
//!
//! This crate provides common types used across all other crates:
//! - Decimal money amounts with cent rounding
//! - Typed IDs for purchase transactions
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DatabaseConfig, ExchangeRateConfig, ServerConfig};
pub use error::{AppError, AppResult};
pub use types::{Amount, AmountError, PurchaseId};
