//! Core business logic for Purser.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence and the exchange-rate source are reached through traits that
//! the db and treasury crates implement.
//!
//! # Modules
//!
//! - `purchase` - Recording purchases and converting them
//! - `currency` - Exchange-rate quotes, the recency rule and conversion
//! - `error` - Error taxonomy shared by every stage

pub mod currency;
pub mod error;
pub mod purchase;

pub use error::PurchaseError;
