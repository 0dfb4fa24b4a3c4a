//! Purchase transactions: recording and converting.
//!
//! This module provides business logic for:
//! - Validating and rounding submitted amounts
//! - Persisting purchases through a [`TransactionStore`]
//! - Converting a stored purchase with a historical exchange rate

mod service;
mod types;

pub use service::{PurchaseService, TransactionStore};
pub use types::{ConvertedPurchase, CreatePurchaseInput, NewPurchase, PurchaseTransaction};
