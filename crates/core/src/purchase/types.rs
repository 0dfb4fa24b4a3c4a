//! Purchase transaction types.

use chrono::{DateTime, NaiveDate, Utc};
use purser_shared::{Amount, PurchaseId};
use serde::{Deserialize, Serialize};

use crate::currency::Conversion;

/// A recorded purchase. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseTransaction {
    /// Transaction ID.
    pub id: PurchaseId,
    /// When the purchase was submitted (UTC).
    pub date: DateTime<Utc>,
    /// Free-text description, at most 50 characters.
    pub description: String,
    /// Amount in the base currency, rounded to the cent.
    pub amount: Amount,
}

impl PurchaseTransaction {
    /// Calendar date of the purchase, used to select an exchange rate.
    #[must_use]
    pub fn purchase_date(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

/// A purchase ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchase {
    /// Amount in the base currency, already rounded to the cent.
    pub amount: Amount,
    /// Purchase timestamp.
    pub date: DateTime<Utc>,
    /// Description.
    pub description: String,
}

/// Raw input for recording a purchase.
#[derive(Debug, Clone)]
pub struct CreatePurchaseInput {
    /// Amount as submitted, a decimal string.
    pub amount: String,
    /// Description as submitted.
    pub description: String,
}

/// A stored purchase together with its conversion to a foreign currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedPurchase {
    /// The stored purchase.
    pub transaction: PurchaseTransaction,
    /// The conversion result.
    pub conversion: Conversion,
}
