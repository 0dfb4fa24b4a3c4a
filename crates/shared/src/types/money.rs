//! Decimal money amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! `Amount` wraps `rust_decimal::Decimal` and only ever rounds at the output
//! step, to the cent, half away from zero.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ISO 4217 code of the currency every purchase is recorded in.
pub const BASE_CURRENCY: &str = "USD";

/// Number of fractional digits kept for persisted and displayed amounts.
pub const CENT_PLACES: u32 = 2;

/// Errors produced while building or combining amounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// The input is not a decimal number.
    #[error("unable to parse '{0}' as a decimal amount")]
    Invalid(String),

    /// The result does not fit in the decimal representation.
    #[error("decimal overflow while multiplying {0} by {1}")]
    Overflow(String, String),
}

/// A monetary amount with decimal precision.
///
/// The value carries whatever scale it was parsed or computed with; call
/// [`Amount::round_to_cents`] before persisting or displaying it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(Decimal);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Parses a decimal string such as `"123.16"`, `"-0.5"` or `"1.5e3"`.
    ///
    /// Digit separators (`"1_000"`) are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::Invalid`] if the text is not a decimal number
    /// or has more integer digits than a `Decimal` can hold.
    pub fn parse(text: &str) -> Result<Self, AmountError> {
        let invalid = || AmountError::Invalid(text.to_string());
        if text.contains('_') {
            return Err(invalid());
        }
        let parsed = if text.contains(['e', 'E']) {
            Decimal::from_scientific(text)
        } else {
            Decimal::from_str(text)
        };
        parsed.map(Self).map_err(|_| invalid())
    }

    /// Wraps an existing decimal.
    #[must_use]
    pub const fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the inner decimal.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is strictly below zero.
    ///
    /// A negatively signed zero (`"-0"`, `"-0.00"`) is not negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiplies two amounts at full precision. No rounding is applied.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::Overflow`] if the product is out of range.
    pub fn checked_mul(self, other: Self) -> Result<Self, AmountError> {
        self.0
            .checked_mul(other.0)
            .map(Self)
            .ok_or_else(|| AmountError::Overflow(self.to_string(), other.to_string()))
    }

    /// Rounds to the nearest cent, midpoints away from zero.
    ///
    /// `12.6544` becomes `12.65`, `12.655` becomes `12.66`. Values that
    /// already have two or fewer fractional digits are unchanged.
    #[must_use]
    pub fn round_to_cents(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

/// Canonical text: trailing fractional zeros are dropped, so `1.50` prints
/// as `1.5` and `0.00` prints as `0`.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.normalize(), f)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_string()
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
