//! Property-based tests for conversion and quote recency.
//!
//! - Property 1: Cent rounding of converted amounts
//! - Property 2: Recency window boundary

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use purser_shared::Amount;
use rust_decimal::Decimal;

use super::conversion::convert_amount;
use super::exchange::RateQuote;
use super::recency::{ensure_recent, recency_cutoff};
use crate::error::PurchaseError;

/// Strategy to generate non-negative amounts with up to 10 fractional digits.
fn any_amount() -> impl Strategy<Value = Amount> {
    (0i64..100_000_000_000i64, 0u32..=10)
        .prop_map(|(mantissa, scale)| Amount::from_decimal(Decimal::new(mantissa, scale)))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000) as text.
fn positive_rate() -> impl Strategy<Value = String> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4).to_string())
}

/// Strategy to generate purchase dates between 1990 and 2040.
fn purchase_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..18_262).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default() + Duration::days(offset)
    })
}

fn quote_at(rate: &str, record_date: NaiveDate) -> RateQuote {
    RateQuote::new("Test-Currency", rate, record_date)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // =========================================================================
    // Property 1: Cent rounding of converted amounts
    // =========================================================================

    /// Property 1.1: Converted amounts never carry more than two decimals,
    /// whatever the precision of the inputs.
    #[test]
    fn prop_converted_amount_has_two_places(
        amount in any_amount(),
        rate in positive_rate(),
    ) {
        let quote = quote_at(&rate, NaiveDate::default());
        let converted = convert_amount(amount, &quote).unwrap().as_decimal();
        prop_assert!(converted.scale() <= 2, "{} has more than two places", converted);
    }

    /// Property 1.2: The rounded result is within half a cent of the exact product.
    #[test]
    fn prop_converted_amount_within_half_cent(
        amount in any_amount(),
        rate in positive_rate(),
    ) {
        let quote = quote_at(&rate, NaiveDate::default());
        let converted = convert_amount(amount, &quote).unwrap().as_decimal();
        let exact = amount.as_decimal() * Decimal::from_str_exact(&rate).unwrap();
        prop_assert!((converted - exact).abs() <= Decimal::new(5, 3));
    }

    /// Property 1.3: Converting with a rate of one is plain cent rounding.
    #[test]
    fn prop_unit_rate_is_rounding(amount in any_amount()) {
        let quote = quote_at("1", NaiveDate::default());
        prop_assert_eq!(convert_amount(amount, &quote).unwrap(), amount.round_to_cents());
    }

    // =========================================================================
    // Property 2: Recency window boundary
    // =========================================================================

    /// Property 2.1: A quote recorded exactly on the cutoff is accepted and one
    /// recorded the day before is rejected.
    #[test]
    fn prop_cutoff_is_inclusive(date in purchase_date()) {
        let cutoff = recency_cutoff(date);
        prop_assert!(ensure_recent(&quote_at("1", cutoff), date).is_ok());

        let stale = quote_at("1", cutoff - Duration::days(1));
        prop_assert!(matches!(
            ensure_recent(&stale, date),
            Err(PurchaseError::RateUnavailable(_))
        ));
    }

    /// Property 2.2: Six calendar months always span 181 to 184 days.
    #[test]
    fn prop_cutoff_is_six_calendar_months(date in purchase_date()) {
        let days = (date - recency_cutoff(date)).num_days();
        prop_assert!((181..=184).contains(&days), "{} days before {}", days, date);
    }
}
