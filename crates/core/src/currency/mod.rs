//! Exchange-rate selection and currency conversion.

pub mod conversion;
pub mod exchange;
pub mod recency;
pub mod source;

#[cfg(test)]
mod props;

pub use conversion::{Conversion, convert, convert_amount};
pub use exchange::{RateQuery, RateQuote};
pub use recency::{RECENCY_WINDOW_MONTHS, ensure_recent, recency_cutoff};
pub use source::RateSource;
