//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are kept at full precision; rounding to two decimal places happens
//! only when a value is rendered for display.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places shown for every currency amount.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., cedis, not pesewas).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display (e.g., "GHS 35.00").
    #[must_use]
    pub fn display(&self) -> String {
        format_amount(self.amount, self.currency_code)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Render an amount with exactly two decimal places, rounding half away from zero.
///
/// ```
/// use rust_decimal::Decimal;
/// use ttp_core::{CurrencyCode, format_amount};
///
/// assert_eq!(format_amount(Decimal::new(108, 0), CurrencyCode::GHS), "GHS 108.00");
/// assert_eq!(format_amount(Decimal::new(12345, 3), CurrencyCode::GHS), "GHS 12.35");
/// ```
#[must_use]
pub fn format_amount(amount: Decimal, currency_code: CurrencyCode) -> String {
    format!("{} {}", currency_code.code(), format_decimal(amount))
}

/// Render a bare amount with exactly two decimal places (no currency code).
#[must_use]
pub fn format_decimal(amount: Decimal) -> String {
    let mut rounded =
        amount.round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_DECIMAL_PLACES);
    rounded.to_string()
}

/// Error returned when a currency code is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported currency code: {0}")]
pub struct CurrencyCodeError(pub String);

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Ghana cedi.
    #[default]
    GHS,
    NGN,
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// The three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::GHS => "GHS",
            Self::NGN => "NGN",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GHS" => Ok(Self::GHS),
            "NGN" => Ok(Self::NGN),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(CurrencyCodeError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_whole_amounts() {
        assert_eq!(format_decimal(Decimal::new(35, 0)), "35.00");
        assert_eq!(format_decimal(Decimal::ZERO), "0.00");
    }

    #[test]
    fn test_format_rounds_half_away_from_zero() {
        assert_eq!(format_decimal(Decimal::new(1005, 3)), "1.01");
        assert_eq!(format_decimal(Decimal::new(1004, 3)), "1.00");
        assert_eq!(format_decimal(Decimal::new(-1005, 3)), "-1.01");
    }

    #[test]
    fn test_price_display() {
        let price = Price::new(Decimal::new(3800, 2), CurrencyCode::GHS);
        assert_eq!(price.display(), "GHS 38.00");
        assert_eq!(price.to_string(), "GHS 38.00");
    }

    #[test]
    fn test_currency_code_from_str_is_case_insensitive() {
        assert_eq!("ghs".parse::<CurrencyCode>().unwrap(), CurrencyCode::GHS);
        assert_eq!(" usd ".parse::<CurrencyCode>().unwrap(), CurrencyCode::USD);
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_default_currency_is_cedi() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::GHS);
    }
}
