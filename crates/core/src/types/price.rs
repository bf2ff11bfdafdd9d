//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are kept exact through discounting and summation. Rounding only
//! happens when a price is formatted for display.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Non-breaking space used by the ru-RU number format.
const NBSP: char = '\u{a0}';

/// Fraction digits shown when a price is displayed.
const DISPLAY_DECIMALS: u32 = 2;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (roubles, not kopecks).
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

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_whole(units: u64) -> Self {
        Self::new(Decimal::from(units), CurrencyCode::default())
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Multiply by a line quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// Scale the amount by an exact factor (e.g. a discount multiplier).
    #[must_use]
    pub fn scaled(self, factor: Decimal) -> Self {
        Self::new(self.amount * factor, self.currency_code)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.amount + rhs.amount, self.currency_code)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(CurrencyCode::default()), Add::add)
    }
}

impl fmt::Display for Price {
    /// Formats as ru-RU: `38 250 ₽`, `1 799,1 ₽`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .amount
            .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
            .normalize();

        if rounded.is_sign_negative() && !rounded.is_zero() {
            f.write_str("-")?;
        }

        let digits = rounded.abs().to_string();
        let (whole, fraction) = digits
            .split_once('.')
            .map_or((digits.as_str(), None), |(w, fr)| (w, Some(fr)));

        f.write_str(&group_thousands(whole))?;
        if let Some(fraction) = fraction {
            write!(f, ",{fraction}")?;
        }
        write!(f, "{NBSP}{}", self.currency_code.symbol())
    }
}

/// Insert a non-breaking space between every group of three digits.
fn group_thousands(digits: &str) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / 3 * NBSP.len_utf8());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(NBSP);
        }
        out.push(c);
    }
    out
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    RUB,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::RUB => "₽",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn rub(amount: &str) -> Price {
        Price::new(Decimal::from_str(amount).unwrap(), CurrencyCode::RUB)
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::from_whole(45_000).to_string(), "45\u{a0}000\u{a0}₽");
        assert_eq!(
            Price::from_whole(1_250_000).to_string(),
            "1\u{a0}250\u{a0}000\u{a0}₽"
        );
        assert_eq!(Price::from_whole(999).to_string(), "999\u{a0}₽");
        assert_eq!(Price::from_whole(0).to_string(), "0\u{a0}₽");
    }

    #[test]
    fn test_display_uses_comma_and_drops_trailing_zeros() {
        assert_eq!(rub("1799.10").to_string(), "1\u{a0}799,1\u{a0}₽");
        assert_eq!(rub("900.00").to_string(), "900\u{a0}₽");
    }

    #[test]
    fn test_display_rounds_only_at_two_places() {
        assert_eq!(rub("10.005").to_string(), "10,01\u{a0}₽");
        assert_eq!(rub("10.004").to_string(), "10\u{a0}₽");
    }

    #[test]
    fn test_sum_keeps_full_precision() {
        // Three lines of 0.333 round to 0.33 each, but the sum must not.
        let total: Price = std::iter::repeat_n(rub("0.333"), 3).sum();
        assert_eq!(total.amount, Decimal::from_str("0.999").unwrap());
        assert_eq!(total.to_string(), "1\u{a0}₽");
    }

    #[test]
    fn test_times_and_scaled() {
        let price = Price::from_whole(1000);
        assert_eq!(price.times(3), Price::from_whole(3000));
        assert_eq!(
            price.scaled(Decimal::from_str("0.9").unwrap()).amount,
            Decimal::from(900)
        );
    }

    #[test]
    fn test_ordering_compares_amounts() {
        assert!(Price::from_whole(500) < Price::from_whole(1000));
    }
}
