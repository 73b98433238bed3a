//! Monetary amounts as they appear on receipts.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AmountError;

/// Number of fractional digits every amount carries.
pub const AMOUNT_SCALE: u32 = 2;

/// Largest accepted amount, one trillion. Sums of any realistic number of
/// amounts stay far below `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// A non-negative decimal amount with exactly two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct MonetaryAmount(Decimal);

impl MonetaryAmount {
    /// Create an amount, rounding to two fractional digits.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value < Decimal::ZERO {
            return Err(AmountError::Negative(value.to_string()));
        }
        if value > MAX_AMOUNT {
            return Err(AmountError::TooLarge(value.to_string()));
        }

        let mut value = value.round_dp(AMOUNT_SCALE);
        value.rescale(AMOUNT_SCALE);
        Ok(Self(value))
    }

    /// The zero amount (`0.00`).
    pub fn zero() -> Self {
        Self(Decimal::new(0, AMOUNT_SCALE))
    }

    /// Parse a European-formatted amount (`.` groups thousands, `,` is the
    /// decimal point).
    ///
    /// Every `.` is dropped and `,` becomes `.` before parsing, so
    /// `"1.234,56"` is `1234.56` and `"12.34"` is `1234.00`.
    pub fn from_european(s: &str) -> Result<Self, AmountError> {
        let normalized = s.trim().replace('.', "").replace(',', ".");
        let value = Decimal::from_str(&normalized)
            .map_err(|_| AmountError::Unparseable(s.to_string()))?;
        Self::new(value)
    }

    /// Underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Default for MonetaryAmount {
    fn default() -> Self {
        Self::zero()
    }
}

impl TryFrom<Decimal> for MonetaryAmount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MonetaryAmount> for Decimal {
    fn from(amount: MonetaryAmount) -> Self {
        amount.0
    }
}

/// Parses the plain (`.` decimal point) form used by storage backends.
impl FromStr for MonetaryAmount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value =
            Decimal::from_str(s.trim()).map_err(|_| AmountError::Unparseable(s.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for MonetaryAmount {
    type Output = Self;

    /// Saturates at `Decimal::MAX` instead of panicking.
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for MonetaryAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a MonetaryAmount> for MonetaryAmount {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_from_european() {
        assert_eq!(MonetaryAmount::from_european("12,34").unwrap().value(), dec("12.34"));
        assert_eq!(
            MonetaryAmount::from_european("1.234,56").unwrap().value(),
            dec("1234.56")
        );
        // A dot is always a grouping separator.
        assert_eq!(MonetaryAmount::from_european("12.34").unwrap().value(), dec("1234"));
    }

    #[test]
    fn test_from_european_rejects_garbage() {
        assert!(matches!(
            MonetaryAmount::from_european("abc"),
            Err(AmountError::Unparseable(_))
        ));
        assert!(MonetaryAmount::from_european("123456789012345678901234567890,00").is_err());
    }

    #[test]
    fn test_always_two_decimals() {
        assert_eq!(MonetaryAmount::from_european("12.34").unwrap().to_string(), "1234.00");
        assert_eq!(MonetaryAmount::new(dec("3.456")).unwrap().to_string(), "3.46");
        assert_eq!(MonetaryAmount::zero().to_string(), "0.00");
    }

    #[test]
    fn test_above_ceiling_rejected() {
        assert_eq!(MAX_AMOUNT, dec("1000000000000"));
        assert!(MonetaryAmount::new(MAX_AMOUNT).is_ok());
        assert!(matches!(
            MonetaryAmount::new(dec("1000000000000.01")),
            Err(AmountError::TooLarge(_))
        ));
        assert!(matches!(
            MonetaryAmount::from_european("79228162514264337593543950335,00"),
            Err(AmountError::TooLarge(_))
        ));
        assert!("79228162514264337593543950335.00".parse::<MonetaryAmount>().is_err());
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            MonetaryAmount::new(dec("-0.01")),
            Err(AmountError::Negative(_))
        ));
    }

    #[test]
    fn test_sum() {
        let amounts = ["1.10", "2.20", "3.30"]
            .iter()
            .map(|s| s.parse::<MonetaryAmount>().unwrap())
            .collect::<Vec<_>>();
        let total: MonetaryAmount = amounts.iter().sum();
        assert_eq!(total.to_string(), "6.60");
    }

    #[test]
    fn test_serde_as_decimal_string() {
        let amount: MonetaryAmount = "9.90".parse().unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"9.90\"");
        let back: MonetaryAmount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
        assert!(serde_json::from_str::<MonetaryAmount>("\"-1.00\"").is_err());
    }
}
