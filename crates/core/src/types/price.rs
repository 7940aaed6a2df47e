//! Non-negative currency amounts using decimal arithmetic.
//!
//! All prices are in the shop's base currency unit (yuan). Amounts are kept as
//! [`Decimal`] so that line totals and cart totals add up exactly.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative amount of money in the base currency unit.
///
/// Serialized as a JSON number (`12.5`), which is the format cart slots and
/// order payloads use. Deserialization also accepts numeric strings.
///
/// ```
/// use elena_menu_core::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Decimal::new(125, 1)).unwrap();
/// assert_eq!((price * 2).to_string(), "¥25.00");
/// assert!(Price::new(Decimal::NEGATIVE_ONE).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero yuan.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest representable amount. Line and cart totals stop here instead
    /// of overflowing.
    pub const MAX: Self = Self(Decimal::MAX);

    /// Currency symbol used for display.
    pub const SYMBOL: &'static str = "¥";

    /// Create a price, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns `true` for a zero amount.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", Self::SYMBOL, self.0)
    }
}

/// Saturates at [`Price::MAX`].
impl Add for Price {
    type Output = Self;

    // Both operands are non-negative, so the sum is too.
    fn add(self, rhs: Self) -> Self {
        self.0.checked_add(rhs.0).map_or(Self::MAX, Self)
    }
}

/// Saturates at [`Price::MAX`].
impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map_or(Self::MAX, Self)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn yuan(cents: i64) -> Price {
        Price::new(Decimal::new(cents, 2)).unwrap()
    }

    #[test]
    fn test_negative_rejected() {
        let err = Price::new(Decimal::new(-1, 2)).unwrap_err();
        assert!(matches!(err, PriceError::Negative(_)));
    }

    #[test]
    fn test_zero_accepted() {
        assert!(Price::new(Decimal::ZERO).unwrap().is_zero());
        // -0 is still zero
        assert!(Price::new(Decimal::new(0, 2)).is_ok());
    }

    #[test]
    fn test_display_two_places() {
        assert_eq!(yuan(1250).to_string(), "¥12.50");
        assert_eq!(Price::ZERO.to_string(), "¥0.00");
    }

    #[test]
    fn test_line_total_is_exact() {
        // 0.1 * 3 must not drift the way binary floats do
        assert_eq!(yuan(10) * 3, yuan(30));
    }

    #[test]
    fn test_overflow_saturates() {
        let huge = Price::new(Decimal::from_i128_with_scale(7 * 10_i128.pow(28), 0)).unwrap();
        assert_eq!(huge * 2, Price::MAX);
        assert_eq!(Price::MAX + yuan(1), Price::MAX);
        assert_eq!(Price::MAX * 0, Price::ZERO);

        let total: Price = [huge, huge, yuan(100)].into_iter().sum();
        assert_eq!(total, Price::MAX);
    }

    #[test]
    fn test_sum() {
        let total: Price = [yuan(1000), yuan(1000), yuan(500)].into_iter().sum();
        assert_eq!(total, yuan(2500));
        let empty: Price = core::iter::empty().sum();
        assert_eq!(empty, Price::ZERO);
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&yuan(1250)).unwrap(), "12.5");
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let from_number: Price = serde_json::from_str("12.5").unwrap();
        let from_string: Price = serde_json::from_str("\"12.50\"").unwrap();
        assert_eq!(from_number, from_string);
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }
}
