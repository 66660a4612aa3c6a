//! Exact conversion between piconero and XMR.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ValidationError;

/// Number of fractional digits of one XMR.
pub const DECIMAL_PLACES: u32 = 12;

/// Base units (piconero) in one XMR.
pub const PICONERO_PER_XMR: u64 = 1_000_000_000_000;

/// A non-negative XMR amount, stored as its piconero count.
///
/// Arithmetic and ordering work on the integer representation, so they are
/// exact at the full 12-digit precision.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Wraps a piconero count as received from the RPC.
    pub const fn from_atomic(piconero: u64) -> Self {
        Self(piconero)
    }

    /// The piconero count.
    pub const fn to_atomic(self) -> u64 {
        self.0
    }

    /// Converts a decimal XMR value, rejecting negatives and anything finer
    /// than one piconero.
    pub fn from_decimal(value: Decimal) -> Result<Self, ValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::NegativeAmount(value.to_string()));
        }
        let value = value.normalize();
        if value.scale() > DECIMAL_PLACES {
            return Err(ValidationError::AmountPrecision(value.to_string()));
        }
        let factor = 10i128.pow(DECIMAL_PLACES - value.scale());
        value
            .mantissa()
            .checked_mul(factor)
            .and_then(|atomic| u64::try_from(atomic).ok())
            .map(Self)
            .ok_or_else(|| ValidationError::AmountOverflow(value.to_string()))
    }

    /// The value in XMR with exactly 12 fractional digits.
    pub fn as_decimal(self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.0), DECIMAL_PLACES)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Total of `amounts`, or `None` if it does not fit.
    pub fn checked_sum<I: IntoIterator<Item = Amount>>(amounts: I) -> Option<Amount> {
        amounts.into_iter().try_fold(Amount::ZERO, Amount::checked_add)
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    pub fn saturating_sub(self, other: Amount) -> Amount {
        Amount(self.0.saturating_sub(other.0))
    }
}

impl TryFrom<i64> for Amount {
    type Error = ValidationError;

    fn try_from(piconero: i64) -> Result<Self, Self::Error> {
        u64::try_from(piconero)
            .map(Amount)
            .map_err(|_| ValidationError::NegativeAmount(piconero.to_string()))
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.as_decimal()
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str_exact(s.trim())
            .map_err(|_| ValidationError::InvalidAmount(s.to_string()))?;
        Self::from_decimal(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_decimal(), f)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self.as_decimal())
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_decimal().to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_roundtrip_is_exact() {
        for n in [0u64, 1, 999_999_999_999, PICONERO_PER_XMR, 331_130_000, u64::MAX] {
            let amount = Amount::from_atomic(n);
            assert_eq!(Amount::from_decimal(amount.as_decimal()).unwrap().to_atomic(), n);
        }
    }

    #[test]
    fn display_keeps_twelve_digits() {
        assert_eq!(Amount::from_atomic(331_130_000).to_string(), "0.000331130000");
        assert_eq!(Amount::from_atomic(10 * PICONERO_PER_XMR).to_string(), "10.000000000000");
    }

    #[test]
    fn parses_decimal_strings() {
        let amount: Amount = "0.000265330000".parse().unwrap();
        assert_eq!(amount.to_atomic(), 265_330_000);
        let amount: Amount = "8".parse().unwrap();
        assert_eq!(amount.to_atomic(), 8 * PICONERO_PER_XMR);
    }

    #[test]
    fn rejects_negative_values() {
        assert!(matches!(
            Amount::try_from(-1i64),
            Err(ValidationError::NegativeAmount(_))
        ));
        assert!(matches!(
            "-0.5".parse::<Amount>(),
            Err(ValidationError::NegativeAmount(_))
        ));
    }

    #[test]
    fn rejects_sub_piconero_precision() {
        assert!(matches!(
            "0.0000000000001".parse::<Amount>(),
            Err(ValidationError::AmountPrecision(_))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            "ten".parse::<Amount>(),
            Err(ValidationError::InvalidAmount(_))
        ));
    }

    #[test]
    fn rejects_values_beyond_u64() {
        assert!(matches!(
            "18446745".parse::<Amount>(),
            Err(ValidationError::AmountOverflow(_))
        ));
    }

    #[test]
    fn arithmetic_is_exact() {
        let total: Amount = "10".parse().unwrap();
        let locked: Amount = "2".parse().unwrap();
        assert_eq!(total.saturating_sub(locked), "8".parse().unwrap());
        assert_eq!(locked.checked_sub(total), None);
        let parts = ["0.1", "0.2"].iter().map(|s| s.parse::<Amount>().unwrap());
        assert_eq!(Amount::checked_sum(parts), Some("0.3".parse().unwrap()));
    }

    #[test]
    fn sum_reports_overflow() {
        let near_max = Amount::from_atomic(u64::MAX - 1);
        assert_eq!(
            Amount::checked_sum([near_max, Amount::from_atomic(1)]),
            Some(Amount::from_atomic(u64::MAX))
        );
        assert_eq!(Amount::checked_sum([near_max, Amount::from_atomic(2)]), None);
        assert_eq!(near_max.checked_add(Amount::from_atomic(2)), None);
        assert_eq!(Amount::checked_sum(Vec::new()), Some(Amount::ZERO));
    }

    #[test]
    fn serde_uses_decimal_string() {
        let amount = Amount::from_atomic(1);
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"0.000000000001\"");
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
    }
}
