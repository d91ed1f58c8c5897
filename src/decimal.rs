use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

/// number of decimal places kept on every money value
pub const MONEY_SCALE: u32 = 8;

/// Money type backed by a fixed-scale decimal, so surcharge arithmetic never drifts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(MONEY_SCALE))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money::from_decimal(Decimal::from_str(s)?))
    }

    /// create from integer amount (sums, dollars, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor amount (tiyin, cents, etc)
    pub fn from_minor(amount: i64, scale: u32) -> Self {
        let d = Decimal::from(amount) / Decimal::from(10_u64.pow(scale));
        Money(d.round_dp(MONEY_SCALE))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// strictly greater than zero; zero itself is not positive
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// sum, or `None` past the decimal range
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money::from_decimal)
    }

    /// scale by `numerator / denominator` in a single rounding step, `None` on overflow
    pub fn checked_fraction(&self, numerator: u32, denominator: u32) -> Option<Money> {
        debug_assert!(denominator != 0, "fraction denominator must be non-zero");
        self.0
            .checked_mul(Decimal::from(numerator))?
            .checked_div(Decimal::from(denominator))
            .map(Money::from_decimal)
    }
}

// json input goes through the same rounding as every other constructor
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer).map(Money::from_decimal)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money((self.0 - other.0).round_dp(MONEY_SCALE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.123456789").unwrap();
        assert_eq!(m.to_string(), "100.12345679"); // rounded to 8 places
    }

    #[test]
    fn test_minor_units() {
        let sums = Money::from_minor(150_050, 2);
        assert_eq!(sums, Money::from_str_exact("1500.50").unwrap());
    }

    #[test]
    fn test_zero_is_not_positive() {
        assert!(!Money::ZERO.is_positive());
        assert!(Money::from_minor(1, 2).is_positive());
        assert!(!Money::from_major(-5).is_positive());
    }

    #[test]
    fn test_checked_fraction() {
        let price = Money::from_major(1_000);
        assert_eq!(price.checked_fraction(45, 300), Some(Money::from_major(150)));
        assert_eq!(price.checked_fraction(1, 3).unwrap().as_decimal(), dec!(333.33333333));

        let huge = Money::from_str_exact("10000000000000000000000000000").unwrap();
        assert_eq!(huge.checked_fraction(45, 300), None);
    }

    #[test]
    fn test_checked_add() {
        let max = Money::from_decimal(Decimal::MAX);
        assert_eq!(max.checked_add(Money::from_major(1)), None);
        assert_eq!(
            Money::from_major(1_000).checked_add(Money::from_major(150)),
            Some(Money::from_major(1_150))
        );
    }

    #[test]
    fn test_serializes_as_json_number() {
        let json = serde_json::to_string(&Money::from_major(1150)).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Money::from_major(1150));

        let from_int: Money = serde_json::from_str("1000").unwrap();
        assert_eq!(from_int, Money::from_major(1000));
    }

    #[test]
    fn test_json_input_is_rounded() {
        let m: Money = serde_json::from_str("0.123456789").unwrap();
        assert_eq!(m.as_decimal(), dec!(0.12345679));

        let dust: Money = serde_json::from_str("0.000000001").unwrap();
        assert!(!dust.is_positive());
    }
}
