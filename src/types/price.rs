use std::fmt;
use std::ops::Mul;

use rust_decimal::Decimal;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    pub fn new(value: Decimal) -> Self {
        assert!(!value.is_sign_negative(), "price must be non-negative");

        Price(value)
    }

    /// Fallible constructor for prices coming off the wire.
    pub fn try_new(value: Decimal) -> Option<Self> {
        (!value.is_sign_negative()).then_some(Price(value))
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl fmt::Display for Price {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0.normalize())
    }
}

impl Mul<Decimal> for Price {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        self.0 * rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn display_drops_trailing_zeros() {
        assert_eq!(Price::new(dec!(1999.04000)).to_string(), "1999.04");
    }

    #[test]
    fn try_new_rejects_negative() {
        assert!(Price::try_new(dec!(-1)).is_none());
        assert_eq!(Price::try_new(dec!(0)), Some(Price::new(dec!(0))));
    }

    #[test]
    fn notional_is_decimal() {
        assert_eq!(Price::new(dec!(1999.04)) * dec!(0.01), dec!(19.9904));
    }
}
