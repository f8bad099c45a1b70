use anyhow::{Result, bail};
use rust_decimal::Decimal;

/// Fractional spread limits, `0 < min <= max < 1`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpreadBounds {
    min_spread: Decimal,
    max_spread: Decimal,
}

impl SpreadBounds {
    pub fn new(min_spread: Decimal, max_spread: Decimal) -> Result<Self> {
        if min_spread <= Decimal::ZERO {
            bail!("min_spread must be > 0, got {min_spread}");
        }
        if max_spread >= Decimal::ONE {
            bail!("max_spread must be < 1, got {max_spread}");
        }
        if min_spread > max_spread {
            bail!("min_spread ({min_spread}) must not exceed max_spread ({max_spread})");
        }

        Ok(Self {
            min_spread,
            max_spread,
        })
    }

    pub fn min(&self) -> Decimal {
        self.min_spread
    }

    pub fn max(&self) -> Decimal {
        self.max_spread
    }

    /// Min is applied first, then max.
    pub fn clamp(&self, spread: Decimal) -> Decimal {
        spread.max(self.min_spread).min(self.max_spread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn accepts_ordered_fractions() {
        let bounds = SpreadBounds::new(dec!(0.0003), dec!(0.002)).unwrap();
        assert_eq!(bounds.min(), dec!(0.0003));
        assert_eq!(bounds.max(), dec!(0.002));
    }

    #[test]
    fn equal_bounds_are_allowed() {
        assert!(SpreadBounds::new(dec!(0.001), dec!(0.001)).is_ok());
    }

    #[test]
    fn rejects_inverted_bounds() {
        let error = SpreadBounds::new(dec!(0.002), dec!(0.0003)).unwrap_err();
        assert!(error.to_string().contains("must not exceed"));
    }

    #[test]
    fn rejects_out_of_range_fractions() {
        assert!(SpreadBounds::new(dec!(0), dec!(0.002)).is_err());
        assert!(SpreadBounds::new(dec!(-0.001), dec!(0.002)).is_err());
        assert!(SpreadBounds::new(dec!(0.001), dec!(1)).is_err());
    }

    #[test]
    fn clamp_keeps_values_inside() {
        let bounds = SpreadBounds::new(dec!(0.0003), dec!(0.002)).unwrap();
        assert_eq!(bounds.clamp(dec!(0.0001)), dec!(0.0003));
        assert_eq!(bounds.clamp(dec!(0.00048)), dec!(0.00048));
        assert_eq!(bounds.clamp(dec!(0.01)), dec!(0.002));
    }
}
