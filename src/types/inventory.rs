use rust_decimal::Decimal;

use crate::types::price::Price;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Inventory {
    /// Base asset balance (e.g. ETH).
    pub base: Decimal,
    /// Quote asset balance (e.g. USDT).
    pub quote: Decimal,
}

impl Inventory {
    pub fn new(base: Decimal, quote: Decimal) -> Self {
        Self { base, quote }
    }

    /// Mark-to-market value in quote currency.
    pub fn mtm_quote(&self, mid: Price) -> Decimal {
        self.quote + mid * self.base
    }
}
