use rust_decimal::Decimal;

use crate::execution::order_action::Side;
use crate::types::price::Price;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quote {
    pub side: Side,
    pub price: Price,
    pub amount: Decimal,
}

impl Quote {
    pub fn new(side: Side, price: Price, amount: Decimal) -> Self {
        Self {
            side,
            price,
            amount,
        }
    }

    pub fn with_amount(self, amount: Decimal) -> Self {
        Self { amount, ..self }
    }
}
