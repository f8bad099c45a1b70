use rust_decimal::Decimal;
use uuid::Uuid;

use crate::types::{instrument::Instrument, price::Price, quote::Quote};
use std::fmt;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    #[default]
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    /// Resting limit order; the venue must not let it take liquidity.
    MakerLimit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub instrument: Instrument,
    pub side: Side,
    pub price: Price,
    pub amount: Decimal,
    pub order_type: OrderType,
}

impl Order {
    pub fn maker_from_quote(instrument: &Instrument, quote: &Quote) -> Self {
        Self {
            order_id: generate_order_id(quote.side),
            instrument: instrument.clone(),
            side: quote.side,
            price: quote.price,
            amount: quote.amount,
            order_type: OrderType::MakerLimit,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    CancelAll,
    Cancel {
        order_id: String,
        instrument: Instrument,
        side: Side,
    },
    Place(Order),
}

fn generate_order_id(side: Side) -> String {
    let prefix = match side {
        Side::Buy => "b",
        Side::Sell => "s",
    };

    format!("{prefix}-{}", Uuid::new_v4().simple())
}
