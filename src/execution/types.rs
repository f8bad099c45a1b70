use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::execution::order_action::Side;
use crate::types::price::Price;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveOrderState {
    /// Sent to the venue, not acknowledged yet.
    Pending,
    Live,
    Cancelling,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveOrder {
    pub order_id: String,
    pub side: Side,
    pub price: Price,
    pub amount: Decimal,
    pub state: ActiveOrderState,
    pub created_at: DateTime<Utc>,
}
