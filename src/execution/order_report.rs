use rust_decimal::Decimal;

use crate::execution::order_action::Side;
use crate::types::instrument::Instrument;
use crate::types::price::Price;

#[derive(Debug, Clone, PartialEq)]
pub enum OrderReport {
    Placed {
        order_id: String,
        instrument: Instrument,
        side: Side,
        price: Price,
        amount: Decimal,
    },

    Accepted {
        order_id: String,
        instrument: Instrument,
        side: Side,
        price: Price,
        amount: Decimal,
    },

    Rejected {
        order_id: String,
        instrument: Instrument,
        side: Side,
        reason: String,
    },

    Filled {
        order_id: String,
        instrument: Instrument,
        side: Side,
        price: Price,
        amount: Decimal,
    },

    Cancelled {
        order_id: String,
        instrument: Instrument,
        side: Side,
    },

    CancelFailed {
        order_id: String,
        instrument: Instrument,
        side: Side,
        reason: String,
    },

    CancelledAll {
        count: usize,
    },
}
