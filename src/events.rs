use rust_decimal::Decimal;

use crate::candles::candle::Candle;
use crate::types::{instrument::Instrument, price::Price};

#[derive(Debug, Clone, PartialEq)]
pub enum MarketEvent {
    Trade {
        instrument: Instrument,
        price: Price,
        quantity: Decimal,
        timestamp_ms: u64,
    },
    TopOfBook {
        instrument: Instrument,
        best_bid: Price,
        best_ask: Price,
        timestamp_ms: u64,
    },
    Candle {
        instrument: Instrument,
        candle: Candle,
    },
}

impl MarketEvent {
    pub fn instrument(&self) -> &Instrument {
        match self {
            Self::Trade { instrument, .. }
            | Self::TopOfBook { instrument, .. }
            | Self::Candle { instrument, .. } => instrument,
        }
    }
}
