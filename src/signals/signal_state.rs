use rust_decimal::Decimal;

use crate::candles::candle_store::CandleStore;
use crate::signals::atr::AverageTrueRange;

#[derive(Debug, Clone)]
pub struct SignalState {
    atr: AverageTrueRange,
    last_atr: Option<Decimal>,
}

impl SignalState {
    pub fn new(atr_window: usize) -> Self {
        Self {
            atr: AverageTrueRange::new(atr_window),
            last_atr: None,
        }
    }

    pub fn update(&mut self, candle_store: &CandleStore) {
        self.last_atr = self.atr.latest(candle_store.iter());
    }

    pub fn atr(&self) -> Option<Decimal> {
        self.last_atr
    }

    pub fn indicator(&self) -> &AverageTrueRange {
        &self.atr
    }

    pub fn required_candles(&self) -> usize {
        self.atr.required_candles()
    }
}
