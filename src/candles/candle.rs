use rust_decimal::Decimal;

/// One OHLCV bar. `open_time_ms` is the bar's start in unix milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub open_time_ms: u64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl Candle {
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }
}
