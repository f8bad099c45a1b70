use rust_decimal::Decimal;

use crate::candles::candle::Candle;

/// Wilder's Average True Range.
///
/// The first bar only provides a previous close. The seed is the simple mean
/// of the first `window` true ranges, after which each bar is smoothed as
/// `(atr * (window - 1) + tr) / window`.
#[derive(Debug, Clone, Copy)]
pub struct AverageTrueRange {
    window: usize,
}

impl AverageTrueRange {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Bars needed before the first value exists.
    pub fn required_candles(&self) -> usize {
        self.window + 1
    }

    /// One entry per bar, `None` until the window has filled.
    pub fn series<'a>(&self, candles: impl IntoIterator<Item = &'a Candle>) -> Vec<Option<Decimal>> {
        let mut values = Vec::new();
        if self.window == 0 {
            return candles.into_iter().map(|_| None).collect();
        }

        let window = Decimal::from(self.window);
        let mut previous_close: Option<Decimal> = None;
        let mut seed_sum = Decimal::ZERO;
        let mut seen = 0usize;
        let mut atr: Option<Decimal> = None;

        for candle in candles {
            let Some(close) = previous_close.replace(candle.close) else {
                values.push(None);
                continue;
            };

            let range = true_range(candle, close);
            atr = match atr {
                Some(previous) => Some((previous * (window - Decimal::ONE) + range) / window),
                None => {
                    seed_sum += range;
                    seen += 1;
                    (seen == self.window).then(|| seed_sum / window)
                }
            };

            values.push(atr);
        }

        values
    }

    pub fn latest<'a>(&self, candles: impl IntoIterator<Item = &'a Candle>) -> Option<Decimal> {
        self.series(candles).last().copied().flatten()
    }
}

pub fn true_range(candle: &Candle, previous_close: Decimal) -> Decimal {
    candle
        .range()
        .max((candle.high - previous_close).abs())
        .max((candle.low - previous_close).abs())
}
