use std::collections::VecDeque;

use crate::candles::candle::Candle;

/// Bounded candle history ordered by open time.
#[derive(Debug, Clone)]
pub struct CandleStore {
    candles: VecDeque<Candle>,
    max_records: usize,
    required_records: usize,
}

impl CandleStore {
    pub fn new(max_records: usize, required_records: usize) -> Self {
        Self {
            candles: VecDeque::with_capacity(max_records),
            max_records,
            required_records: required_records.min(max_records),
        }
    }

    pub fn upsert(&mut self, candle: Candle) {
        let Some(last) = self.candles.back_mut() else {
            self.candles.push_back(candle);
            return;
        };

        if candle.open_time_ms == last.open_time_ms {
            *last = candle;
        } else if candle.open_time_ms > last.open_time_ms {
            self.candles.push_back(candle);
            while self.candles.len() > self.max_records {
                self.candles.pop_front();
            }
        } else if let Ok(index) = self
            .candles
            .binary_search_by_key(&candle.open_time_ms, |existing| existing.open_time_ms)
        {
            self.candles[index] = candle;
        }
    }

    /// Loads a backfilled history; bars may arrive in any order.
    pub fn extend(&mut self, candles: impl IntoIterator<Item = Candle>) {
        let mut sorted: Vec<Candle> = candles.into_iter().collect();
        sorted.sort_by_key(|candle| candle.open_time_ms);

        /* NOTE: bars older than the streamed tail only replace bars we already hold */
        for candle in sorted {
            self.upsert(candle);
        }
    }

    pub fn is_ready(&self) -> bool {
        self.candles.len() >= self.required_records
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn required_records(&self) -> usize {
        self.required_records
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Candle> + ExactSizeIterator {
        self.candles.iter()
    }
}
