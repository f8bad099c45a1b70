use anyhow::Result;
use async_trait::async_trait;

use crate::candles::{candle::Candle, candle_interval::CandleInterval};
use crate::types::instrument::Instrument;

#[async_trait]
pub trait CandleHistory: Send + Sync {
    /// Fetches up to `limit` of the most recent bars, oldest first.
    async fn fetch(
        &self,
        instrument: &Instrument,
        interval: CandleInterval,
        limit: usize,
    ) -> Result<Vec<Candle>>;
}
