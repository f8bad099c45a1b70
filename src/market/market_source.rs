use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc::Sender;

use crate::candles::candle_interval::CandleInterval;
use crate::events::MarketEvent;
use crate::types::instrument::Instrument;

/// Streams top-of-book, trades and candles for one pair until the
/// connection drops or the receiver goes away. Callers reconnect.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn stream(
        &self,
        instrument: &Instrument,
        candle_interval: CandleInterval,
        channel: Sender<MarketEvent>,
    ) -> Result<()>;
}
