use std::time::Instant;

use crate::candles::candle_store::CandleStore;

pub struct ScheduleContext<'a> {
    pub now: Instant,
    /// Earliest instant the next refresh cycle may run.
    pub next_refresh: Instant,
    pub candle_store: &'a CandleStore,
}
