use crate::{
    market::market_state::MarketState,
    signals::signal_state::SignalState,
    types::quote_target::{NoQuoteReason, QuoteTarget},
};

pub trait Strategy: Send {
    fn compute_target(
        &self,
        market_state: &MarketState,
        signal_state: &SignalState,
    ) -> Result<QuoteTarget, NoQuoteReason>;
}
