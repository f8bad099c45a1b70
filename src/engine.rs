use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::{
    budget::{BudgetChecker, InventoryBudgetChecker},
    candles::{candle::Candle, candle_store::CandleStore},
    events::MarketEvent,
    execution::{
        ExecutionVenue, order_action::OrderAction, order_manager::OrderManager,
        order_report::OrderReport,
    },
    market::market_state::MarketState,
    notify::{Notifier, fill_message},
    scheduling::{
        quote_scheduler::QuoteScheduler, schedule_context::ScheduleContext,
        types::{ScheduleDecision, SkipReason},
    },
    signals::signal_state::SignalState,
    status::{StatusView, format_status},
    strategy::strategy::Strategy,
    types::{inventory::Inventory, quote_target::NoQuoteReason, strategy_config::StrategyConfig},
};

#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Skipped(SkipReason),
    NoQuote(NoQuoteReason),
    Placed { orders: usize },
}

/// Owns all per-pair state and runs the cancel, quote, budget, place cycle.
pub struct MarketMakerEngine {
    config: StrategyConfig,
    strategy: Box<dyn Strategy>,
    venue: Box<dyn ExecutionVenue>,
    budget_checker: Box<dyn BudgetChecker>,
    notifier: Box<dyn Notifier>,
    scheduler: QuoteScheduler,
    order_manager: OrderManager,
    market_state: MarketState,
    candle_store: CandleStore,
    signal_state: SignalState,
    inventory: watch::Receiver<Inventory>,
    next_refresh: Instant,
}

impl MarketMakerEngine {
    pub fn new(
        config: StrategyConfig,
        strategy: Box<dyn Strategy>,
        venue: Box<dyn ExecutionVenue>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let signal_state = SignalState::new(config.atr_window);
        let candle_store =
            CandleStore::new(config.candles.max_records, signal_state.required_candles());
        let inventory = venue.inventory().subscribe();

        Self {
            config,
            strategy,
            venue,
            budget_checker: Box::new(InventoryBudgetChecker),
            notifier,
            scheduler: QuoteScheduler::default(),
            order_manager: OrderManager::default(),
            market_state: MarketState::new(),
            candle_store,
            signal_state,
            inventory,
            next_refresh: Instant::now(),
        }
    }

    pub fn backfill(&mut self, candles: Vec<Candle>) {
        let count = candles.len();
        self.candle_store.extend(candles);
        info!(
            count,
            stored = self.candle_store.len(),
            ready = self.candle_store.is_ready(),
            "candle history loaded"
        );
    }

    /// Venue failures are logged; market state keeps updating so the
    /// stop path can still cancel resting orders.
    pub async fn on_market_event(&mut self, event: &MarketEvent) {
        if event.instrument() != &self.config.trading_pair {
            return;
        }

        self.market_state.on_market_event(event);
        if let MarketEvent::Candle { candle, .. } = event {
            self.candle_store.upsert(*candle);
        }

        if let Err(error) = self.venue.on_market_event(event).await {
            error!("venue failed to process market event: {error:?}");
        }
    }

    pub fn on_report(&mut self, report: &OrderReport) {
        self.order_manager.on_report(report);

        match report {
            OrderReport::Filled {
                instrument,
                side,
                price,
                amount,
                ..
            } => {
                let message = fill_message(*side, *amount, instrument, *price);
                info!("{message}");
                self.notifier.notify(&message);
            }
            OrderReport::Rejected {
                order_id, reason, ..
            } => warn!(order_id = %order_id, reason = %reason, "order rejected"),
            _ => {}
        }
    }

    pub async fn on_tick(&mut self, now: Instant) -> Result<CycleOutcome> {
        let context = ScheduleContext {
            now,
            next_refresh: self.next_refresh,
            candle_store: &self.candle_store,
        };

        if let ScheduleDecision::Skip(reason) = self.scheduler.decide(&context) {
            debug!(?reason, "refresh skipped");
            return Ok(CycleOutcome::Skipped(reason));
        }

        self.cancel_all_orders().await?;

        self.signal_state.update(&self.candle_store);
        let target = match self
            .strategy
            .compute_target(&self.market_state, &self.signal_state)
        {
            Ok(target) => target,
            Err(reason) => {
                warn!(?reason, "no quotes this cycle");
                return Ok(CycleOutcome::NoQuote(reason));
            }
        };

        let inventory = *self.inventory.borrow();
        let adjusted = self
            .budget_checker
            .adjust_candidates(target.clone(), inventory, true);
        if adjusted.is_empty() {
            warn!(proposed = ?target, ?inventory, "insufficient balance, no orders this cycle");
        }

        let actions = self
            .order_manager
            .actions_for_target(&self.config.trading_pair, &adjusted);
        if !actions.is_empty() {
            self.venue.execute(&actions).await?;
        }

        self.next_refresh = now + self.config.refresh_interval();

        Ok(CycleOutcome::Placed {
            orders: actions.len(),
        })
    }

    pub async fn cancel_all_orders(&mut self) -> Result<()> {
        let cancels = self
            .order_manager
            .cancel_all_actions(&self.config.trading_pair);
        if cancels.is_empty() {
            return Ok(());
        }

        debug!(count = cancels.len(), "cancelling active orders");
        self.venue.execute(&cancels).await
    }

    pub async fn on_stop(&mut self) -> Result<()> {
        if !self.order_manager.has_active_orders() {
            return Ok(());
        }

        info!(
            count = self.order_manager.active_orders().len(),
            "stopping, cancelling all orders"
        );
        self.venue.execute(&[OrderAction::CancelAll]).await
    }

    pub fn status(&self) -> String {
        format_status(&StatusView {
            instrument: &self.config.trading_pair,
            market_state: &self.market_state,
            inventory: *self.inventory.borrow(),
            order_manager: &self.order_manager,
            candle_store: &self.candle_store,
            atr: self.signal_state.indicator(),
            candle_connector: &self.config.candles.connector,
            candle_interval: self.config.candles.interval,
            now: Utc::now(),
        })
    }

    pub fn order_manager(&self) -> &OrderManager {
        &self.order_manager
    }
}
