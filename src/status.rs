use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    candles::{candle_interval::CandleInterval, candle_store::CandleStore},
    execution::{order_manager::OrderManager, types::ActiveOrderState},
    market::market_state::MarketState,
    signals::atr::AverageTrueRange,
    types::{instrument::Instrument, inventory::Inventory},
};

const CANDLE_ROWS: usize = 10;

pub struct StatusView<'a> {
    pub instrument: &'a Instrument,
    pub market_state: &'a MarketState,
    pub inventory: Inventory,
    pub order_manager: &'a OrderManager,
    pub candle_store: &'a CandleStore,
    pub atr: &'a AverageTrueRange,
    pub candle_connector: &'a str,
    pub candle_interval: CandleInterval,
    pub now: DateTime<Utc>,
}

pub fn format_status(view: &StatusView<'_>) -> String {
    if !view.market_state.is_ready() {
        return "Market connectors are not ready.".to_string();
    }

    let mut lines = vec![String::new(), "  Balances:".to_string()];
    lines.push(format!("    {:<8} {:>18}", "Asset", "Total"));
    lines.push(format!(
        "    {:<8} {:>18}",
        view.instrument.base(),
        view.inventory.base.normalize()
    ));
    lines.push(format!(
        "    {:<8} {:>18}",
        view.instrument.quote(),
        view.inventory.quote.normalize()
    ));
    if let Some(mid) = view.market_state.mid_price() {
        lines.push(format!(
            "    {:<8} {:>18}",
            "Value",
            view.inventory.mtm_quote(mid).round_dp(4).normalize()
        ));
    }

    let orders = view.order_manager.active_orders();
    if orders.is_empty() {
        lines.extend([String::new(), "  No active maker orders.".to_string()]);
    } else {
        lines.extend([String::new(), "  Orders:".to_string()]);
        lines.push(format!(
            "    {:<5} {:>14} {:>12} {:>10} {:<10}",
            "Side", "Price", "Amount", "Age", "State"
        ));
        for order in orders {
            let age = (view.now - order.created_at).num_seconds().max(0);
            lines.push(format!(
                "    {:<5} {:>14} {:>12} {:>10} {:<10}",
                order.side.to_string(),
                order.price.to_string(),
                order.amount.normalize().to_string(),
                format_age(age),
                state_label(order.state),
            ));
        }
    }

    lines.extend([String::new(), "-".repeat(70)]);
    lines.push(format!(
        "  Candles: {} {} | Interval: {}",
        view.candle_connector, view.instrument, view.candle_interval
    ));
    lines.push(format!(
        "    {:<17} {:>12} {:>12} {:>12} {:>12} {:>12} {:>10}",
        "Time",
        "Open",
        "High",
        "Low",
        "Close",
        "Volume",
        format!("ATR_{}", view.atr.window())
    ));

    let atr_values = view.atr.series(view.candle_store.iter());
    for (candle, atr) in view
        .candle_store
        .iter()
        .zip(atr_values)
        .rev()
        .take(CANDLE_ROWS)
    {
        let time = DateTime::<Utc>::from_timestamp_millis(candle.open_time_ms as i64)
            .map(|time| time.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| candle.open_time_ms.to_string());

        lines.push(format!(
            "    {:<17} {:>12} {:>12} {:>12} {:>12} {:>12} {:>10}",
            time,
            display(candle.open),
            display(candle.high),
            display(candle.low),
            display(candle.close),
            display(candle.volume),
            atr.map(|value| display(value.round_dp(4)))
                .unwrap_or_else(|| "-".to_string()),
        ));
    }

    lines.join("\n")
}

fn display(value: Decimal) -> String {
    value.normalize().to_string()
}

fn format_age(seconds: i64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3_600,
        (seconds % 3_600) / 60,
        seconds % 60
    )
}

fn state_label(state: ActiveOrderState) -> &'static str {
    match state {
        ActiveOrderState::Pending => "pending",
        ActiveOrderState::Live => "live",
        ActiveOrderState::Cancelling => "cancelling",
    }
}
