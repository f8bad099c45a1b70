mod budget;
mod candles;
mod engine;
mod events;
mod execution;
mod inventory;
mod kraken;
mod market;
mod notify;
mod scheduling;
mod signals;
mod status;
mod strategy;
mod types;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;
use dotenvy::dotenv;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::candles::candle_history::CandleHistory;
use crate::engine::MarketMakerEngine;
use crate::events::MarketEvent;
use crate::execution::order_report::OrderReport;
use crate::execution::paper::PaperExecutionVenue;
use crate::kraken::kraken_candles::KrakenCandles;
use crate::kraken::kraken_market::KrakenMarket;
use crate::market::market_source::MarketDataSource;
use crate::notify::LogNotifier;
use crate::strategy::volatility_spread_maker::VolatilitySpreadMaker;
use crate::types::instrument::Instrument;
use crate::types::strategy_config::StrategyConfig;

const TICK_INTERVAL: Duration = Duration::from_secs(1);
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Parser)]
struct Args {
    /// Strategy config file (YAML).
    #[arg(long, default_value = "strategy.yml")]
    pub config: PathBuf,

    /// Overrides `trading_pair` from the config, e.g. `BTC-USD`.
    #[arg(long)]
    pub pair: Option<Instrument>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("vol_spread_maker=info".parse()?)
                .add_directive("notify=info".parse()?),
        )
        .with_target(false)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    let mut config = StrategyConfig::load(&args.config)?;
    if let Some(pair) = args.pair {
        config.trading_pair = pair;
    }

    if config.exchange != "paper" {
        bail!("unsupported exchange {:?}, only paper trading is available", config.exchange);
    }
    if config.candles.connector != "kraken" {
        bail!("unsupported candles connector {:?}", config.candles.connector);
    }

    info!(?config, "starting volatility spread maker");

    let instrument = config.trading_pair.clone();
    let interval = config.candles.interval;

    let (market_event_sender, mut market_event_receiver) = mpsc::channel::<MarketEvent>(10_000);
    let (order_report_sender, _) = broadcast::channel::<OrderReport>(10_000);
    let mut order_report_receiver = order_report_sender.subscribe();
    let mut order_report_log_receiver = order_report_sender.subscribe();

    tokio::spawn(async move {
        loop {
            match order_report_log_receiver.recv().await {
                Ok(report) => tracing::debug!(?report),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(lagged = n, "order report logger lagged; dropped messages");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    tokio::spawn({
        let instrument = instrument.clone();
        let kraken_source = KrakenMarket::default();
        async move {
            loop {
                if let Err(error) = kraken_source
                    .stream(&instrument, interval, market_event_sender.clone())
                    .await
                {
                    error!("KrakenMarket stopped with error: {error:?}");
                }

                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    });

    let venue = PaperExecutionVenue::new(order_report_sender.clone(), config.paper.balances());
    let strategy = VolatilitySpreadMaker::from_config(&config)?;
    let history_limit = config.candles.max_records;
    let status_interval = Duration::from_secs(config.status_interval);

    let mut engine = MarketMakerEngine::new(
        config,
        Box::new(strategy),
        Box::new(venue),
        Box::new(LogNotifier),
    );

    match KrakenCandles::default()
        .fetch(&instrument, interval, history_limit)
        .await
    {
        Ok(candles) => engine.backfill(candles),
        Err(error) => warn!("candle backfill failed, waiting for live bars: {error:?}"),
    }

    let mut tick = tokio::time::interval(TICK_INTERVAL);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut status_tick = tokio::time::interval_at(Instant::now() + status_interval, status_interval);
    status_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown requested");
                break;
            }

            now = tick.tick() => {
                if let Err(error) = engine.on_tick(now.into_std()).await {
                    error!("refresh cycle failed: {error:?}");
                }
            }

            _ = status_tick.tick() => {
                info!("\n{}", engine.status());
            }

            report = order_report_receiver.recv() => {
                match report {
                    Ok(report) => engine.on_report(&report),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!(lagged = n, "engine lagged on order reports; state may be stale until next report");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        error!("order report channel closed");
                        break;
                    }
                }
            }

            Some(event) = market_event_receiver.recv() => {
                tracing::trace!(?event);
                engine.on_market_event(&event).await;
            }
        }
    }

    engine.on_stop().await?;

    /* apply the cancel reports emitted during shutdown */
    while let Ok(report) = order_report_receiver.try_recv() {
        engine.on_report(&report);
    }
    info!(active = engine.order_manager().active_orders().len(), "stopped");

    Ok(())
}
