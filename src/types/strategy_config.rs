use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::candles::candle_interval::CandleInterval;
use crate::market::price_type::PriceType;
use crate::types::{instrument::Instrument, inventory::Inventory, spread_bounds::SpreadBounds};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategyConfig {
    pub trading_pair: Instrument,

    /// Execution venue identifier. Only `paper` is wired up.
    pub exchange: String,

    #[serde(default)]
    pub price_source: PriceType,

    /// Fixed base-asset amount of every quote.
    pub order_amount: Decimal,

    /// Seconds between cancel-and-requote cycles.
    pub order_refresh_time: u64,

    pub atr_window: usize,
    pub atr_multiplier: Decimal,

    /// Spread fractions, e.g. 0.0003 = 3 bps.
    pub min_spread: Decimal,
    pub max_spread: Decimal,

    pub candles: CandlesConfig,

    #[serde(default)]
    pub paper: PaperConfig,

    /// Seconds between status reports.
    #[serde(default = "default_status_interval")]
    pub status_interval: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CandlesConfig {
    pub connector: String,
    pub interval: CandleInterval,
    pub max_records: usize,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaperConfig {
    pub base_balance: Decimal,
    pub quote_balance: Decimal,
}

impl Default for PaperConfig {
    fn default() -> Self {
        Self {
            base_balance: dec!(1),
            quote_balance: dec!(5000),
        }
    }
}

impl PaperConfig {
    pub fn balances(&self) -> Inventory {
        Inventory::new(self.base_balance, self.quote_balance)
    }
}

fn default_status_interval() -> u64 {
    60
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            trading_pair: Instrument::new("ETH", "USDT"),
            exchange: "paper".to_string(),
            price_source: PriceType::MidPrice,
            order_amount: dec!(0.01),
            order_refresh_time: 15,
            atr_window: 30,
            atr_multiplier: dec!(1.2),
            min_spread: dec!(0.0003),
            max_spread: dec!(0.002),
            candles: CandlesConfig {
                connector: "kraken".to_string(),
                interval: CandleInterval::OneMinute,
                max_records: 1000,
            },
            paper: PaperConfig::default(),
            status_interval: default_status_interval(),
        }
    }
}

impl StrategyConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read strategy config {}", path.display()))?;

        Self::from_yaml_str(&raw)
            .with_context(|| format!("failed to load strategy config {}", path.display()))
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let config: StrategyConfig =
            serde_yaml::from_str(raw).context("failed to parse strategy config")?;

        config
            .validate()
            .context("strategy config validation failed")?;

        Ok(config)
    }

    pub fn spread_bounds(&self) -> Result<SpreadBounds> {
        SpreadBounds::new(self.min_spread, self.max_spread)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.order_refresh_time)
    }

    pub fn validate(&self) -> Result<()> {
        if self.exchange.trim().is_empty() {
            bail!("exchange must not be empty");
        }
        if self.order_amount <= Decimal::ZERO {
            bail!("order_amount must be > 0");
        }
        if self.order_refresh_time == 0 {
            bail!("order_refresh_time must be > 0");
        }
        if self.atr_window == 0 {
            bail!("atr_window must be > 0");
        }
        if self.atr_multiplier <= Decimal::ZERO {
            bail!("atr_multiplier must be > 0");
        }

        self.spread_bounds().context("invalid spread bounds")?;

        if self.candles.connector.trim().is_empty() {
            bail!("candles.connector must not be empty");
        }
        if self.candles.max_records <= self.atr_window {
            bail!(
                "candles.max_records ({}) must exceed atr_window ({})",
                self.candles.max_records,
                self.atr_window
            );
        }
        if self.paper.base_balance < Decimal::ZERO || self.paper.quote_balance < Decimal::ZERO {
            bail!("paper balances must be >= 0");
        }
        if self.status_interval == 0 {
            bail!("status_interval must be > 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
trading_pair: ETH-USDT
exchange: paper
price_source: mid_price
order_amount: "0.01"
order_refresh_time: 15
atr_window: 30
atr_multiplier: "1.2"
min_spread: "0.0003"
max_spread: "0.002"
candles:
  connector: kraken
  interval: 1m
  max_records: 1000
"#;

    #[test]
    fn parses_sample_config() {
        let config = StrategyConfig::from_yaml_str(SAMPLE).unwrap();

        assert_eq!(config.trading_pair, Instrument::new("ETH", "USDT"));
        assert_eq!(config.price_source, PriceType::MidPrice);
        assert_eq!(config.atr_multiplier, dec!(1.2));
        assert_eq!(config.candles.interval, CandleInterval::OneMinute);
        assert_eq!(config.refresh_interval(), Duration::from_secs(15));
        assert_eq!(config.status_interval, 60);
        assert_eq!(config.paper.balances(), Inventory::new(dec!(1), dec!(5000)));
    }

    #[test]
    fn default_config_is_valid() {
        StrategyConfig::default().validate().unwrap();
    }

    #[test]
    fn inverted_spread_bounds_fail_fast() {
        let raw = SAMPLE.replace("max_spread: \"0.002\"", "max_spread: \"0.0001\"");
        let error = StrategyConfig::from_yaml_str(&raw).unwrap_err();

        assert!(format!("{error:#}").contains("must not exceed"));
    }

    #[test]
    fn history_must_cover_atr_window() {
        let raw = SAMPLE.replace("max_records: 1000", "max_records: 30");
        let error = StrategyConfig::from_yaml_str(&raw).unwrap_err();

        assert!(format!("{error:#}").contains("must exceed atr_window"));
    }

    #[test]
    fn rejects_unknown_fields() {
        let raw = format!("{SAMPLE}\nunexpected: 1\n");
        assert!(StrategyConfig::from_yaml_str(&raw).is_err());
    }

    #[test]
    fn rejects_non_positive_amount() {
        let config = StrategyConfig {
            order_amount: Decimal::ZERO,
            ..StrategyConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
