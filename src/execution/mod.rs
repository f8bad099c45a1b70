pub mod order_action;
pub mod order_manager;
pub mod order_report;
pub mod paper;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::events::MarketEvent;
use crate::execution::order_action::OrderAction;
use crate::execution::order_report::OrderReport;
use crate::inventory::InventorySource;

pub type ReportSender = broadcast::Sender<OrderReport>;

pub type DynamicInventorySource = Box<dyn InventorySource + Send + Sync>;

#[async_trait]
pub trait ExecutionVenue: Send + Sync {
    async fn execute(&self, actions: &[OrderAction]) -> Result<()>;

    fn inventory(&self) -> DynamicInventorySource;

    /// Venues that simulate matching use market data to fill resting orders.
    async fn on_market_event(&self, _event: &MarketEvent) -> Result<()> {
        Ok(())
    }
}
