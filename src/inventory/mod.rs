use tokio::sync::watch;

use crate::types::inventory::Inventory;

pub trait InventorySource: Send + Sync {
    /// Returns a receiver that always holds the latest inventory snapshot.
    fn subscribe(&self) -> watch::Receiver<Inventory>;
}

/// Inventory published by a venue through a `watch` channel.
#[derive(Debug, Clone)]
pub struct WatchInventory {
    tx: watch::Sender<Inventory>,
}

impl WatchInventory {
    pub fn new(tx: watch::Sender<Inventory>) -> Self {
        Self { tx }
    }
}

impl InventorySource for WatchInventory {
    fn subscribe(&self) -> watch::Receiver<Inventory> {
        self.tx.subscribe()
    }
}
