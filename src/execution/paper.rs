use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::{Mutex, watch};

use anyhow::Result;
use tracing::{debug, info};

use crate::{
    events::MarketEvent,
    execution::{
        DynamicInventorySource, ExecutionVenue, ReportSender,
        order_action::{Order, OrderAction, Side},
        order_report::OrderReport,
    },
    inventory::WatchInventory,
    types::{inventory::Inventory, price::Price},
};

/// In-process venue. Accepted orders rest at their limit price and fill in
/// full once the opposite side of the book trades through them.
#[derive(Debug)]
pub struct PaperExecutionVenue {
    on_report: Option<ReportSender>,
    book: Mutex<PaperBook>,
    inventory: watch::Sender<Inventory>,
}

#[derive(Debug, Default)]
struct PaperBook {
    resting: Vec<Order>,
    balances: Inventory,
    top_of_book: Option<(Price, Price)>,
}

impl PaperBook {
    fn reserved(&self) -> Inventory {
        self.resting
            .iter()
            .fold(Inventory::default(), |mut reserved, order| {
                match order.side {
                    Side::Buy => reserved.quote += order.price * order.amount,
                    Side::Sell => reserved.base += order.amount,
                }
                reserved
            })
    }

    fn rejection_reason(&self, order: &Order) -> Option<String> {
        if order.amount <= Decimal::ZERO {
            return Some(format!("invalid amount {}", order.amount));
        }

        if let Some((best_bid, best_ask)) = self.top_of_book {
            let crosses = match order.side {
                Side::Buy => order.price >= best_ask,
                Side::Sell => order.price <= best_bid,
            };
            if crosses {
                return Some("maker order would cross the book".to_string());
            }
        }

        let reserved = self.reserved();
        let (required, available, asset) = match order.side {
            Side::Buy => (
                order.price * order.amount,
                self.balances.quote - reserved.quote,
                order.instrument.quote(),
            ),
            Side::Sell => (
                order.amount,
                self.balances.base - reserved.base,
                order.instrument.base(),
            ),
        };

        (required > available)
            .then(|| format!("insufficient {asset} balance: required {required}, available {available}"))
    }

    fn take_crossed(&mut self, best_bid: Price, best_ask: Price) -> Vec<Order> {
        let (filled, resting): (Vec<Order>, Vec<Order>) =
            self.resting.drain(..).partition(|order| match order.side {
                Side::Buy => order.price >= best_ask,
                Side::Sell => order.price <= best_bid,
            });
        self.resting = resting;

        for order in &filled {
            let notional = order.price * order.amount;
            match order.side {
                Side::Buy => {
                    self.balances.base += order.amount;
                    self.balances.quote -= notional;
                }
                Side::Sell => {
                    self.balances.base -= order.amount;
                    self.balances.quote += notional;
                }
            }
        }

        filled
    }
}

impl PaperExecutionVenue {
    pub fn new(on_report: ReportSender, balances: Inventory) -> Self {
        let (inventory, _) = watch::channel(balances);

        Self {
            on_report: Some(on_report),
            book: Mutex::new(PaperBook {
                balances,
                ..Default::default()
            }),
            inventory,
        }
    }

    fn emit(&self, report: OrderReport) {
        if let Some(sender) = &self.on_report {
            debug!(?report);
            let _ = sender.send(report);
        };
    }

    #[cfg(test)]
    pub async fn resting_orders(&self) -> Vec<Order> {
        self.book.lock().await.resting.clone()
    }
}

#[async_trait]
impl ExecutionVenue for PaperExecutionVenue {
    fn inventory(&self) -> DynamicInventorySource {
        Box::new(WatchInventory::new(self.inventory.clone()))
    }

    async fn on_market_event(&self, event: &MarketEvent) -> Result<()> {
        let MarketEvent::TopOfBook {
            best_bid, best_ask, ..
        } = event
        else {
            return Ok(());
        };

        let (filled, balances) = {
            let mut book = self.book.lock().await;
            book.top_of_book = Some((*best_bid, *best_ask));
            let filled = book.take_crossed(*best_bid, *best_ask);
            (filled, book.balances)
        };

        if filled.is_empty() {
            return Ok(());
        }

        self.inventory.send_replace(balances);

        for order in filled {
            info!(order_id = %order.order_id, side = %order.side, price = %order.price, amount = %order.amount, "paper order filled");

            self.emit(OrderReport::Filled {
                order_id: order.order_id,
                instrument: order.instrument,
                side: order.side,
                price: order.price,
                amount: order.amount,
            });
        }

        Ok(())
    }

    async fn execute(&self, actions: &[OrderAction]) -> Result<()> {
        let mut book = self.book.lock().await;
        let mut reports = Vec::new();

        for action in actions {
            match action {
                OrderAction::CancelAll => {
                    let count = book.resting.len();
                    book.resting.clear();

                    reports.push(OrderReport::CancelledAll { count });
                }
                OrderAction::Cancel {
                    order_id,
                    instrument,
                    side,
                } => {
                    let before = book.resting.len();
                    book.resting.retain(|order| order.order_id != *order_id);

                    if book.resting.len() < before {
                        reports.push(OrderReport::Cancelled {
                            order_id: order_id.clone(),
                            instrument: instrument.clone(),
                            side: *side,
                        });
                    } else {
                        reports.push(OrderReport::CancelFailed {
                            order_id: order_id.clone(),
                            instrument: instrument.clone(),
                            side: *side,
                            reason: "unknown order".to_string(),
                        });
                    }
                }
                OrderAction::Place(place) => {
                    reports.push(OrderReport::Placed {
                        order_id: place.order_id.clone(),
                        instrument: place.instrument.clone(),
                        side: place.side,
                        price: place.price,
                        amount: place.amount,
                    });

                    match book.rejection_reason(place) {
                        Some(reason) => reports.push(OrderReport::Rejected {
                            order_id: place.order_id.clone(),
                            instrument: place.instrument.clone(),
                            side: place.side,
                            reason,
                        }),
                        None => {
                            book.resting.push(place.clone());
                            reports.push(OrderReport::Accepted {
                                order_id: place.order_id.clone(),
                                instrument: place.instrument.clone(),
                                side: place.side,
                                price: place.price,
                                amount: place.amount,
                            });
                        }
                    }
                }
            };
        }

        drop(book);

        for report in reports {
            self.emit(report);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::order_action::OrderType;
    use crate::types::instrument::Instrument;
    use rust_decimal_macros::dec;
    use tokio::sync::broadcast;

    fn instrument() -> Instrument {
        Instrument::new("ETH", "USDT")
    }

    fn order(order_id: &str, side: Side, price: Decimal, amount: Decimal) -> Order {
        Order {
            order_id: order_id.to_string(),
            instrument: instrument(),
            side,
            price: Price::new(price),
            amount,
            order_type: OrderType::MakerLimit,
        }
    }

    fn top_of_book(bid: Decimal, ask: Decimal) -> MarketEvent {
        MarketEvent::TopOfBook {
            instrument: instrument(),
            best_bid: Price::new(bid),
            best_ask: Price::new(ask),
            timestamp_ms: 0,
        }
    }

    fn drain(receiver: &mut broadcast::Receiver<OrderReport>) -> Vec<OrderReport> {
        let mut reports = Vec::new();
        while let Ok(report) = receiver.try_recv() {
            reports.push(report);
        }
        reports
    }

    fn venue() -> (PaperExecutionVenue, broadcast::Receiver<OrderReport>) {
        let (sender, receiver) = broadcast::channel(64);
        let venue = PaperExecutionVenue::new(sender, Inventory::new(dec!(1), dec!(5000)));
        (venue, receiver)
    }

    #[tokio::test]
    async fn accepts_affordable_orders() {
        let (venue, mut reports) = venue();

        venue
            .execute(&[OrderAction::Place(order("b-1", Side::Buy, dec!(1999), dec!(0.01)))])
            .await
            .unwrap();

        let reports = drain(&mut reports);
        assert!(matches!(reports[0], OrderReport::Placed { .. }));
        assert!(matches!(reports[1], OrderReport::Accepted { .. }));
        assert_eq!(venue.resting_orders().await.len(), 1);
    }

    #[tokio::test]
    async fn rejects_orders_beyond_available_balance() {
        let (venue, mut reports) = venue();

        venue
            .execute(&[
                OrderAction::Place(order("s-1", Side::Sell, dec!(2001), dec!(0.8))),
                OrderAction::Place(order("s-2", Side::Sell, dec!(2002), dec!(0.3))),
            ])
            .await
            .unwrap();

        let reports = drain(&mut reports);
        assert!(matches!(&reports[3], OrderReport::Rejected { order_id, .. } if order_id == "s-2"));
        assert_eq!(venue.resting_orders().await.len(), 1);
    }

    #[tokio::test]
    async fn rejects_orders_that_would_take_liquidity() {
        let (venue, mut reports) = venue();
        venue.on_market_event(&top_of_book(dec!(1999), dec!(2001))).await.unwrap();

        venue
            .execute(&[OrderAction::Place(order("b-1", Side::Buy, dec!(2001), dec!(0.01)))])
            .await
            .unwrap();

        let reports = drain(&mut reports);
        assert!(matches!(&reports[1], OrderReport::Rejected { reason, .. } if reason.contains("cross")));
    }

    #[tokio::test]
    async fn fills_when_book_trades_through() {
        let (venue, mut reports) = venue();
        let mut inventory = venue.inventory().subscribe();

        venue
            .execute(&[
                OrderAction::Place(order("b-1", Side::Buy, dec!(1999), dec!(0.01))),
                OrderAction::Place(order("s-1", Side::Sell, dec!(2001), dec!(0.01))),
            ])
            .await
            .unwrap();
        drain(&mut reports);

        venue.on_market_event(&top_of_book(dec!(1997), dec!(1998))).await.unwrap();

        let reports = drain(&mut reports);
        assert_eq!(reports.len(), 1);
        assert!(matches!(&reports[0], OrderReport::Filled { order_id, .. } if order_id == "b-1"));

        assert!(inventory.has_changed().unwrap());
        let balances = *inventory.borrow_and_update();
        assert_eq!(balances, Inventory::new(dec!(1.01), dec!(4980.01)));
        assert_eq!(venue.resting_orders().await.len(), 1);
    }

    #[tokio::test]
    async fn cancels_known_orders_and_reports_unknown_ones() {
        let (venue, mut reports) = venue();
        venue
            .execute(&[OrderAction::Place(order("b-1", Side::Buy, dec!(1999), dec!(0.01)))])
            .await
            .unwrap();
        drain(&mut reports);

        venue
            .execute(&[
                OrderAction::Cancel {
                    order_id: "b-1".to_string(),
                    instrument: instrument(),
                    side: Side::Buy,
                },
                OrderAction::Cancel {
                    order_id: "missing".to_string(),
                    instrument: instrument(),
                    side: Side::Buy,
                },
            ])
            .await
            .unwrap();

        let reports = drain(&mut reports);
        assert!(matches!(reports[0], OrderReport::Cancelled { .. }));
        assert!(matches!(reports[1], OrderReport::CancelFailed { .. }));
        assert!(venue.resting_orders().await.is_empty());
    }

    #[tokio::test]
    async fn cancel_all_reports_count() {
        let (venue, mut reports) = venue();
        venue
            .execute(&[
                OrderAction::Place(order("b-1", Side::Buy, dec!(1999), dec!(0.01))),
                OrderAction::Place(order("s-1", Side::Sell, dec!(2001), dec!(0.01))),
                OrderAction::CancelAll,
            ])
            .await
            .unwrap();

        let reports = drain(&mut reports);
        assert!(matches!(reports.last(), Some(OrderReport::CancelledAll { count: 2 })));
    }
}
