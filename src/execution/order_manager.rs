use chrono::Utc;

use crate::{
    execution::{
        order_action::{Order, OrderAction},
        order_report::OrderReport,
        types::{ActiveOrder, ActiveOrderState},
    },
    types::{instrument::Instrument, quote_target::QuoteTarget},
};

/// Active orders as last reported by the venue, in placement order.
#[derive(Debug, Default)]
pub struct OrderManager {
    active: Vec<ActiveOrder>,
}

impl OrderManager {
    pub fn on_report(&mut self, report: &OrderReport) {
        match report {
            OrderReport::Placed {
                order_id,
                side,
                price,
                amount,
                ..
            } => {
                if self.position(order_id).is_none() {
                    self.active.push(ActiveOrder {
                        order_id: order_id.clone(),
                        side: *side,
                        price: *price,
                        amount: *amount,
                        state: ActiveOrderState::Pending,
                        created_at: Utc::now(),
                    });
                }
            }

            OrderReport::Accepted {
                order_id,
                side,
                price,
                amount,
                ..
            } => match self.position(order_id) {
                Some(index) => {
                    let order = &mut self.active[index];
                    if order.state == ActiveOrderState::Pending {
                        order.state = ActiveOrderState::Live;
                    }
                }
                None => self.active.push(ActiveOrder {
                    order_id: order_id.clone(),
                    side: *side,
                    price: *price,
                    amount: *amount,
                    state: ActiveOrderState::Live,
                    created_at: Utc::now(),
                }),
            },

            OrderReport::Rejected { order_id, .. }
            | OrderReport::Filled { order_id, .. }
            | OrderReport::Cancelled { order_id, .. } => {
                self.active.retain(|order| order.order_id != *order_id);
            }

            OrderReport::CancelFailed {
                order_id, reason, ..
            } => {
                if let Some(index) = self.position(order_id) {
                    tracing::warn!(order_id = %order_id, reason = %reason, "cancel failed, order still live");
                    self.active[index].state = ActiveOrderState::Live;
                }
            }

            OrderReport::CancelledAll { .. } => self.active.clear(),
        }
    }

    pub fn active_orders(&self) -> &[ActiveOrder] {
        &self.active
    }

    pub fn has_active_orders(&self) -> bool {
        !self.active.is_empty()
    }

    /// One cancel per order that is not already being cancelled. Orders are
    /// marked `Cancelling` until the venue confirms.
    pub fn cancel_all_actions(&mut self, instrument: &Instrument) -> Vec<OrderAction> {
        self.active
            .iter_mut()
            .filter(|order| order.state != ActiveOrderState::Cancelling)
            .map(|order| {
                order.state = ActiveOrderState::Cancelling;
                OrderAction::Cancel {
                    order_id: order.order_id.clone(),
                    instrument: instrument.clone(),
                    side: order.side,
                }
            })
            .collect()
    }

    pub fn actions_for_target(
        &self,
        instrument: &Instrument,
        target: &QuoteTarget,
    ) -> Vec<OrderAction> {
        target
            .quotes()
            .map(|quote| OrderAction::Place(Order::maker_from_quote(instrument, quote)))
            .collect()
    }

    fn position(&self, order_id: &str) -> Option<usize> {
        self.active
            .iter()
            .position(|order| order.order_id == order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::order_action::Side;
    use crate::types::{price::Price, quote::Quote};
    use rust_decimal_macros::dec;

    fn instrument() -> Instrument {
        Instrument::new("ETH", "USDT")
    }

    fn accepted(order_id: &str, side: Side) -> OrderReport {
        OrderReport::Accepted {
            order_id: order_id.to_string(),
            instrument: instrument(),
            side,
            price: Price::new(dec!(2000)),
            amount: dec!(0.01),
        }
    }

    #[test]
    fn tracks_orders_through_their_lifecycle() {
        let mut manager = OrderManager::default();
        manager.on_report(&OrderReport::Placed {
            order_id: "b-1".to_string(),
            instrument: instrument(),
            side: Side::Buy,
            price: Price::new(dec!(1999)),
            amount: dec!(0.01),
        });
        assert_eq!(manager.active_orders()[0].state, ActiveOrderState::Pending);

        manager.on_report(&accepted("b-1", Side::Buy));
        assert_eq!(manager.active_orders()[0].state, ActiveOrderState::Live);

        manager.on_report(&OrderReport::Filled {
            order_id: "b-1".to_string(),
            instrument: instrument(),
            side: Side::Buy,
            price: Price::new(dec!(1999)),
            amount: dec!(0.01),
        });
        assert!(!manager.has_active_orders());
    }

    #[test]
    fn cancel_all_marks_orders_and_skips_repeats() {
        let mut manager = OrderManager::default();
        manager.on_report(&accepted("b-1", Side::Buy));
        manager.on_report(&accepted("s-1", Side::Sell));

        let actions = manager.cancel_all_actions(&instrument());
        assert_eq!(actions.len(), 2);
        assert!(matches!(
            &actions[1],
            OrderAction::Cancel { order_id, side: Side::Sell, .. } if order_id == "s-1"
        ));
        assert!(
            manager
                .active_orders()
                .iter()
                .all(|order| order.state == ActiveOrderState::Cancelling)
        );

        assert!(manager.cancel_all_actions(&instrument()).is_empty());
    }

    #[test]
    fn failed_cancel_restores_live_order() {
        let mut manager = OrderManager::default();
        manager.on_report(&accepted("b-1", Side::Buy));
        manager.cancel_all_actions(&instrument());

        manager.on_report(&OrderReport::CancelFailed {
            order_id: "b-1".to_string(),
            instrument: instrument(),
            side: Side::Buy,
            reason: "timeout".to_string(),
        });

        assert_eq!(manager.active_orders()[0].state, ActiveOrderState::Live);
        assert_eq!(manager.cancel_all_actions(&instrument()).len(), 1);
    }

    #[test]
    fn cancelled_all_clears_everything() {
        let mut manager = OrderManager::default();
        manager.on_report(&accepted("b-1", Side::Buy));
        manager.on_report(&accepted("s-1", Side::Sell));
        manager.on_report(&OrderReport::CancelledAll { count: 2 });

        assert!(!manager.has_active_orders());
    }

    #[test]
    fn places_one_maker_order_per_quote() {
        let manager = OrderManager::default();
        let target = QuoteTarget::two_sided(
            Quote::new(Side::Buy, Price::new(dec!(1999.04)), dec!(0.01)),
            Quote::new(Side::Sell, Price::new(dec!(2000.96)), dec!(0.01)),
        );

        let actions = manager.actions_for_target(&instrument(), &target);
        assert_eq!(actions.len(), 2);

        let OrderAction::Place(bid) = &actions[0] else {
            panic!("expected place action");
        };
        assert_eq!(bid.side, Side::Buy);
        assert_eq!(bid.price, Price::new(dec!(1999.04)));
        assert!(bid.order_id.starts_with("b-"));

        let OrderAction::Place(ask) = &actions[1] else {
            panic!("expected place action");
        };
        assert_eq!(ask.side, Side::Sell);
        assert_ne!(ask.order_id, bid.order_id);
    }
}
