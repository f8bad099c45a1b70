use rust_decimal::Decimal;

use crate::execution::order_action::Side;
use crate::types::{inventory::Inventory, quote::Quote, quote_target::QuoteTarget};

pub trait BudgetChecker: Send + Sync {
    fn adjust_candidates(
        &self,
        target: QuoteTarget,
        inventory: Inventory,
        all_or_none: bool,
    ) -> QuoteTarget;
}

/// Checks bids against quote balance and asks against base balance.
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryBudgetChecker;

impl InventoryBudgetChecker {
    fn affordable_amount(quote: &Quote, inventory: Inventory) -> Decimal {
        let affordable = match quote.side {
            Side::Buy if quote.price.is_positive() => inventory.quote / quote.price.as_decimal(),
            Side::Buy => Decimal::ZERO,
            Side::Sell => inventory.base,
        };

        affordable.max(Decimal::ZERO).min(quote.amount)
    }

    fn adjust(quote: Option<Quote>, inventory: Inventory) -> Option<Quote> {
        let quote = quote?;
        let amount = Self::affordable_amount(&quote, inventory);

        (amount > Decimal::ZERO).then(|| quote.with_amount(amount))
    }
}

impl BudgetChecker for InventoryBudgetChecker {
    fn adjust_candidates(
        &self,
        target: QuoteTarget,
        inventory: Inventory,
        all_or_none: bool,
    ) -> QuoteTarget {
        if all_or_none {
            let fully_funded = target
                .quotes()
                .all(|quote| Self::affordable_amount(quote, inventory) >= quote.amount);

            return if fully_funded {
                target
            } else {
                QuoteTarget::default()
            };
        }

        QuoteTarget {
            bid: Self::adjust(target.bid, inventory),
            ask: Self::adjust(target.ask, inventory),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::price::Price;
    use rust_decimal_macros::dec;

    fn target() -> QuoteTarget {
        QuoteTarget::two_sided(
            Quote::new(Side::Buy, Price::new(dec!(2000)), dec!(0.5)),
            Quote::new(Side::Sell, Price::new(dec!(2002)), dec!(0.5)),
        )
    }

    #[test]
    fn funded_proposal_passes_unchanged() {
        let adjusted =
            InventoryBudgetChecker.adjust_candidates(target(), Inventory::new(dec!(1), dec!(1000)), true);
        assert_eq!(adjusted, target());
    }

    #[test]
    fn all_or_none_drops_whole_proposal() {
        let adjusted =
            InventoryBudgetChecker.adjust_candidates(target(), Inventory::new(dec!(0.2), dec!(1000)), true);
        assert!(adjusted.is_empty());
    }

    #[test]
    fn partial_mode_scales_each_side() {
        let adjusted =
            InventoryBudgetChecker.adjust_candidates(target(), Inventory::new(dec!(0.2), dec!(500)), false);

        assert_eq!(adjusted.bid.unwrap().amount, dec!(0.25));
        assert_eq!(adjusted.ask.unwrap().amount, dec!(0.2));
    }

    #[test]
    fn partial_mode_drops_unfunded_side() {
        let adjusted =
            InventoryBudgetChecker.adjust_candidates(target(), Inventory::new(dec!(0), dec!(1000)), false);

        assert!(adjusted.bid.is_some());
        assert!(adjusted.ask.is_none());
    }
}
