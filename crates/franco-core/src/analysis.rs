//! # Cart Analysis
//!
//! Aggregates over described cart items.
//!
//! ```text
//! items ──┬──► calculate_slots()     Σ (qty / lot) × factor, qty>0 ∧ lot>0
//!         ├──► calculate_total()     Σ line_total
//!         ├──► has_slot_items()      any factor > 0
//!         ├──► has_chf_items()       any requires_chf
//!         ├──► requires_chf_only()   chf items ∧ no slot items
//!         └──► validate_lots()       lot violations
//!                       │
//!                       ▼
//!                 CartAnalysis
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::message::{lot_violation_message, Localizer};
use crate::money::Money;
use crate::types::CartItem;
use crate::validation::{validate_lots, LotViolation};

/// Total slots over the items.
pub fn calculate_slots(items: &[CartItem]) -> f64 {
    items.iter().fold(0.0, |acc, item| acc + item.slots())
}

/// Sum of line totals.
pub fn calculate_total(items: &[CartItem]) -> Money {
    items.iter().map(|item| item.line_total).sum()
}

pub fn has_slot_items(items: &[CartItem]) -> bool {
    items.iter().any(CartItem::is_slot_item)
}

pub fn has_chf_items(items: &[CartItem]) -> bool {
    items.iter().any(|item| item.requires_chf)
}

/// At least one CHF item and no item with a positive slot factor.
pub fn requires_chf_only(items: &[CartItem]) -> bool {
    has_chf_items(items) && !has_slot_items(items)
}

/// Everything the eligibility decision and the notices need about a cart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartAnalysis {
    pub items: Vec<CartItem>,
    pub slots: f64,
    pub total: Money,
    pub has_slot_items: bool,
    pub has_chf_items: bool,
    pub requires_chf_only: bool,
    pub invalid_lots: Vec<LotViolation>,
}

impl CartAnalysis {
    /// Builds the analysis, taking ownership of the items.
    ///
    /// ## Example
    /// ```rust
    /// use franco_core::{CartAnalysis, CartItem, Money};
    ///
    /// let analysis = CartAnalysis::from_items(vec![
    ///     CartItem::new("Half Slot Lots", 8, Money::from_cents(16000))
    ///         .with_lot_size(4)
    ///         .with_slot_factor(0.5),
    ///     CartItem::new("Black Garlic", 3, Money::from_cents(9000))
    ///         .with_slot_factor(0.0)
    ///         .with_requires_chf(true),
    /// ]);
    /// assert_eq!(analysis.slots, 1.0);
    /// assert_eq!(analysis.total, Money::from_cents(25000));
    /// assert!(!analysis.requires_chf_only);
    /// ```
    pub fn from_items(items: Vec<CartItem>) -> Self {
        CartAnalysis {
            slots: calculate_slots(&items),
            total: calculate_total(&items),
            has_slot_items: has_slot_items(&items),
            has_chf_items: has_chf_items(&items),
            requires_chf_only: requires_chf_only(&items),
            invalid_lots: validate_lots(&items),
            items,
        }
    }

    /// Any lot violation present.
    #[inline]
    pub fn has_invalid_lots(&self) -> bool {
        !self.invalid_lots.is_empty()
    }

    /// Renders the lot violations as customer messages, in item order.
    pub fn lot_messages(&self, l10n: &dyn Localizer) -> Vec<String> {
        self.invalid_lots
            .iter()
            .map(|violation| lot_violation_message(violation, l10n))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Untranslated;
    use proptest::prelude::*;

    fn sample_items() -> Vec<CartItem> {
        vec![
            CartItem::new("Half Slot Lots", 8, Money::from_cents(16000))
                .with_lot_size(4)
                .with_slot_factor(0.5),
            CartItem::new("Black Garlic", 3, Money::from_cents(9000))
                .with_lot_size(1)
                .with_slot_factor(0.0)
                .with_requires_chf(true),
        ]
    }

    #[test]
    fn test_calculation_helpers() {
        let items = sample_items();
        assert_eq!(calculate_slots(&items), 1.0);
        assert_eq!(calculate_total(&items), Money::from_cents(25000));
        assert!(has_slot_items(&items));
        assert!(has_chf_items(&items));
        assert!(!requires_chf_only(&items));
    }

    #[test]
    fn test_chf_only_cart() {
        let items = vec![sample_items().remove(1)];
        assert!(requires_chf_only(&items));
        assert_eq!(calculate_slots(&items), 0.0);
    }

    #[test]
    fn test_empty_cart() {
        let analysis = CartAnalysis::from_items(Vec::new());
        assert_eq!(analysis.slots, 0.0);
        assert!(analysis.total.is_zero());
        assert!(!analysis.has_slot_items);
        assert!(!analysis.requires_chf_only);
        assert!(!analysis.has_invalid_lots());
    }

    #[test]
    fn test_from_items_collects_lot_messages() {
        let analysis = CartAnalysis::from_items(vec![
            CartItem::new("Strict Lot Product", 3, Money::zero()).with_lot_size(2),
            CartItem::new("Valid Lot Product", 4, Money::zero()).with_lot_size(2),
        ]);
        let messages = analysis.lot_messages(&Untranslated);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("multiples of 2"));
    }

    #[test]
    fn test_total_saturates_on_huge_lines() {
        let items = vec![
            CartItem::new("Huge A", 1, Money::from_cents(i64::MAX)),
            CartItem::new("Huge B", 1, Money::from_cents(i64::MAX)),
        ];
        assert_eq!(calculate_total(&items), Money::from_cents(i64::MAX));

        let analysis = CartAnalysis::from_items(items);
        assert!(analysis.total.is_positive());
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let first = CartAnalysis::from_items(sample_items());
        let second = CartAnalysis::from_items(sample_items());
        assert_eq!(first, second);
    }

    #[test]
    fn test_analysis_serializes_for_checkout() {
        let analysis = CartAnalysis::from_items(sample_items());
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["slots"], 1.0);
        assert_eq!(json["total"], 25000);
        assert_eq!(json["items"][0]["lot_size"], 4);
    }

    fn arb_item() -> impl Strategy<Value = CartItem> {
        (-5i64..50, -2i64..8, 0.0f64..3.0, 0i64..100_000, any::<bool>()).prop_map(
            |(quantity, lot_size, slot_factor, cents, requires_chf)| {
                CartItem::new("Item", quantity, Money::from_cents(cents))
                    .with_lot_size(lot_size)
                    .with_slot_factor(slot_factor)
                    .with_requires_chf(requires_chf)
            },
        )
    }

    proptest! {
        #[test]
        fn prop_slots_skip_non_positive(items in prop::collection::vec(arb_item(), 0..12)) {
            let mut expected = 0.0;
            for item in &items {
                if item.quantity > 0 && item.lot_size > 0 {
                    expected += (item.quantity as f64 / item.lot_size as f64) * item.slot_factor;
                }
            }
            prop_assert!((calculate_slots(&items) - expected).abs() < 1e-9);
        }

        #[test]
        fn prop_total_is_sum_of_line_totals(items in prop::collection::vec(arb_item(), 0..12)) {
            let expected: i64 = items.iter().map(|i| i.line_total.cents()).sum();
            prop_assert_eq!(calculate_total(&items).cents(), expected);
        }

        #[test]
        fn prop_chf_only_iff_chf_and_no_slots(items in prop::collection::vec(arb_item(), 0..12)) {
            let any_chf = items.iter().any(|i| i.requires_chf);
            let any_slot = items.iter().any(|i| i.slot_factor > 0.0);
            prop_assert_eq!(requires_chf_only(&items), any_chf && !any_slot);
        }
    }
}
