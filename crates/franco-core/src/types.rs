//! # Domain Types
//!
//! The item descriptor and the two configured thresholds.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   describe()   ┌─────────────────┐                 │
//! │  │   LineFields    │ ─────────────► │    CartItem     │                 │
//! │  │  ─────────────  │   tag rules    │  ─────────────  │                 │
//! │  │  name           │                │  name           │                 │
//! │  │  quantity       │                │  quantity       │                 │
//! │  │  line_total     │                │  line_total     │                 │
//! │  │  raw tags       │                │  tags (normal.) │                 │
//! │  │  lot_size?      │                │  lot_size       │                 │
//! │  │  slot_factor?   │                │  slot_factor    │                 │
//! │  └─────────────────┘                │  requires_chf   │                 │
//! │                                     └─────────────────┘                 │
//! │  ┌─────────────────┐                                                    │
//! │  │   Thresholds    │   0 means "not configured"                        │
//! │  │  slots (f64)    │                                                    │
//! │  │  chf (Money)    │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::tags::{apply_tag_rules, normalize_tags};
use crate::validation::{validate_chf_threshold, validate_slot_threshold};
use crate::{DEFAULT_LOT_SIZE, DEFAULT_SLOT_FACTOR};

// =============================================================================
// Line Fields
// =============================================================================

/// Values pulled off a host cart line, before any rule runs.
///
/// `lot_size` and `slot_factor` are `None` when neither the line nor the
/// product carried an explicit value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineFields {
    pub name: String,
    pub quantity: i64,
    pub line_total: Money,
    pub tags: Vec<String>,
    pub lot_size: Option<i64>,
    pub slot_factor: Option<f64>,
}

// =============================================================================
// Cart Item
// =============================================================================

/// A cart line as the rules see it. Immutable once described.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Display name used in lot messages.
    pub name: String,

    /// Ordered quantity. Host values ≤ 0 are kept and skipped by the rules.
    pub quantity: i64,

    /// Line total in centimes.
    pub line_total: Money,

    /// Normalized tag slugs.
    pub tags: Vec<String>,

    /// Required order multiple.
    pub lot_size: i64,

    /// Slots contributed per lot.
    pub slot_factor: f64,

    /// Governed only by the CHF threshold.
    pub requires_chf: bool,
}

impl CartItem {
    /// Creates an item with default lot size, slot factor and no tags.
    pub fn new(name: impl Into<String>, quantity: i64, line_total: Money) -> Self {
        CartItem {
            name: name.into(),
            quantity,
            line_total,
            tags: Vec::new(),
            lot_size: DEFAULT_LOT_SIZE,
            slot_factor: DEFAULT_SLOT_FACTOR,
            requires_chf: false,
        }
    }

    /// Derives the descriptor from raw line fields.
    ///
    /// Explicit lot size is clamped to at least 1 and slot factor to at
    /// least 0.0, then the tag overrides in [`crate::tags`] run.
    ///
    /// ## Example
    /// ```rust
    /// use franco_core::{CartItem, LineFields, Money};
    ///
    /// let item = CartItem::describe(LineFields {
    ///     name: "Half Slot Lots".into(),
    ///     quantity: 8,
    ///     line_total: Money::from_cents(16000),
    ///     tags: vec!["Lot4_Half_Slot".into()],
    ///     ..Default::default()
    /// });
    /// assert_eq!(item.lot_size, 4);
    /// assert_eq!(item.slot_factor, 0.5);
    /// ```
    pub fn describe(fields: LineFields) -> Self {
        let tags = normalize_tags(&fields.tags);

        let lot_size = fields.lot_size.map_or(DEFAULT_LOT_SIZE, |v| v.max(1));
        let slot_factor = fields
            .slot_factor
            .filter(|v| v.is_finite())
            .map_or(DEFAULT_SLOT_FACTOR, |v| v.max(0.0));

        let rules = apply_tag_rules(&tags, lot_size, slot_factor, false);

        CartItem {
            name: fields.name,
            quantity: fields.quantity,
            line_total: fields.line_total,
            tags,
            lot_size: rules.lot_size,
            slot_factor: rules.slot_factor,
            requires_chf: rules.requires_chf,
        }
    }

    /// Builder-style override of the lot size.
    pub fn with_lot_size(mut self, lot_size: i64) -> Self {
        self.lot_size = lot_size;
        self
    }

    /// Builder-style override of the slot factor.
    pub fn with_slot_factor(mut self, slot_factor: f64) -> Self {
        self.slot_factor = slot_factor;
        self
    }

    /// Builder-style override of the CHF flag.
    pub fn with_requires_chf(mut self, requires_chf: bool) -> Self {
        self.requires_chf = requires_chf;
        self
    }

    /// Slots this line contributes: `(quantity / lot_size) × slot_factor`,
    /// or 0 when quantity or lot size is not positive.
    pub fn slots(&self) -> f64 {
        if self.quantity <= 0 || self.lot_size <= 0 {
            return 0.0;
        }
        (self.quantity as f64 / self.lot_size as f64) * self.slot_factor
    }

    /// Whether the line counts towards the slot threshold at all.
    #[inline]
    pub fn is_slot_item(&self) -> bool {
        self.slot_factor > 0.0
    }
}

// =============================================================================
// Thresholds
// =============================================================================

/// Configured free-shipping thresholds. Zero means "not configured".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Thresholds {
    /// Slots required.
    pub slots: f64,

    /// CHF total required.
    pub chf: Money,
}

impl Thresholds {
    /// Builds validated thresholds; negative or non-finite slots and
    /// negative amounts are rejected.
    pub fn new(slots: f64, chf: Money) -> CoreResult<Self> {
        validate_slot_threshold(slots)?;
        validate_chf_threshold(chf)?;
        Ok(Thresholds { slots, chf })
    }

    /// Builds thresholds from host values, coercing anything invalid to 0.
    pub fn clamped(slots: f64, chf: Money) -> Self {
        let slots = if slots.is_finite() { slots.max(0.0) } else { 0.0 };
        let chf = if chf.is_negative() { Money::zero() } else { chf };
        Thresholds { slots, chf }
    }

    /// Neither threshold configured.
    #[inline]
    pub const fn none() -> Self {
        Thresholds {
            slots: 0.0,
            chf: Money::zero(),
        }
    }

    #[inline]
    pub fn has_slot_threshold(&self) -> bool {
        self.slots > 0.0
    }

    #[inline]
    pub fn has_chf_threshold(&self) -> bool {
        self.chf.is_positive()
    }

    /// At least one threshold is configured.
    #[inline]
    pub fn is_configured(&self) -> bool {
        self.has_slot_threshold() || self.has_chf_threshold()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, quantity: i64, tags: &[&str]) -> LineFields {
        LineFields {
            name: name.to_string(),
            quantity,
            line_total: Money::from_cents(1000),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_describe_defaults() {
        let item = CartItem::describe(fields("Plain", 3, &[]));
        assert_eq!(item.lot_size, 1);
        assert_eq!(item.slot_factor, 1.0);
        assert!(!item.requires_chf);
        assert!(item.tags.is_empty());
    }

    #[test]
    fn test_describe_lot4_case_insensitive() {
        let item = CartItem::describe(fields("Lot 4 Half Slot Product", 8, &["Lot4_Half_Slot"]));
        assert_eq!(item.lot_size, 4);
        assert_eq!(item.slot_factor, 0.5);
        assert!(!item.requires_chf);
    }

    #[test]
    fn test_describe_black_garlic() {
        let item = CartItem::describe(fields("Black Garlic Kilo", 3, &["black-garlic-kilo"]));
        assert_eq!(item.slot_factor, 0.0);
        assert!(item.requires_chf);
        assert_eq!(item.lot_size, 1);
    }

    #[test]
    fn test_describe_clamps_explicit_values() {
        let mut raw = fields("Odd", 2, &[]);
        raw.lot_size = Some(0);
        raw.slot_factor = Some(-3.0);
        let item = CartItem::describe(raw);
        assert_eq!(item.lot_size, 1);
        assert_eq!(item.slot_factor, 0.0);

        let mut raw = fields("Nan", 2, &[]);
        raw.slot_factor = Some(f64::NAN);
        assert_eq!(CartItem::describe(raw).slot_factor, 1.0);
    }

    #[test]
    fn test_tag_rules_override_explicit_meta() {
        let mut raw = fields("Meta Lot", 6, &["lot2_half_slot"]);
        raw.lot_size = Some(6);
        raw.slot_factor = Some(2.0);
        let item = CartItem::describe(raw);
        assert_eq!(item.lot_size, 2);
        assert_eq!(item.slot_factor, 0.5);
    }

    #[test]
    fn test_item_slots() {
        let item = CartItem::new("Half", 8, Money::zero())
            .with_lot_size(4)
            .with_slot_factor(0.5);
        assert_eq!(item.slots(), 1.0);

        assert_eq!(CartItem::new("Zero", 0, Money::zero()).slots(), 0.0);
        assert_eq!(CartItem::new("Neg", -2, Money::zero()).slots(), 0.0);
        assert_eq!(CartItem::new("NoLot", 2, Money::zero()).with_lot_size(0).slots(), 0.0);
    }

    #[test]
    fn test_thresholds_new_validates() {
        assert!(Thresholds::new(1.0, Money::from_cents(40000)).is_ok());
        assert!(Thresholds::new(-1.0, Money::zero()).is_err());
        assert!(Thresholds::new(f64::NAN, Money::zero()).is_err());
        assert!(Thresholds::new(0.0, Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_thresholds_clamped() {
        let t = Thresholds::clamped(-2.0, Money::from_cents(-100));
        assert_eq!(t, Thresholds::none());
        assert!(!t.is_configured());

        let t = Thresholds::clamped(1.5, Money::zero());
        assert!(t.has_slot_threshold());
        assert!(!t.has_chf_threshold());
        assert!(t.is_configured());
    }
}
