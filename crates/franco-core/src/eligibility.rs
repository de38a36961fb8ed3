//! # Eligibility
//!
//! Decides whether a cart qualifies for Franco Cartons free shipping.
//!
//! ## Decision Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  slot_met = slot threshold > 0 ∧ slots ≥ slot threshold                 │
//! │  chf_met  = chf threshold  > 0 ∧ total ≥ chf threshold                  │
//! │                                                                         │
//! │  1. CHF-only cart                               → eligible = chf_met    │
//! │     (or CHF items, no slot items, slot thr > 0)                         │
//! │  2. both thresholds configured                  → slot_met ∨ chf_met    │
//! │  3. only slot threshold                         → slot_met              │
//! │  4. only chf threshold                          → chf_met               │
//! │  5. none                                        → false                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Row 1 means a cart of CHF-only products can never qualify through slots,
//! even with a slot threshold configured. Rows 2-4 do not apply to it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::analysis::CartAnalysis;
use crate::money::Money;
use crate::types::Thresholds;

/// Outcome of [`determine_eligibility`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EligibilityResult {
    pub eligible: bool,
    pub slot_met: bool,
    pub chf_met: bool,

    /// Slots still missing; 0 when met or not configured.
    pub remaining_slots: f64,

    /// CHF still missing; 0 when met or not configured.
    pub remaining_chf: Money,
}

/// Applies the decision table to an analysis.
///
/// ## Example
/// ```rust
/// use franco_core::{determine_eligibility, CartAnalysis, Money, Thresholds};
///
/// let analysis = CartAnalysis {
///     slots: 1.0,
///     total: Money::from_cents(25000),
///     has_slot_items: true,
///     has_chf_items: true,
///     ..Default::default()
/// };
/// let thresholds = Thresholds::new(1.0, Money::from_cents(40000)).unwrap();
///
/// let result = determine_eligibility(&analysis, &thresholds);
/// assert!(result.eligible);
/// assert!(result.slot_met);
/// assert!(!result.chf_met);
/// ```
pub fn determine_eligibility(analysis: &CartAnalysis, thresholds: &Thresholds) -> EligibilityResult {
    let has_slot_threshold = thresholds.has_slot_threshold();
    let has_chf_threshold = thresholds.has_chf_threshold();

    let slot_met = has_slot_threshold && analysis.slots >= thresholds.slots;
    let chf_met = has_chf_threshold && analysis.total >= thresholds.chf;

    let chf_governed = analysis.requires_chf_only
        || (analysis.has_chf_items && !analysis.has_slot_items && has_slot_threshold);

    let eligible = if chf_governed {
        chf_met
    } else if has_slot_threshold && has_chf_threshold {
        slot_met || chf_met
    } else if has_slot_threshold {
        slot_met
    } else if has_chf_threshold {
        chf_met
    } else {
        false
    };

    let remaining_slots = if has_slot_threshold {
        (thresholds.slots - analysis.slots).max(0.0)
    } else {
        0.0
    };

    let remaining_chf = if has_chf_threshold {
        analysis.total.shortfall_to(thresholds.chf)
    } else {
        Money::zero()
    };

    EligibilityResult {
        eligible,
        slot_met,
        chf_met,
        remaining_slots,
        remaining_chf,
    }
}
