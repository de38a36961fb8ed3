//! # Customer Messages
//!
//! Every customer-facing string, composed from source templates passed
//! through a [`Localizer`].
//!
//! ## Requirements Message
//! ```text
//! unmet parts                          rendered
//! ───────────────────────────────      ────────────────────────────────────
//! []                                   "Franco Cartons thresholds have not
//!                                       been met."
//! [slots]                              "To qualify for Franco Cartons free
//!                                       shipping please add 0.50 more slots."
//! [slots, chf]                         "... please add 0.50 more slots and
//!                                       add CHF 150.00 more to your order."
//! ```
//!
//! Templates use `%s` / `%d` placeholders so translated catalogs keep the
//! same shape as the host's gettext strings.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::eligibility::EligibilityResult;
use crate::types::Thresholds;
use crate::validation::LotViolation;

pub const MSG_LOT_MULTIPLE: &str = "“%s” must be ordered in multiples of %d.";
pub const MSG_ADD_SLOTS: &str = "add %s more slots";
pub const MSG_ADD_CHF: &str = "add CHF %s more to your order";
pub const MSG_QUALIFY: &str = "To qualify for Franco Cartons free shipping please %s.";
pub const MSG_NOT_MET: &str = "Franco Cartons thresholds have not been met.";
pub const MSG_MISSING_THRESHOLDS: &str =
    "Franco Cartons thresholds are not configured. Set them in WooCommerce → Settings → Shipping.";
pub const MSG_AND: &str = " and ";
pub const MSG_ITEM_PLACEHOLDER: &str = "Item";

// =============================================================================
// Localizer
// =============================================================================

/// Maps a source string to the active locale.
pub trait Localizer {
    fn translate<'a>(&'a self, text: &'a str) -> Cow<'a, str>;
}

/// Identity localizer, used when the host offers no translation function.
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Localizer for Untranslated {
    fn translate<'a>(&'a self, text: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }
}

/// A loaded catalog: source string → translation. Missing keys fall back to
/// the source string.
impl Localizer for HashMap<String, String> {
    fn translate<'a>(&'a self, text: &'a str) -> Cow<'a, str> {
        match self.get(text) {
            Some(translated) => Cow::Borrowed(translated.as_str()),
            None => Cow::Borrowed(text),
        }
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Fills `%s` and `%d` placeholders left to right. Extra placeholders stay
/// as they are; extra arguments are ignored.
pub fn fill(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut args = args.iter();
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if tail.starts_with("%s") || tail.starts_with("%d") {
            match args.next() {
                Some(arg) => out.push_str(arg),
                None => out.push_str(&tail[..2]),
            }
            rest = &tail[2..];
        } else {
            out.push('%');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}

/// Fixed-point decimal with `.` and no grouping.
///
/// ## Example
/// ```rust
/// use franco_core::message::format_decimal;
///
/// assert_eq!(format_decimal(0.5, 2), "0.50");
/// assert_eq!(format_decimal(1234.567, 2), "1234.57");
/// assert_eq!(format_decimal(0.125, 2), "0.13");
/// ```
pub fn format_decimal(value: f64, precision: usize) -> String {
    // Halves round away from zero; `format!` alone rounds them to even.
    let scale = 10f64.powi(precision as i32);
    let rounded = (value * scale).round() / scale;
    let rounded = if rounded.is_finite() { rounded } else { value };
    format!("{:.*}", precision, rounded)
}

/// Joins parts as a sentence list: `a`, `a and b`, `a, b and c`.
pub fn join_parts(parts: &[String], l10n: &dyn Localizer) -> String {
    match parts {
        [] => String::new(),
        [only] => only.clone(),
        [head @ .., last] => format!("{}{}{}", head.join(", "), l10n.translate(MSG_AND), last),
    }
}

// =============================================================================
// Messages
// =============================================================================

/// `“Name” must be ordered in multiples of N.`
pub fn lot_violation_message(violation: &LotViolation, l10n: &dyn Localizer) -> String {
    let lot_size = violation.lot_size.to_string();
    fill(
        &l10n.translate(MSG_LOT_MULTIPLE),
        &[violation.name.as_str(), lot_size.as_str()],
    )
}

pub fn missing_thresholds_message(l10n: &dyn Localizer) -> String {
    l10n.translate(MSG_MISSING_THRESHOLDS).into_owned()
}

/// Placeholder name for lines the host gave no name for.
pub fn item_placeholder(l10n: &dyn Localizer) -> String {
    l10n.translate(MSG_ITEM_PLACEHOLDER).into_owned()
}

/// Tells the customer what is still missing for free shipping.
///
/// A part is listed for each configured threshold that is not met.
pub fn requirements_message(
    result: &EligibilityResult,
    thresholds: &Thresholds,
    l10n: &dyn Localizer,
) -> String {
    let mut parts = Vec::with_capacity(2);

    if thresholds.has_slot_threshold() && !result.slot_met {
        let remaining = format_decimal(result.remaining_slots, 2);
        parts.push(fill(&l10n.translate(MSG_ADD_SLOTS), &[remaining.as_str()]));
    }

    if thresholds.has_chf_threshold() && !result.chf_met {
        let remaining = result.remaining_chf.to_decimal_string();
        parts.push(fill(&l10n.translate(MSG_ADD_CHF), &[remaining.as_str()]));
    }

    if parts.is_empty() {
        return l10n.translate(MSG_NOT_MET).into_owned();
    }

    let joined = join_parts(&parts, l10n);
    fill(&l10n.translate(MSG_QUALIFY), &[joined.as_str()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn french() -> HashMap<String, String> {
        [
            (MSG_AND, " et "),
            (MSG_ADD_SLOTS, "ajoutez encore %s emplacements"),
            (MSG_ADD_CHF, "ajoutez encore CHF %s à votre commande"),
            (MSG_QUALIFY, "Pour bénéficier de la livraison Franco Cartons, veuillez %s."),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_fill() {
        assert_eq!(
            fill("“%s” must be ordered in multiples of %d.", &["Garlic", "2"]),
            "“Garlic” must be ordered in multiples of 2."
        );
        assert_eq!(fill("100% %s", &["sure"]), "100% sure");
        assert_eq!(fill("%s and %s", &["one"]), "one and %s");
    }

    #[test]
    fn test_format_decimal_rounds_halves_up() {
        assert_eq!(format_decimal(0.125, 2), "0.13");
        assert_eq!(format_decimal(0.375, 2), "0.38");
        assert_eq!(format_decimal(2.5, 0), "3");
        assert_eq!(format_decimal(0.5, 2), "0.50");
        assert_eq!(format_decimal(0.0, 2), "0.00");
    }

    #[test]
    fn test_join_parts() {
        let l10n = Untranslated;
        let parts = |raw: &[&str]| raw.iter().map(|p| p.to_string()).collect::<Vec<_>>();
        assert_eq!(join_parts(&parts(&[]), &l10n), "");
        assert_eq!(join_parts(&parts(&["a"]), &l10n), "a");
        assert_eq!(join_parts(&parts(&["a", "b"]), &l10n), "a and b");
        assert_eq!(join_parts(&parts(&["a", "b", "c"]), &l10n), "a, b and c");
    }

    #[test]
    fn test_lot_violation_message() {
        let violation = LotViolation {
            name: "Strict Lot Product".into(),
            quantity: 3,
            lot_size: 2,
        };
        assert_eq!(
            lot_violation_message(&violation, &Untranslated),
            "“Strict Lot Product” must be ordered in multiples of 2."
        );
    }

    #[test]
    fn test_requirements_message_both_parts() {
        let result = EligibilityResult {
            eligible: false,
            slot_met: false,
            chf_met: false,
            remaining_slots: 0.5,
            remaining_chf: Money::from_cents(15000),
        };
        let thresholds = Thresholds::clamped(1.5, Money::from_cents(40000));
        assert_eq!(
            requirements_message(&result, &thresholds, &Untranslated),
            "To qualify for Franco Cartons free shipping please add 0.50 more slots and add CHF 150.00 more to your order."
        );
    }

    #[test]
    fn test_requirements_message_only_unconfigured_parts_skipped() {
        let result = EligibilityResult {
            remaining_chf: Money::from_cents(3000),
            ..Default::default()
        };
        let thresholds = Thresholds::clamped(0.0, Money::from_cents(12000));
        assert_eq!(
            requirements_message(&result, &thresholds, &Untranslated),
            "To qualify for Franco Cartons free shipping please add CHF 30.00 more to your order."
        );
    }

    #[test]
    fn test_requirements_message_fallback() {
        // CHF-only cart with slot threshold met on paper: no part applies
        let result = EligibilityResult {
            eligible: false,
            slot_met: true,
            ..Default::default()
        };
        let thresholds = Thresholds::clamped(1.0, Money::zero());
        assert_eq!(requirements_message(&result, &thresholds, &Untranslated), MSG_NOT_MET);
    }

    #[test]
    fn test_requirements_message_localized() {
        let result = EligibilityResult {
            remaining_slots: 1.0,
            remaining_chf: Money::from_cents(5000),
            ..Default::default()
        };
        let thresholds = Thresholds::clamped(2.0, Money::from_cents(10000));
        assert_eq!(
            requirements_message(&result, &thresholds, &french()),
            "Pour bénéficier de la livraison Franco Cartons, veuillez ajoutez encore 1.00 emplacements et ajoutez encore CHF 50.00 à votre commande."
        );
    }

    #[test]
    fn test_missing_key_falls_back_to_source() {
        assert_eq!(missing_thresholds_message(&french()), MSG_MISSING_THRESHOLDS);
        assert_eq!(item_placeholder(&Untranslated), "Item");
    }
}
