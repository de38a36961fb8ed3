//! # Tag Rules
//!
//! Product tags that change how a line is counted.
//!
//! ## Override Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Group A (first match wins)                                             │
//! │    lot4_half_slot  ──► lot_size = 4, slot_factor = 0.5                  │
//! │    lot2_half_slot  ──► lot_size = 2, slot_factor = 0.5                  │
//! │                                                                         │
//! │  Group B (applies on top of A)                                          │
//! │    black-garlic-kilo | black-garlic-unit                                │
//! │                    ──► slot_factor = 0.0, requires_chf = true,          │
//! │                        lot_size = 1 if it was ≤ 0                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

/// Lots of 4, half a slot each.
pub const TAG_LOT4_HALF_SLOT: &str = "lot4_half_slot";

/// Lots of 2, half a slot each.
pub const TAG_LOT2_HALF_SLOT: &str = "lot2_half_slot";

/// CHF-only products.
pub const CHF_ONLY_TAGS: [&str; 2] = ["black-garlic-kilo", "black-garlic-unit"];

/// Normalizes a tag label to a slug.
///
/// Lowercases, turns every run of characters outside `[a-z0-9-]` into a
/// single `-`, and trims leading/trailing `-`.
///
/// ## Example
/// ```rust
/// use franco_core::tags::normalize_tag;
///
/// assert_eq!(normalize_tag("  Black Garlic / Kilo "), "black-garlic-kilo");
/// assert_eq!(normalize_tag("Lot4_Half_Slot"), "lot4-half-slot");
/// assert_eq!(normalize_tag("--"), "");
/// ```
pub fn normalize_tag(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_gap = false;

    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            out.push(c);
            in_gap = false;
        } else if !in_gap {
            out.push('-');
            in_gap = true;
        }
    }

    out.trim_matches('-').to_string()
}

/// Normalizes every tag, dropping the ones that end up empty.
pub fn normalize_tags<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter()
        .map(|t| normalize_tag(t.as_ref()))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Whether the normalized tag set carries `rule`.
///
/// Rule names such as `lot4_half_slot` contain `_`, which normalization
/// turns into `-`; both spellings match.
pub fn has_tag(tags: &[String], rule: &str) -> bool {
    let slug = normalize_tag(rule);
    tags.iter().any(|t| t == rule || *t == slug)
}

/// Result of the tag overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TagRules {
    pub lot_size: i64,
    pub slot_factor: f64,
    pub requires_chf: bool,
}

/// Applies the overrides to the starting values.
///
/// ## Example
/// ```rust
/// use franco_core::tags::apply_tag_rules;
///
/// let tags = vec!["lot2-half-slot".to_string(), "black-garlic-unit".to_string()];
/// let rules = apply_tag_rules(&tags, 1, 1.0, false);
/// assert_eq!(rules.lot_size, 2);
/// assert_eq!(rules.slot_factor, 0.0);
/// assert!(rules.requires_chf);
/// ```
pub fn apply_tag_rules(
    tags: &[String],
    lot_size: i64,
    slot_factor: f64,
    requires_chf: bool,
) -> TagRules {
    let mut rules = TagRules {
        lot_size,
        slot_factor,
        requires_chf,
    };

    if has_tag(tags, TAG_LOT4_HALF_SLOT) {
        rules.lot_size = 4;
        rules.slot_factor = 0.5;
    } else if has_tag(tags, TAG_LOT2_HALF_SLOT) {
        rules.lot_size = 2;
        rules.slot_factor = 0.5;
    }

    if CHF_ONLY_TAGS.iter().any(|rule| has_tag(tags, rule)) {
        rules.slot_factor = 0.0;
        rules.requires_chf = true;
        if rules.lot_size <= 0 {
            rules.lot_size = 1;
        }
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(raw: &[&str]) -> Vec<String> {
        normalize_tags(raw)
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("Lot4_Half_Slot"), "lot4-half-slot");
        assert_eq!(normalize_tag("LOT2-HALF-SLOT"), "lot2-half-slot");
        assert_eq!(normalize_tag("  Black   Garlic!! Unit "), "black-garlic-unit");
        assert_eq!(normalize_tag("-edge-"), "edge");
        assert_eq!(normalize_tag("Knoblauch Schwarz Ä"), "knoblauch-schwarz");
    }

    #[test]
    fn test_normalize_tags_drops_empty() {
        assert_eq!(tags(&["", "!!", "ok"]), vec!["ok".to_string()]);
    }

    #[test]
    fn test_has_tag_accepts_both_spellings() {
        assert!(has_tag(&["lot4_half_slot".to_string()], TAG_LOT4_HALF_SLOT));
        assert!(has_tag(&["lot4-half-slot".to_string()], TAG_LOT4_HALF_SLOT));
        assert!(!has_tag(&["lot4".to_string()], TAG_LOT4_HALF_SLOT));
    }

    #[test]
    fn test_lot4_beats_lot2() {
        let rules = apply_tag_rules(&tags(&["lot2_half_slot", "lot4_half_slot"]), 1, 1.0, false);
        assert_eq!(rules.lot_size, 4);
        assert_eq!(rules.slot_factor, 0.5);
    }

    #[test]
    fn test_chf_rule_stacks_on_lot_rule() {
        let rules = apply_tag_rules(&tags(&["lot4_half_slot", "black-garlic-kilo"]), 1, 1.0, false);
        assert_eq!(rules.lot_size, 4);
        assert_eq!(rules.slot_factor, 0.0);
        assert!(rules.requires_chf);
    }

    #[test]
    fn test_chf_rule_repairs_non_positive_lot() {
        let rules = apply_tag_rules(&tags(&["black-garlic-unit"]), 0, 1.0, false);
        assert_eq!(rules.lot_size, 1);

        let rules = apply_tag_rules(&tags(&["black-garlic-unit"]), 6, 1.0, false);
        assert_eq!(rules.lot_size, 6);
    }

    #[test]
    fn test_untagged_passes_through() {
        let rules = apply_tag_rules(&tags(&["organic"]), 3, 0.25, false);
        assert_eq!(
            rules,
            TagRules {
                lot_size: 3,
                slot_factor: 0.25,
                requires_chf: false
            }
        );
    }
}
