//! # Threshold Settings
//!
//! Reads the two threshold options and describes the admin settings section
//! added to the host's shipping settings page.
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ Franco Cartons thresholds          (title)    │
//! │ Configure the wholesaler slot and CHF ...     │
//! ├───────────────────────────────────────────────┤
//! │ Slot threshold   [      ]  step 0.01, min 0   │
//! │ CHF threshold    [      ]  step 0.01, min 0   │
//! └───────────────────────────────────────────────┘ (sectionend)
//! ```

use std::collections::BTreeMap;

use franco_core::{Localizer, Money, Thresholds};
use serde::{Deserialize, Serialize};

use crate::host::{SettingsSaver, SettingsStore};

pub const OPTION_SLOT_THRESHOLD: &str = "wc_pro_franco_cartons_slot_threshold";
pub const OPTION_CHF_THRESHOLD: &str = "wc_pro_franco_cartons_chf_threshold";

pub const SECTION_START_ID: &str = "wc_pro_franco_cartons_section_start";
pub const SECTION_END_ID: &str = "wc_pro_franco_cartons_section_end";

const TITLE_SECTION: &str = "Franco Cartons thresholds";
const DESC_SECTION: &str = "Configure the wholesaler slot and CHF requirements.";
const TITLE_SLOT: &str = "Slot threshold";
const TIP_SLOT: &str = "Number of Franco Cartons slots required for free shipping.";
const TITLE_CHF: &str = "CHF threshold";
const TIP_CHF: &str = "Minimum CHF total required for free shipping.";

// =============================================================================
// Reading
// =============================================================================

/// Reads an option as a non-negative number. Unset, empty and unparsable
/// values are 0.
pub fn read_threshold(store: &dyn SettingsStore, key: &str) -> f64 {
    store
        .option(key)
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .map_or(0.0, |value| value.max(0.0))
}

/// Both thresholds, read fresh from the store.
pub fn read_thresholds(store: &dyn SettingsStore) -> Thresholds {
    Thresholds::clamped(
        read_threshold(store, OPTION_SLOT_THRESHOLD),
        chf_threshold(read_threshold(store, OPTION_CHF_THRESHOLD)),
    )
}

/// Any positive amount stays configured, at least one centime.
fn chf_threshold(value: f64) -> Money {
    let money = Money::from_decimal(value);
    if value > 0.0 && !money.is_positive() {
        Money::from_cents(1)
    } else {
        money
    }
}

// =============================================================================
// Settings Section
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Title,
    Number,
    SectionEnd,
}

/// One entry of the host's settings field list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsField {
    pub id: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc_tip: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_attributes: BTreeMap<String, String>,
}

impl SettingsField {
    fn bare(id: &str, field_type: FieldType) -> Self {
        SettingsField {
            id: id.to_string(),
            field_type,
            title: None,
            desc: None,
            desc_tip: None,
            default: None,
            custom_attributes: BTreeMap::new(),
        }
    }

    fn threshold(id: &str, title: String, tip: String) -> Self {
        SettingsField {
            title: Some(title),
            desc_tip: Some(tip),
            default: Some(String::new()),
            custom_attributes: BTreeMap::from([
                ("step".to_string(), "0.01".to_string()),
                ("min".to_string(), "0".to_string()),
            ]),
            ..SettingsField::bare(id, FieldType::Number)
        }
    }
}

/// The Franco Cartons section, in display order.
pub fn section_fields(l10n: &dyn Localizer) -> Vec<SettingsField> {
    let t = |text: &str| l10n.translate(text).into_owned();

    vec![
        SettingsField {
            title: Some(t(TITLE_SECTION)),
            desc: Some(t(DESC_SECTION)),
            ..SettingsField::bare(SECTION_START_ID, FieldType::Title)
        },
        SettingsField::threshold(OPTION_SLOT_THRESHOLD, t(TITLE_SLOT), t(TIP_SLOT)),
        SettingsField::threshold(OPTION_CHF_THRESHOLD, t(TITLE_CHF), t(TIP_CHF)),
        SettingsField::bare(SECTION_END_ID, FieldType::SectionEnd),
    ]
}

/// Appends the section to the host's existing shipping settings.
pub fn register_settings_section(
    mut existing: Vec<SettingsField>,
    l10n: &dyn Localizer,
) -> Vec<SettingsField> {
    existing.extend(section_fields(l10n));
    existing
}

/// Hands the section to the host saver.
pub fn save_settings(saver: &dyn SettingsSaver, l10n: &dyn Localizer) {
    saver.save_fields(&section_fields(l10n));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Absent;
    use franco_core::Untranslated;
    use std::collections::HashMap;

    fn store(slot: &str, chf: &str) -> HashMap<String, String> {
        HashMap::from([
            (OPTION_SLOT_THRESHOLD.to_string(), slot.to_string()),
            (OPTION_CHF_THRESHOLD.to_string(), chf.to_string()),
        ])
    }

    #[test]
    fn test_read_thresholds() {
        let t = read_thresholds(&store("1.5", "400"));
        assert_eq!(t.slots, 1.5);
        assert_eq!(t.chf, Money::from_cents(40000));
    }

    #[test]
    fn test_read_thresholds_fallbacks() {
        assert_eq!(read_thresholds(&Absent), Thresholds::none());
        assert_eq!(read_thresholds(&store("", "abc")), Thresholds::none());
        assert_eq!(read_thresholds(&store("-3", " 12.5 ")).chf, Money::from_cents(1250));
        assert_eq!(read_thresholds(&store("-3", "0")).slots, 0.0);
    }

    #[test]
    fn test_sub_centime_chf_threshold_stays_configured() {
        let t = read_thresholds(&store("", "0.004"));
        assert_eq!(t.chf, Money::from_cents(1));
        assert!(t.is_configured());
        assert!(!read_thresholds(&store("", "0")).is_configured());
    }

    #[test]
    fn test_section_fields() {
        let fields = section_fields(&Untranslated);
        let ids: Vec<&str> = fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(
            ids,
            [SECTION_START_ID, OPTION_SLOT_THRESHOLD, OPTION_CHF_THRESHOLD, SECTION_END_ID]
        );
        assert_eq!(fields[1].custom_attributes["step"], "0.01");
        assert_eq!(fields[2].custom_attributes["min"], "0");
        assert_eq!(fields[3].field_type, FieldType::SectionEnd);
    }

    #[test]
    fn test_register_appends() {
        let existing = vec![SettingsField::bare("shipping_options", FieldType::Title)];
        let merged = register_settings_section(existing, &Untranslated);
        assert_eq!(merged.len(), 5);
        assert_eq!(merged[0].id, "shipping_options");
        assert_eq!(merged[1].title.as_deref(), Some("Franco Cartons thresholds"));
    }

    #[test]
    fn test_field_json_shape() {
        let json = serde_json::to_value(&section_fields(&Untranslated)[3]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": SECTION_END_ID, "type": "sectionend" })
        );
    }
}
