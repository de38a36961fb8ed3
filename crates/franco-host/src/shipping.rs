//! # Shipping Rates
//!
//! The host's package rate collection and the free-shipping rate the plugin
//! adds to it.
//!
//! ## Injection Gates
//! ```text
//! enforced? ──no──┐
//!    │ yes        │
//! eligible? ──no──┤
//!    │ yes        │
//! thresholds? ─no─┼──► rates unchanged
//!    │ yes        │
//! rate present? ──┘ yes
//!    │ no
//!    ▼
//! append { wc_pro_franco_cartons_free_shipping, "Franco Cartons Free Shipping", CHF 0.00 }
//! ```

use franco_core::{Localizer, Money, Thresholds};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;
use ts_rs::TS;

use crate::adapter::{as_float, as_string};
use crate::error::{HostError, HostResult};

/// Reserved rate id, also used as the method id.
pub const FREE_SHIPPING_RATE_ID: &str = "wc_pro_franco_cartons_free_shipping";

pub const FREE_SHIPPING_LABEL: &str = "Franco Cartons Free Shipping";

// =============================================================================
// Rate Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShippingRate {
    pub id: String,
    pub label: String,
    pub cost: Money,
    pub method_id: String,
}

impl ShippingRate {
    /// Zero-cost Franco Cartons rate.
    pub fn free_shipping(l10n: &dyn Localizer) -> Self {
        ShippingRate {
            id: FREE_SHIPPING_RATE_ID.to_string(),
            label: l10n.translate(FREE_SHIPPING_LABEL).into_owned(),
            cost: Money::zero(),
            method_id: FREE_SHIPPING_RATE_ID.to_string(),
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "label": self.label,
            "cost": self.cost.as_decimal(),
            "method_id": self.method_id,
        })
    }
}

/// Rates keyed by id, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSet {
    rates: Vec<ShippingRate>,
}

impl RateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rates.iter().any(|rate| rate.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&ShippingRate> {
        self.rates.iter().find(|rate| rate.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShippingRate> {
        self.rates.iter()
    }

    /// Adds a rate, replacing any existing rate with the same id in place.
    pub fn insert(&mut self, rate: ShippingRate) {
        match self.rates.iter_mut().find(|existing| existing.id == rate.id) {
            Some(existing) => *existing = rate,
            None => self.rates.push(rate),
        }
    }

    /// Reads the host's `{ id: { label, cost, method_id } }` map. A missing
    /// `id` field falls back to the map key and a missing method id to the
    /// rate id.
    pub fn from_json(value: &Value) -> HostResult<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| HostError::Usage("rates must be a JSON object keyed by rate id".into()))?;

        let mut set = RateSet::new();
        for (key, raw) in map {
            let id = raw.get("id").and_then(as_string).unwrap_or_else(|| key.clone());
            let method_id = raw
                .get("method_id")
                .and_then(as_string)
                .unwrap_or_else(|| id.clone());
            set.insert(ShippingRate {
                label: raw.get("label").and_then(as_string).unwrap_or_default(),
                cost: raw
                    .get("cost")
                    .and_then(as_float)
                    .map(Money::from_decimal)
                    .unwrap_or_default(),
                id,
                method_id,
            });
        }
        Ok(set)
    }

    /// Writes the host map shape back out.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .rates
            .iter()
            .map(|rate| (rate.id.clone(), rate.to_json()))
            .collect();
        Value::Object(map)
    }
}

// =============================================================================
// Injection
// =============================================================================

/// Adds the free-shipping rate when every gate passes; otherwise returns
/// the rates untouched.
pub fn inject_rate(
    mut rates: RateSet,
    enforced: bool,
    eligible: bool,
    thresholds: &Thresholds,
    l10n: &dyn Localizer,
) -> RateSet {
    if !enforced {
        debug!("Rate injection skipped: not enforced");
        return rates;
    }
    if !eligible {
        debug!("Rate injection skipped: cart not eligible");
        return rates;
    }
    if !thresholds.is_configured() {
        debug!("Rate injection skipped: no thresholds configured");
        return rates;
    }
    if rates.contains(FREE_SHIPPING_RATE_ID) {
        debug!("Rate injection skipped: free shipping rate already present");
        return rates;
    }

    rates.insert(ShippingRate::free_shipping(l10n));
    debug!(rates = rates.len(), "Franco Cartons free shipping rate added");
    rates
}

#[cfg(test)]
mod tests {
    use super::*;
    use franco_core::Untranslated;

    fn flat_rate() -> RateSet {
        RateSet::from_json(&json!({
            "flat_rate:1": { "label": "Flat rate", "cost": "12.50", "method_id": "flat_rate" }
        }))
        .unwrap()
    }

    fn configured() -> Thresholds {
        Thresholds::clamped(1.0, Money::zero())
    }

    #[test]
    fn test_from_json() {
        let rates = flat_rate();
        let rate = rates.get("flat_rate:1").unwrap();
        assert_eq!(rate.label, "Flat rate");
        assert_eq!(rate.cost, Money::from_cents(1250));
        assert_eq!(rate.method_id, "flat_rate");

        assert!(RateSet::from_json(&json!([])).is_err());
    }

    #[test]
    fn test_inject_appends_free_rate() {
        let rates = inject_rate(flat_rate(), true, true, &configured(), &Untranslated);
        assert_eq!(rates.len(), 2);

        let ids: Vec<&str> = rates.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["flat_rate:1", FREE_SHIPPING_RATE_ID]);

        let free = rates.get(FREE_SHIPPING_RATE_ID).unwrap();
        assert_eq!(free.label, FREE_SHIPPING_LABEL);
        assert!(free.cost.is_zero());
    }

    #[test]
    fn test_gates_leave_rates_untouched() {
        let base = flat_rate();
        assert_eq!(inject_rate(base.clone(), false, true, &configured(), &Untranslated), base);
        assert_eq!(inject_rate(base.clone(), true, false, &configured(), &Untranslated), base);
        assert_eq!(
            inject_rate(base.clone(), true, true, &Thresholds::none(), &Untranslated),
            base
        );
    }

    #[test]
    fn test_existing_free_rate_kept() {
        let mut rates = flat_rate();
        rates.insert(ShippingRate {
            id: FREE_SHIPPING_RATE_ID.to_string(),
            label: "Custom".to_string(),
            cost: Money::zero(),
            method_id: FREE_SHIPPING_RATE_ID.to_string(),
        });
        let out = inject_rate(rates.clone(), true, true, &configured(), &Untranslated);
        assert_eq!(out, rates);
        assert_eq!(out.get(FREE_SHIPPING_RATE_ID).unwrap().label, "Custom");
    }

    #[test]
    fn test_to_json_shape() {
        let rates = inject_rate(RateSet::new(), true, true, &configured(), &Untranslated);
        assert_eq!(
            rates.to_json(),
            json!({
                FREE_SHIPPING_RATE_ID: {
                    "id": FREE_SHIPPING_RATE_ID,
                    "label": FREE_SHIPPING_LABEL,
                    "cost": 0.0,
                    "method_id": FREE_SHIPPING_RATE_ID,
                }
            })
        );
    }
}
