//! # Cart Line Adapter
//!
//! Turns the host's loosely shaped cart JSON into [`CartItem`] descriptors.
//!
//! ## Accessor Chains
//! ```text
//! field         first match wins                                    default
//! ───────────   ─────────────────────────────────────────────────   ───────
//! quantity      quantity → qty → get_quantity                       0
//! line total    line_total → subtotal → total                       0.00
//! product       data → product
//! name          name → product.name                                 "Item"
//! tags          tags → catalog(product.id) → catalog(tag_ids)
//!               → product.tags                                      []
//! lot size      lot_size → meta _wc_fc_lot_size                     1
//! slot factor   slot_factor → meta _wc_fc_slot_factor               1.0
//! ```
//!
//! A value that is `null` or cannot be coerced counts as absent and the
//! chain moves on. Lines that are not JSON objects are skipped.

use franco_core::message::item_placeholder;
use franco_core::{CartItem, LineFields, Localizer, Money};
use serde_json::{Map, Value};
use tracing::trace;

use crate::host::ProductCatalog;

/// Product meta key holding an explicit lot size.
pub const META_LOT_SIZE: &str = "_wc_fc_lot_size";

/// Product meta key holding an explicit slot factor.
pub const META_SLOT_FACTOR: &str = "_wc_fc_slot_factor";

// =============================================================================
// Cart Payload
// =============================================================================

/// The lines of a cart payload, in payload order.
///
/// Accepts an array of lines, an object keyed by cart item key, or an
/// object wrapping either under `cart` or `items`.
pub fn cart_lines(payload: &Value) -> Vec<&Value> {
    match payload {
        Value::Array(lines) => lines.iter().collect(),
        Value::Object(map) => {
            let wrapped = map
                .get("cart")
                .or_else(|| map.get("items"))
                .filter(|inner| inner.is_array() || inner.is_object());
            match wrapped {
                Some(Value::Array(lines)) => lines.iter().collect(),
                Some(Value::Object(keyed)) => keyed.values().collect(),
                _ => map.values().collect(),
            }
        }
        _ => Vec::new(),
    }
}

/// Describes every object line of the payload.
pub fn describe_cart(
    payload: &Value,
    catalog: &dyn ProductCatalog,
    l10n: &dyn Localizer,
) -> Vec<CartItem> {
    cart_lines(payload)
        .into_iter()
        .filter_map(|line| describe_line(line, catalog, l10n))
        .collect()
}

/// Describes one line; `None` when the line is not an object.
pub fn describe_line(
    line: &Value,
    catalog: &dyn ProductCatalog,
    l10n: &dyn Localizer,
) -> Option<CartItem> {
    let Some(line) = line.as_object() else {
        trace!(line = %line, "Skipping non-object cart line");
        return None;
    };

    Some(CartItem::describe(line_fields(line, catalog, l10n)))
}

/// Pulls the raw fields off a line object without applying any rule.
pub fn line_fields(
    line: &Map<String, Value>,
    catalog: &dyn ProductCatalog,
    l10n: &dyn Localizer,
) -> LineFields {
    let product = product_of(line);

    let quantity = first_int(line, &["quantity", "qty", "get_quantity"]).unwrap_or(0);

    let line_total = first_float(line, &["line_total", "subtotal", "total"])
        .map(Money::from_decimal)
        .unwrap_or_default();

    let name = line
        .get("name")
        .and_then(as_string)
        .or_else(|| product.and_then(|p| p.get("name")).and_then(as_string))
        .unwrap_or_else(|| item_placeholder(l10n));

    let lot_size = line
        .get("lot_size")
        .and_then(as_int)
        .or_else(|| product.and_then(|p| meta(p, META_LOT_SIZE)).and_then(as_int));

    let slot_factor = line
        .get("slot_factor")
        .and_then(as_float)
        .or_else(|| product.and_then(|p| meta(p, META_SLOT_FACTOR)).and_then(as_float));

    LineFields {
        name,
        quantity,
        line_total,
        tags: tags_of(line, product, catalog),
        lot_size,
        slot_factor,
    }
}

// =============================================================================
// Product Lookups
// =============================================================================

fn product_of(line: &Map<String, Value>) -> Option<&Map<String, Value>> {
    line.get("data")
        .and_then(Value::as_object)
        .or_else(|| line.get("product").and_then(Value::as_object))
}

fn tags_of(
    line: &Map<String, Value>,
    product: Option<&Map<String, Value>>,
    catalog: &dyn ProductCatalog,
) -> Vec<String> {
    if let Some(Value::Array(tags)) = line.get("tags") {
        return tags.iter().filter_map(as_string).collect();
    }

    let Some(product) = product else {
        return Vec::new();
    };

    if let Some(id) = product.get("id").and_then(as_int) {
        if let Some(slugs) = catalog.tag_slugs(id) {
            return slugs;
        }

        if let Some(Value::Array(ids)) = product.get("tag_ids") {
            let slugs: Vec<String> = ids
                .iter()
                .filter_map(as_int)
                .filter_map(|tag_id| catalog.tag_slug(tag_id))
                .collect();
            if !slugs.is_empty() {
                return slugs;
            }
        }
    }

    match product.get("tags") {
        Some(Value::Array(tags)) => tags.iter().filter_map(as_string).collect(),
        _ => Vec::new(),
    }
}

/// Product meta lookup over either a `meta` object or a `meta_data` list of
/// `{key, value}` pairs. An empty string counts as unset.
fn meta<'a>(product: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    let found = product
        .get("meta")
        .and_then(Value::as_object)
        .and_then(|meta| meta.get(key))
        .or_else(|| {
            product
                .get("meta_data")
                .and_then(Value::as_array)?
                .iter()
                .find(|entry| entry.get("key").and_then(Value::as_str) == Some(key))
                .and_then(|entry| entry.get("value"))
        })?;

    match found {
        Value::String(s) if s.trim().is_empty() => None,
        Value::Null => None,
        value => Some(value),
    }
}

// =============================================================================
// Coercion
// =============================================================================

fn first_int(line: &Map<String, Value>, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|key| line.get(*key).and_then(as_int))
}

fn first_float(line: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| line.get(*key).and_then(as_float))
}

/// Integer from a number, numeric string or boolean. Fractions truncate.
pub fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Float from a number, numeric string or boolean.
pub fn as_float(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

/// Text from a string or number.
pub fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
