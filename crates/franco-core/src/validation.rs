//! # Validation Module
//!
//! Lot-multiple checks on cart items, plus value checks for configuration.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Two Kinds of Validation                            │
//! │                                                                         │
//! │  Cart items (customer input)                                            │
//! │  ├── validate_lots() → Vec<LotViolation>                                │
//! │  └── Violations are VALUES, rendered as error notices. Never Err.       │
//! │                                                                         │
//! │  Configuration (admin input)                                            │
//! │  ├── validate_slot_threshold / validate_chf_threshold / validate_role   │
//! │  └── Return ValidationResult, surfaced when loading config              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::CartItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Lot Multiples
// =============================================================================

/// A line whose quantity is not a multiple of its lot size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LotViolation {
    pub name: String,
    pub quantity: i64,
    pub lot_size: i64,
}

/// Checks every item with a positive lot size and quantity for
/// `quantity % lot_size == 0`.
///
/// One violation per offending item, in item order, no deduplication.
///
/// ## Example
/// ```rust
/// use franco_core::{CartItem, Money};
/// use franco_core::validation::validate_lots;
///
/// let items = vec![
///     CartItem::new("Strict Lot Product", 3, Money::zero()).with_lot_size(2),
///     CartItem::new("Valid Lot Product", 4, Money::zero()).with_lot_size(2),
/// ];
/// let violations = validate_lots(&items);
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations[0].name, "Strict Lot Product");
/// ```
pub fn validate_lots(items: &[CartItem]) -> Vec<LotViolation> {
    items
        .iter()
        .filter(|item| item.lot_size > 0 && item.quantity > 0)
        .filter(|item| item.quantity % item.lot_size != 0)
        .map(|item| LotViolation {
            name: item.name.clone(),
            quantity: item.quantity,
            lot_size: item.lot_size,
        })
        .collect()
}

// =============================================================================
// Configuration Values
// =============================================================================

/// Slot threshold must be a finite number ≥ 0.
pub fn validate_slot_threshold(slots: f64) -> ValidationResult<()> {
    if !slots.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "slot threshold".to_string(),
        });
    }

    if slots < 0.0 {
        return Err(ValidationError::Negative {
            field: "slot threshold".to_string(),
        });
    }

    Ok(())
}

/// CHF threshold must be ≥ 0.
pub fn validate_chf_threshold(chf: Money) -> ValidationResult<()> {
    if chf.is_negative() {
        return Err(ValidationError::Negative {
            field: "chf threshold".to_string(),
        });
    }

    Ok(())
}

/// Enforced role must be a non-empty slug.
///
/// ## Example
/// ```rust
/// use franco_core::validation::validate_role;
///
/// assert!(validate_role("wholesaler").is_ok());
/// assert!(validate_role("  ").is_err());
/// assert!(validate_role("Whole Saler").is_err());
/// ```
pub fn validate_role(role: &str) -> ValidationResult<()> {
    let role = role.trim();

    if role.is_empty() {
        return Err(ValidationError::Required {
            field: "role".to_string(),
        });
    }

    if !role
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "role".to_string(),
            reason: "must contain only lowercase letters, digits, '_' and '-'".to_string(),
        });
    }

    Ok(())
}
