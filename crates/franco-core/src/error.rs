//! # Error Types
//!
//! Domain-specific error types for franco-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  franco-core errors (this file)                                        │
//! │  ├── CoreError        - Money parsing, wrapped validation failures      │
//! │  └── ValidationError  - Threshold / config value checks                │
//! │                                                                         │
//! │  franco-host errors (separate crate)                                   │
//! │  └── HostError        - Config file I/O, TOML, JSON                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → HostError → CLI exit              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lot-multiple violations are NOT errors. They are ordinary values
//! ([`crate::validation::LotViolation`]) that end up as customer notices.
//! Rule evaluation itself never fails.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core errors.
///
/// Only raised at the edges: parsing an amount typed by an admin, or
/// building [`crate::Thresholds`] from untrusted configuration.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An amount string could not be read as a CHF value.
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidAmount {
            input: "12,5x".to_string(),
            reason: "unexpected character".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid amount '12,5x': unexpected character");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Negative {
            field: "slot threshold".to_string(),
        };
        assert_eq!(err.to_string(), "slot threshold must not be negative");

        let err = ValidationError::Required {
            field: "role".to_string(),
        };
        assert_eq!(err.to_string(), "role is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::NotFinite {
            field: "chf threshold".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
