//! # franco-core: Pure Franco Cartons Rules
//!
//! Wholesaler free-shipping rules as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Franco Cartons Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Host platform (cart, settings, notices)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ hooks                                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    franco-host                                  │   │
//! │  │    adapter, enforcement, CartRules, ShippingAdjuster            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ franco-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────────┐ ┌───────┐ │   │
//! │  │   │  types  │ │  tags   │ │ analysis │ │eligibility │ │message│ │   │
//! │  │   │CartItem │ │ slugs   │ │ slots    │ │ decision   │ │ l10n  │ │   │
//! │  │   │Threshold│ │ rules   │ │ total    │ │ gaps       │ │ text  │ │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └────────────┘ └───────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO HOST CALLS • PURE FUNCTIONS                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `CartItem` descriptor, `LineFields`, `Thresholds`
//! - [`money`] - CHF amounts in integer centimes
//! - [`tags`] - Tag normalization and override rules
//! - [`analysis`] - Slot/total aggregates over a cart
//! - [`validation`] - Lot multiples and config value checks
//! - [`eligibility`] - Free-shipping decision
//! - [`message`] - Customer-facing text and the `Localizer` seam
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use franco_core::{determine_eligibility, CartAnalysis, CartItem, LineFields, Money, Thresholds};
//!
//! let items = vec![
//!     CartItem::describe(LineFields {
//!         name: "Lot 4 Half Slot Product".into(),
//!         quantity: 8,
//!         line_total: Money::from_cents(16000),
//!         tags: vec!["Lot4_Half_Slot".into()],
//!         ..Default::default()
//!     }),
//!     CartItem::describe(LineFields {
//!         name: "Black Garlic Kilo".into(),
//!         quantity: 3,
//!         line_total: Money::from_cents(9000),
//!         tags: vec!["black-garlic-kilo".into()],
//!         ..Default::default()
//!     }),
//! ];
//!
//! let analysis = CartAnalysis::from_items(items);
//! let thresholds = Thresholds::new(1.0, Money::from_cents(40000)).unwrap();
//! let result = determine_eligibility(&analysis, &thresholds);
//!
//! assert!(result.eligible);
//! ```

pub mod analysis;
pub mod eligibility;
pub mod error;
pub mod message;
pub mod money;
pub mod tags;
pub mod types;
pub mod validation;

pub use analysis::CartAnalysis;
pub use eligibility::{determine_eligibility, EligibilityResult};
pub use error::{CoreError, CoreResult, ValidationError};
pub use message::{Localizer, Untranslated};
pub use money::Money;
pub use types::*;
pub use validation::LotViolation;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Lot size when neither line nor product sets one.
pub const DEFAULT_LOT_SIZE: i64 = 1;

/// Slot factor when neither line nor product sets one.
pub const DEFAULT_SLOT_FACTOR: f64 = 1.0;
