//! # franco-host: Franco Cartons Host Integration
//!
//! Connects the pure rules in `franco-core` to a commerce host through
//! capability traits.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          One Request                                    │
//! │                                                                         │
//! │  boot() ──► HookRegistry (5 registrations)                              │
//! │                                                                         │
//! │  before_calculate_totals(cart) ──► capture_state ──┐                    │
//! │  check_cart_items ──► validate_current_cart ───────┤                    │
//! │                                                    ▼                    │
//! │                  ┌─────────────────────────────────────────────┐        │
//! │                  │ rules::evaluate                             │        │
//! │                  │  enforcement ─► adapter ─► CartAnalysis     │        │
//! │                  │  thresholds ─► lot check ─► eligibility     │        │
//! │                  └──────────────────────┬──────────────────────┘        │
//! │                                         │ RequestState (eligible flag)  │
//! │                                         ▼                               │
//! │  package_rates(rates) ──► inject_rate ──► rates + free shipping        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`host`] - Capability traits, no-op defaults, the `Host` bundle
//! - [`adapter`] - Host cart JSON → `CartItem`
//! - [`enforcement`] - Who the rules apply to
//! - [`rules`] - Evaluation and per-request state
//! - [`shipping`] - Rate set and free-shipping injection
//! - [`settings`] - Threshold options and the admin settings section
//! - [`plugin`] - Hook wiring
//! - [`config`] - TOML/env configuration
//! - [`telemetry`] - Logging setup

pub mod adapter;
pub mod config;
pub mod enforcement;
pub mod error;
pub mod host;
pub mod notices;
pub mod plugin;
pub mod rules;
pub mod settings;
pub mod shipping;
pub mod telemetry;

pub use config::FrancoConfig;
pub use enforcement::EnforcementPolicy;
pub use error::{HostError, HostResult};
pub use host::{
    Actor, ActorResolver, CartSource, EnforcementFilter, Host, HookRegistry, NoticeSink,
    ProductCatalog, SettingsSaver, SettingsStore, StaticCart,
};
pub use notices::{Notice, NoticeKind};
pub use plugin::Plugin;
pub use rules::{Evaluation, EvaluationMode, Outcome, RequestState};
pub use shipping::{RateSet, ShippingRate, FREE_SHIPPING_RATE_ID};
