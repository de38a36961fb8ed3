//! # Plugin
//!
//! Owns the host bundle, the enforcement policy and the per-request state,
//! and exposes one method per hook callback.
//!
//! ## Hook Table
//! ```text
//! hook                                   kind     callback                 prio  args
//! ────────────────────────────────────   ──────   ──────────────────────   ────  ────
//! woocommerce_shipping_settings          filter   register_settings_section  10    1
//! woocommerce_settings_save_shipping     action   save_settings              10    1
//! woocommerce_before_calculate_totals    action   capture_state              20    1
//! woocommerce_check_cart_items           action   validate_current_cart      10    1
//! woocommerce_package_rates              filter   inject_rate                20    2
//! ```

use franco_core::Thresholds;
use serde_json::Value;
use tracing::info;

use crate::enforcement::EnforcementPolicy;
use crate::host::{Host, HookCallback, HookKind, HookRegistration};
use crate::rules::{evaluate, Evaluation, EvaluationMode, RequestState};
use crate::settings::{self, read_thresholds, SettingsField};
use crate::shipping::{self, RateSet};

pub const HOOK_SHIPPING_SETTINGS: &str = "woocommerce_shipping_settings";
pub const HOOK_SAVE_SHIPPING: &str = "woocommerce_settings_save_shipping";
pub const HOOK_BEFORE_CALCULATE_TOTALS: &str = "woocommerce_before_calculate_totals";
pub const HOOK_CHECK_CART_ITEMS: &str = "woocommerce_check_cart_items";
pub const HOOK_PACKAGE_RATES: &str = "woocommerce_package_rates";

const DEFAULT_PRIORITY: i32 = 10;
const LATE_PRIORITY: i32 = 20;

/// The registrations `boot` makes, in order.
pub fn hook_registrations() -> Vec<HookRegistration> {
    let reg = |kind: HookKind, hook: &str, callback: HookCallback, priority: i32, accepted_args: u8| {
        HookRegistration {
            kind,
            hook: hook.to_string(),
            callback,
            priority,
            accepted_args,
        }
    };

    vec![
        reg(
            HookKind::Filter,
            HOOK_SHIPPING_SETTINGS,
            HookCallback::RegisterSettingsSection,
            DEFAULT_PRIORITY,
            1,
        ),
        reg(
            HookKind::Action,
            HOOK_SAVE_SHIPPING,
            HookCallback::SaveSettings,
            DEFAULT_PRIORITY,
            1,
        ),
        reg(
            HookKind::Action,
            HOOK_BEFORE_CALCULATE_TOTALS,
            HookCallback::CaptureState,
            LATE_PRIORITY,
            1,
        ),
        reg(
            HookKind::Action,
            HOOK_CHECK_CART_ITEMS,
            HookCallback::ValidateCurrentCart,
            DEFAULT_PRIORITY,
            1,
        ),
        reg(
            HookKind::Filter,
            HOOK_PACKAGE_RATES,
            HookCallback::InjectRate,
            LATE_PRIORITY,
            2,
        ),
    ]
}

#[derive(Debug)]
pub struct Plugin {
    host: Host,
    policy: EnforcementPolicy,
    state: RequestState,
}

impl Plugin {
    pub fn new(host: Host) -> Self {
        Plugin::with_policy(host, EnforcementPolicy::default())
    }

    pub fn with_policy(host: Host, policy: EnforcementPolicy) -> Self {
        Plugin {
            host,
            policy,
            state: RequestState::new(),
        }
    }

    /// Registers every hook. Does nothing when the commerce platform is
    /// not loaded. Returns whether registration happened.
    pub fn boot(&self) -> bool {
        if !self.host.commerce_loaded {
            info!("Commerce platform not loaded, Franco Cartons stays inactive");
            return false;
        }

        let registrations = hook_registrations();
        let count = registrations.len();
        for registration in registrations {
            self.host.hooks.register(registration);
        }
        info!(hooks = count, "Franco Cartons hooks registered");
        true
    }

    // =========================================================================
    // Enforcement
    // =========================================================================

    pub fn should_enforce(&self) -> bool {
        self.policy
            .should_enforce(self.host.actor.as_ref(), self.host.filter.as_ref())
    }

    /// Testing override; `None` restores the normal decision.
    pub fn force_enforcement(&mut self, value: Option<bool>) {
        self.policy.force(value);
    }

    // =========================================================================
    // Hook Callbacks
    // =========================================================================

    /// `woocommerce_before_calculate_totals`
    pub fn capture_state(&mut self, cart: &Value) -> Evaluation {
        self.run(cart, EvaluationMode::Capture)
    }

    /// `woocommerce_check_cart_items`. `None` when the host has no cart.
    pub fn validate_current_cart(&mut self) -> Option<Evaluation> {
        let cart = self.host.cart.current_cart()?;
        Some(self.run(&cart, EvaluationMode::Validate))
    }

    /// `woocommerce_package_rates`
    pub fn inject_rate(&self, rates: RateSet) -> RateSet {
        shipping::inject_rate(
            rates,
            self.should_enforce(),
            self.state.is_free_shipping_eligible(),
            &self.thresholds(),
            self.host.l10n.as_ref(),
        )
    }

    /// `woocommerce_shipping_settings`
    pub fn register_settings_section(&self, existing: Vec<SettingsField>) -> Vec<SettingsField> {
        settings::register_settings_section(existing, self.host.l10n.as_ref())
    }

    /// `woocommerce_settings_save_shipping`
    pub fn save_settings(&self) {
        settings::save_settings(self.host.saver.as_ref(), self.host.l10n.as_ref());
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn thresholds(&self) -> Thresholds {
        read_thresholds(self.host.settings.as_ref())
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Starts a fresh request.
    pub fn reset_request(&mut self) {
        self.state.reset();
    }

    fn run(&mut self, cart: &Value, mode: EvaluationMode) -> Evaluation {
        let enforced = self.should_enforce();
        evaluate(&self.host, enforced, cart, mode, &mut self.state)
    }
}
