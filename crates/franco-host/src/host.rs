//! # Host Capabilities
//!
//! Everything the rules need from the host platform, one trait per concern.
//!
//! ## Capability Bundle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            Host                                         │
//! │                                                                         │
//! │  cart ──────────► CartSource        current cart payload (JSON)         │
//! │  catalog ───────► ProductCatalog    product tag slugs                   │
//! │  actor ─────────► ActorResolver     logged in? roles?                   │
//! │  filter ────────► EnforcementFilter should_enforce filter hook          │
//! │  settings ──────► SettingsStore     threshold options                   │
//! │  saver ─────────► SettingsSaver     admin settings save                 │
//! │  notices ───────► NoticeSink        customer notices                    │
//! │  hooks ─────────► HookRegistry      add_action / add_filter             │
//! │  l10n ──────────► Localizer         translations                        │
//! │                                                                         │
//! │  Host::default() wires a no-op for every slot. Integrations replace     │
//! │  only what their platform actually offers.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use franco_core::{Localizer, Untranslated};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::notices::Notice;
use crate::settings::SettingsField;

// =============================================================================
// Traits
// =============================================================================

/// Supplies the current cart, if the request has one.
pub trait CartSource {
    fn current_cart(&self) -> Option<Value>;
}

/// Product tag lookups (`product_tag` taxonomy).
pub trait ProductCatalog {
    /// Tag slugs attached to a product.
    fn tag_slugs(&self, product_id: i64) -> Option<Vec<String>>;

    /// Slug of a single tag term.
    fn tag_slug(&self, tag_id: i64) -> Option<String>;
}

/// The visitor the request runs for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Actor {
    pub authenticated: bool,
    pub roles: Vec<String>,
}

impl Actor {
    pub fn anonymous() -> Self {
        Actor::default()
    }

    pub fn with_roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Actor {
            authenticated: true,
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Resolves the current actor. `None` means the host has no notion of
/// users at all.
pub trait ActorResolver {
    fn current_actor(&self) -> Option<Actor>;
}

/// Host filter that may override the enforcement decision.
pub trait EnforcementFilter {
    fn filter(&self, should_enforce: bool) -> bool;
}

/// Read-only access to persisted options. `None` when the option is unset.
pub trait SettingsStore {
    fn option(&self, key: &str) -> Option<String>;
}

/// Persists the submitted values of a settings section.
pub trait SettingsSaver {
    fn save_fields(&self, fields: &[SettingsField]);
}

/// Displays a notice to the customer.
pub trait NoticeSink {
    fn add_notice(&self, notice: &Notice);
}

// =============================================================================
// Hook Registration
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookKind {
    Action,
    Filter,
}

/// Plugin entry point a hook is bound to. The host bridge dispatches on
/// this to the matching `Plugin` method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookCallback {
    CaptureState,
    ValidateCurrentCart,
    InjectRate,
    RegisterSettingsSection,
    SaveSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookRegistration {
    pub kind: HookKind,
    pub hook: String,
    pub callback: HookCallback,
    pub priority: i32,
    pub accepted_args: u8,
}

pub trait HookRegistry {
    fn register(&self, registration: HookRegistration);
}

// =============================================================================
// No-op Defaults
// =============================================================================

/// Used for every capability the host does not provide.
#[derive(Debug, Clone, Copy, Default)]
pub struct Absent;

impl CartSource for Absent {
    fn current_cart(&self) -> Option<Value> {
        None
    }
}

impl ProductCatalog for Absent {
    fn tag_slugs(&self, _product_id: i64) -> Option<Vec<String>> {
        None
    }

    fn tag_slug(&self, _tag_id: i64) -> Option<String> {
        None
    }
}

impl ActorResolver for Absent {
    fn current_actor(&self) -> Option<Actor> {
        None
    }
}

impl EnforcementFilter for Absent {
    fn filter(&self, should_enforce: bool) -> bool {
        should_enforce
    }
}

impl SettingsStore for Absent {
    fn option(&self, _key: &str) -> Option<String> {
        None
    }
}

impl SettingsSaver for Absent {
    fn save_fields(&self, _fields: &[SettingsField]) {}
}

impl NoticeSink for Absent {
    fn add_notice(&self, _notice: &Notice) {}
}

impl HookRegistry for Absent {
    fn register(&self, _registration: HookRegistration) {}
}

// =============================================================================
// Simple Implementations
// =============================================================================

/// A fixed cart payload, e.g. read from a file.
#[derive(Debug, Clone)]
pub struct StaticCart(pub Value);

impl CartSource for StaticCart {
    fn current_cart(&self) -> Option<Value> {
        Some(self.0.clone())
    }
}

/// A fixed actor.
impl ActorResolver for Actor {
    fn current_actor(&self) -> Option<Actor> {
        Some(self.clone())
    }
}

/// In-memory option table.
impl SettingsStore for HashMap<String, String> {
    fn option(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Keeps every notice; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordedNotices(Rc<RefCell<Vec<Notice>>>);

impl RecordedNotices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl NoticeSink for RecordedNotices {
    fn add_notice(&self, notice: &Notice) {
        self.0.borrow_mut().push(notice.clone());
    }
}

/// Keeps every hook registration; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordedHooks(Rc<RefCell<Vec<HookRegistration>>>);

impl RecordedHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registrations(&self) -> Vec<HookRegistration> {
        self.0.borrow().clone()
    }
}

impl HookRegistry for RecordedHooks {
    fn register(&self, registration: HookRegistration) {
        self.0.borrow_mut().push(registration);
    }
}

// =============================================================================
// Host
// =============================================================================

/// The capability bundle, chosen once at startup.
pub struct Host {
    pub cart: Box<dyn CartSource>,
    pub catalog: Box<dyn ProductCatalog>,
    pub actor: Box<dyn ActorResolver>,
    pub filter: Box<dyn EnforcementFilter>,
    pub settings: Box<dyn SettingsStore>,
    pub saver: Box<dyn SettingsSaver>,
    pub notices: Box<dyn NoticeSink>,
    pub hooks: Box<dyn HookRegistry>,
    pub l10n: Box<dyn Localizer>,

    /// Whether the commerce platform itself is loaded. Boot is skipped
    /// otherwise.
    pub commerce_loaded: bool,
}

impl Default for Host {
    fn default() -> Self {
        Host {
            cart: Box::new(Absent),
            catalog: Box::new(Absent),
            actor: Box::new(Absent),
            filter: Box::new(Absent),
            settings: Box::new(Absent),
            saver: Box::new(Absent),
            notices: Box::new(Absent),
            hooks: Box::new(Absent),
            l10n: Box::new(Untranslated),
            commerce_loaded: true,
        }
    }
}

impl Host {
    pub fn with_cart(mut self, cart: impl CartSource + 'static) -> Self {
        self.cart = Box::new(cart);
        self
    }

    pub fn with_catalog(mut self, catalog: impl ProductCatalog + 'static) -> Self {
        self.catalog = Box::new(catalog);
        self
    }

    pub fn with_actor(mut self, actor: impl ActorResolver + 'static) -> Self {
        self.actor = Box::new(actor);
        self
    }

    pub fn with_filter(mut self, filter: impl EnforcementFilter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    pub fn with_settings(mut self, settings: impl SettingsStore + 'static) -> Self {
        self.settings = Box::new(settings);
        self
    }

    pub fn with_saver(mut self, saver: impl SettingsSaver + 'static) -> Self {
        self.saver = Box::new(saver);
        self
    }

    pub fn with_notices(mut self, notices: impl NoticeSink + 'static) -> Self {
        self.notices = Box::new(notices);
        self
    }

    pub fn with_hooks(mut self, hooks: impl HookRegistry + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    pub fn with_localizer(mut self, l10n: impl Localizer + 'static) -> Self {
        self.l10n = Box::new(l10n);
        self
    }

    pub fn commerce_loaded(mut self, loaded: bool) -> Self {
        self.commerce_loaded = loaded;
        self
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("commerce_loaded", &self.commerce_loaded)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notices::NoticeKind;

    #[test]
    fn test_default_host_is_inert() {
        let host = Host::default();
        assert!(host.cart.current_cart().is_none());
        assert!(host.actor.current_actor().is_none());
        assert!(host.filter.filter(true));
        assert!(!host.filter.filter(false));
        assert!(host.settings.option("anything").is_none());
        assert_eq!(host.l10n.translate("Item"), "Item");
    }

    #[test]
    fn test_actor_roles() {
        let actor = Actor::with_roles(["customer", "wholesaler"]);
        assert!(actor.authenticated);
        assert!(actor.has_role("wholesaler"));
        assert!(!Actor::anonymous().has_role("wholesaler"));
    }

    #[test]
    fn test_recorded_notices_share_buffer() {
        let notices = RecordedNotices::new();
        let host = Host::default().with_notices(notices.clone());
        host.notices.add_notice(&Notice::new("hello", NoticeKind::Notice));
        assert_eq!(notices.notices().len(), 1);

        notices.clear();
        assert!(notices.notices().is_empty());
    }

    #[test]
    fn test_static_settings() {
        let mut options = HashMap::new();
        options.insert("key".to_string(), "12".to_string());
        let host = Host::default().with_settings(options);
        assert_eq!(host.settings.option("key").as_deref(), Some("12"));
    }
}
