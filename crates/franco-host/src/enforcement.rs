//! # Enforcement Policy
//!
//! Decides whether the Franco Cartons rules apply to the current visitor.
//!
//! ```text
//! forced override set? ──yes──► forced value
//!        │ no
//!        ▼
//! actor resolver? ──no──► true ─────────────────┐
//!        │ yes                                  │
//!        ▼                                      ▼
//! authenticated? ──no──► false         should_enforce filter ──► result
//!        │ yes                                  ▲
//!        ▼                                      │
//! holds role ───────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::host::{ActorResolver, EnforcementFilter};

/// Role the rules are enforced for.
pub const WHOLESALER_ROLE: &str = "wholesaler";

/// Name of the host filter that may override the decision.
pub const SHOULD_ENFORCE_FILTER: &str = "wc_pro_franco_cartons_should_enforce";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcementPolicy {
    /// Testing override; wins over everything when set.
    pub forced: Option<bool>,

    /// Role that triggers enforcement.
    pub role: String,
}

impl Default for EnforcementPolicy {
    fn default() -> Self {
        EnforcementPolicy {
            forced: None,
            role: WHOLESALER_ROLE.to_string(),
        }
    }
}

impl EnforcementPolicy {
    pub fn with_role(role: impl Into<String>) -> Self {
        EnforcementPolicy {
            forced: None,
            role: role.into(),
        }
    }

    /// Sets or clears the forced value.
    pub fn force(&mut self, value: Option<bool>) {
        self.forced = value;
    }

    pub fn should_enforce(&self, actor: &dyn ActorResolver, filter: &dyn EnforcementFilter) -> bool {
        if let Some(forced) = self.forced {
            trace!(forced, "Enforcement forced");
            return forced;
        }

        let should = match actor.current_actor() {
            Some(actor) if !actor.authenticated => {
                trace!("Anonymous visitor, not enforced");
                return false;
            }
            Some(actor) => actor.has_role(&self.role),
            None => true,
        };

        filter.filter(should)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Absent, Actor};

    struct Invert;

    impl EnforcementFilter for Invert {
        fn filter(&self, should_enforce: bool) -> bool {
            !should_enforce
        }
    }

    #[test]
    fn test_no_resolver_defaults_on() {
        assert!(EnforcementPolicy::default().should_enforce(&Absent, &Absent));
    }

    #[test]
    fn test_anonymous_is_never_enforced() {
        let policy = EnforcementPolicy::default();
        assert!(!policy.should_enforce(&Actor::anonymous(), &Absent));
        // the filter is not consulted for anonymous visitors
        assert!(!policy.should_enforce(&Actor::anonymous(), &Invert));
    }

    #[test]
    fn test_role_decides_for_authenticated() {
        let policy = EnforcementPolicy::default();
        assert!(policy.should_enforce(&Actor::with_roles(["wholesaler"]), &Absent));
        assert!(!policy.should_enforce(&Actor::with_roles(["customer"]), &Absent));

        let custom = EnforcementPolicy::with_role("grossiste");
        assert!(custom.should_enforce(&Actor::with_roles(["grossiste"]), &Absent));
    }

    #[test]
    fn test_filter_can_flip() {
        let policy = EnforcementPolicy::default();
        assert!(!policy.should_enforce(&Actor::with_roles(["wholesaler"]), &Invert));
        assert!(policy.should_enforce(&Actor::with_roles(["customer"]), &Invert));
    }

    #[test]
    fn test_forced_wins() {
        let mut policy = EnforcementPolicy::default();
        policy.force(Some(true));
        assert!(policy.should_enforce(&Actor::anonymous(), &Invert));

        policy.force(Some(false));
        assert!(!policy.should_enforce(&Absent, &Absent));

        policy.force(None);
        assert!(policy.should_enforce(&Absent, &Absent));
    }
}
