//! # Cart Evaluation
//!
//! Runs on every cart change and decides the free-shipping flag for the
//! rest of the request.
//!
//! ## Evaluation Order
//! ```text
//! ┌──────────────────┐  no   ┌────────────────────────────────────────────┐
//! │ enforced?        │──────►│ NotEnforced: eligible = false              │
//! └────────┬─────────┘       └────────────────────────────────────────────┘
//!          │ yes  describe lines, analyze, store analysis
//!          ▼
//! ┌──────────────────┐  no   ┌────────────────────────────────────────────┐
//! │ thresholds set?  │──────►│ MissingThresholds: eligible = false        │
//! └────────┬─────────┘       │ validate → 1 notice                        │
//!          │ yes             └────────────────────────────────────────────┘
//!          ▼
//! ┌──────────────────┐  yes  ┌────────────────────────────────────────────┐
//! │ lot violations?  │──────►│ InvalidLots: eligible = false              │
//! └────────┬─────────┘       │ validate → 1 error per violation           │
//!          │ no              └────────────────────────────────────────────┘
//!          ▼
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │ Evaluated: eligible = decision; validate + not eligible → 1 notice   │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Capture mode runs the same steps without emitting notices.

use franco_core::message::{missing_thresholds_message, requirements_message};
use franco_core::{determine_eligibility, CartAnalysis, EligibilityResult, Thresholds};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use ts_rs::TS;

use crate::adapter::describe_cart;
use crate::host::Host;
use crate::notices::Notice;
use crate::settings::read_thresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EvaluationMode {
    /// Totals recalculation; state only.
    Capture,
    /// Cart check; state plus notices.
    Validate,
}

impl EvaluationMode {
    pub fn emits_notices(&self) -> bool {
        matches!(self, EvaluationMode::Validate)
    }
}

/// Where the evaluation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Outcome {
    NotEnforced,
    MissingThresholds,
    InvalidLots,
    Evaluated,
}

/// Everything one evaluation produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Evaluation {
    pub outcome: Outcome,
    pub mode: EvaluationMode,

    /// `None` when not enforced.
    pub analysis: Option<CartAnalysis>,

    /// Only set when the decision table actually ran.
    pub eligibility: Option<EligibilityResult>,

    pub thresholds: Thresholds,
    pub eligible: bool,
    pub notices: Vec<Notice>,
}

// =============================================================================
// Request State
// =============================================================================

/// Per-request memory shared between the cart hooks and the rate filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestState {
    free_shipping_eligible: bool,
    latest_analysis: Option<CartAnalysis>,
    notices: Vec<Notice>,
}

impl RequestState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_free_shipping_eligible(&self) -> bool {
        self.free_shipping_eligible
    }

    pub fn set_free_shipping_eligible(&mut self, eligible: bool) {
        self.free_shipping_eligible = eligible;
    }

    pub fn latest_analysis(&self) -> Option<&CartAnalysis> {
        self.latest_analysis.as_ref()
    }

    /// Notices emitted so far in this request.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn reset_notices(&mut self) {
        self.notices.clear();
    }

    pub fn reset(&mut self) {
        *self = RequestState::default();
    }
}

// =============================================================================
// Evaluation
// =============================================================================

struct Emitter<'a> {
    host: &'a Host,
    mode: EvaluationMode,
    state: &'a mut RequestState,
    emitted: Vec<Notice>,
}

impl Emitter<'_> {
    fn emit(&mut self, notice: Notice) {
        if !self.mode.emits_notices() {
            return;
        }
        self.host.notices.add_notice(&notice);
        self.state.notices.push(notice.clone());
        self.emitted.push(notice);
    }
}

/// Evaluates `cart` and records the result in `state`.
pub fn evaluate(
    host: &Host,
    enforced: bool,
    cart: &Value,
    mode: EvaluationMode,
    state: &mut RequestState,
) -> Evaluation {
    let thresholds = read_thresholds(host.settings.as_ref());

    if !enforced {
        state.set_free_shipping_eligible(false);
        debug!(?mode, "Franco Cartons not enforced for this visitor");
        return Evaluation {
            outcome: Outcome::NotEnforced,
            mode,
            analysis: None,
            eligibility: None,
            thresholds,
            eligible: false,
            notices: Vec::new(),
        };
    }

    let items = describe_cart(cart, host.catalog.as_ref(), host.l10n.as_ref());
    let analysis = CartAnalysis::from_items(items);
    state.latest_analysis = Some(analysis.clone());

    let mut out = Emitter {
        host,
        mode,
        state: &mut *state,
        emitted: Vec::new(),
    };

    let (outcome, eligibility) = if !thresholds.is_configured() {
        out.emit(Notice::notice(missing_thresholds_message(host.l10n.as_ref())));
        (Outcome::MissingThresholds, None)
    } else if analysis.has_invalid_lots() {
        for message in analysis.lot_messages(host.l10n.as_ref()) {
            out.emit(Notice::error(message));
        }
        (Outcome::InvalidLots, None)
    } else {
        let result = determine_eligibility(&analysis, &thresholds);
        if !result.eligible {
            out.emit(Notice::notice(requirements_message(
                &result,
                &thresholds,
                host.l10n.as_ref(),
            )));
        }
        (Outcome::Evaluated, Some(result))
    };

    let eligible = eligibility.map_or(false, |result| result.eligible);
    let notices = out.emitted;
    state.set_free_shipping_eligible(eligible);

    debug!(
        ?mode,
        ?outcome,
        eligible,
        slots = analysis.slots,
        total = %analysis.total,
        notices = notices.len(),
        "Franco Cartons cart evaluated"
    );

    Evaluation {
        outcome,
        mode,
        analysis: Some(analysis),
        eligibility,
        thresholds,
        eligible,
        notices,
    }
}
