//! Premium feature gate and the membership dialog it controls.

use serde::{Deserialize, Serialize};

/// Outcome of an entitlement check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// The gated action may proceed.
    Granted,
    /// The gated action must not proceed.
    Denied,
}

impl AccessDecision {
    /// Returns whether the decision allows the gated action.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Entitlement policy consulted by [`PremiumGate::check_access`].
pub trait AccessPolicy: Send + Sync {
    /// Decides whether the caller holds premium access.
    fn evaluate(&self) -> AccessDecision;
}

impl<F> AccessPolicy for F
where
    F: Fn() -> AccessDecision + Send + Sync,
{
    fn evaluate(&self) -> AccessDecision {
        self()
    }
}

/// Policy used while no membership entitlement source exists: nobody is premium.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAllPolicy;

impl AccessPolicy for DenyAllPolicy {
    fn evaluate(&self) -> AccessDecision {
        AccessDecision::Denied
    }
}

/// Visibility of the membership dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    /// Dialog hidden.
    #[default]
    Closed,
    /// Dialog shown.
    Open,
}

/// Decides whether a gated action may proceed and opens the upsell dialog when not.
///
/// Callers short-circuit their own action on [`AccessDecision::Denied`]; the
/// dialog is guaranteed open right after a denial, and a grant leaves the
/// state untouched.
#[derive(Debug, Clone, Default)]
pub struct PremiumGate<P = DenyAllPolicy> {
    policy: P,
    state: GateState,
}

impl<P: AccessPolicy> PremiumGate<P> {
    /// Creates a closed gate backed by `policy`.
    #[must_use]
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            state: GateState::Closed,
        }
    }

    /// Returns the current dialog state.
    #[must_use]
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Returns whether the dialog is shown.
    #[must_use]
    pub fn is_modal_open(&self) -> bool {
        self.state == GateState::Open
    }

    /// Shows the dialog.
    pub fn open_modal(&mut self) {
        self.state = GateState::Open;
    }

    /// Hides the dialog.
    pub fn close_modal(&mut self) {
        self.state = GateState::Closed;
    }

    /// Applies a visibility change requested by the dialog itself.
    pub fn set_modal_open(&mut self, open: bool) {
        if open {
            self.open_modal();
        } else {
            self.close_modal();
        }
    }

    /// Consults the policy, opening the dialog on denial.
    pub fn check_access(&mut self) -> AccessDecision {
        let decision = self.policy.evaluate();
        if !decision.is_granted() {
            self.open_modal();
        }

        decision
    }
}
