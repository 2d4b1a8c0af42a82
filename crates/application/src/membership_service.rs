use std::fmt;
use std::sync::Arc;

use gestorq_core::AppResult;
use gestorq_domain::{AccessDecision, AccessPolicy, DenyAllPolicy, MembershipOffer, PremiumGate};

/// Entitlement policy shared by every gate the service hands out.
#[derive(Clone)]
pub struct SharedAccessPolicy(Arc<dyn AccessPolicy>);

impl SharedAccessPolicy {
    /// Wraps `policy` for sharing across gates.
    #[must_use]
    pub fn new(policy: Arc<dyn AccessPolicy>) -> Self {
        Self(policy)
    }
}

impl Default for SharedAccessPolicy {
    fn default() -> Self {
        Self(Arc::new(DenyAllPolicy))
    }
}

impl fmt::Debug for SharedAccessPolicy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("SharedAccessPolicy")
    }
}

impl AccessPolicy for SharedAccessPolicy {
    fn evaluate(&self) -> AccessDecision {
        self.0.evaluate()
    }
}

/// Serves the membership offer and premium gates.
#[derive(Clone, Debug)]
pub struct MembershipService {
    offer: MembershipOffer,
    policy: SharedAccessPolicy,
}

impl MembershipService {
    /// Creates a service whose offer links to `checkout_url`.
    pub fn new(checkout_url: &str, policy: SharedAccessPolicy) -> AppResult<Self> {
        Ok(Self {
            offer: MembershipOffer::new(checkout_url)?,
            policy,
        })
    }

    /// Returns the offer shown on the membership page and in the upsell dialog.
    #[must_use]
    pub fn offer(&self) -> &MembershipOffer {
        &self.offer
    }

    /// Returns a fresh, closed gate backed by the configured policy.
    #[must_use]
    pub fn premium_gate(&self) -> PremiumGate<SharedAccessPolicy> {
        PremiumGate::new(self.policy.clone())
    }
}
