use gestorq_domain::{
    AccessDecision, MEMBERSHIP_MODAL_DESCRIPTION, MEMBERSHIP_MODAL_TITLE,
    MEMBERSHIP_PAGE_HEADING, MEMBERSHIP_PAGE_SUBHEADING, MembershipBenefit, MembershipOffer,
    OutboundLink,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One benefit on the membership card.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/membership-benefit-response.ts"
)]
pub struct MembershipBenefitResponse {
    pub icon: String,
    pub title: String,
    pub description: String,
}

/// Outbound link with the attributes the anchor must carry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/outbound-link-response.ts"
)]
pub struct OutboundLinkResponse {
    pub url: String,
    pub target: String,
    pub rel: String,
}

/// Membership card, page and dialog copy.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/membership-offer-response.ts"
)]
pub struct MembershipOfferResponse {
    pub page_heading: String,
    pub page_subheading: String,
    pub modal_title: String,
    pub modal_description: String,
    pub badge: String,
    pub title: String,
    pub tagline: String,
    pub benefits: Vec<MembershipBenefitResponse>,
    pub call_to_action: String,
    pub payment_note: String,
    pub checkout: OutboundLinkResponse,
}

/// Incoming payload for a premium gate check.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/premium-check-request.ts"
)]
pub struct PremiumCheckRequest {
    /// Whether the dialog is currently shown on the client.
    #[serde(default)]
    pub modal_open: bool,
}

/// Outcome of a premium gate check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/premium-check-response.ts"
)]
pub struct PremiumCheckResponse {
    pub decision: String,
    pub modal_open: bool,
    /// Present when the dialog must be shown.
    pub offer: Option<MembershipOfferResponse>,
}

impl From<&MembershipBenefit> for MembershipBenefitResponse {
    fn from(value: &MembershipBenefit) -> Self {
        Self {
            icon: value.icon.to_owned(),
            title: value.title.to_owned(),
            description: value.description.to_owned(),
        }
    }
}

impl From<&OutboundLink> for OutboundLinkResponse {
    fn from(value: &OutboundLink) -> Self {
        Self {
            url: value.url().to_owned(),
            target: value.target().to_owned(),
            rel: value.rel().to_owned(),
        }
    }
}

impl From<&MembershipOffer> for MembershipOfferResponse {
    fn from(value: &MembershipOffer) -> Self {
        Self {
            page_heading: MEMBERSHIP_PAGE_HEADING.to_owned(),
            page_subheading: MEMBERSHIP_PAGE_SUBHEADING.to_owned(),
            modal_title: MEMBERSHIP_MODAL_TITLE.to_owned(),
            modal_description: MEMBERSHIP_MODAL_DESCRIPTION.to_owned(),
            badge: value.badge().to_owned(),
            title: value.title().to_owned(),
            tagline: value.tagline().to_owned(),
            benefits: value
                .benefits()
                .iter()
                .map(MembershipBenefitResponse::from)
                .collect(),
            call_to_action: value.call_to_action().to_owned(),
            payment_note: value.payment_note().to_owned(),
            checkout: OutboundLinkResponse::from(value.checkout_link()),
        }
    }
}

pub(crate) fn decision_label(decision: AccessDecision) -> &'static str {
    match decision {
        AccessDecision::Granted => "granted",
        AccessDecision::Denied => "denied",
    }
}
