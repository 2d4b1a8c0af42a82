use axum::Json;
use axum::extract::{Extension, State};
use gestorq_core::UserIdentity;
use tracing::debug;

use crate::dto::{
    MembershipOfferResponse, PremiumCheckRequest, PremiumCheckResponse, decision_label,
};
use crate::state::AppState;

pub async fn membership_offer_handler(
    State(state): State<AppState>,
) -> Json<MembershipOfferResponse> {
    Json(MembershipOfferResponse::from(
        state.membership_service.offer(),
    ))
}

/// Runs the premium gate from the dialog state the client reports.
pub async fn premium_check_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<PremiumCheckRequest>,
) -> Json<PremiumCheckResponse> {
    let mut gate = state.membership_service.premium_gate();
    gate.set_modal_open(payload.modal_open);

    let decision = gate.check_access();
    debug!(
        subject = user.subject(),
        decision = decision_label(decision),
        "premium gate checked"
    );

    let modal_open = gate.is_modal_open();
    Json(PremiumCheckResponse {
        decision: decision_label(decision).to_owned(),
        modal_open,
        offer: modal_open
            .then(|| MembershipOfferResponse::from(state.membership_service.offer())),
    })
}
