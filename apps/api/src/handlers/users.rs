use axum::Json;
use axum::extract::{Extension, Path, State};
use gestorq_application::ScreenPhase;
use gestorq_core::{AppError, UserIdentity};
use gestorq_domain::{AppRole, UserId};

use crate::dto::{AssignUserRoleRequest, UserManagementResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<UserManagementResponse>> {
    require_admin(&state, &user).await?;
    state.user_management.ensure_loaded().await?;

    Ok(Json(current_snapshot(&state).await))
}

pub async fn refresh_users_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<UserManagementResponse>> {
    require_admin(&state, &user).await?;
    state.user_management.refresh().await?;

    Ok(Json(current_snapshot(&state).await))
}

pub async fn assign_user_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<String>,
    Json(payload): Json<AssignUserRoleRequest>,
) -> ApiResult<Json<UserManagementResponse>> {
    require_admin(&state, &user).await?;
    let user_id = user_id.parse::<UserId>()?;
    let role = AppRole::from_transport(payload.role.as_str())?;

    state.user_management.assign_role(user_id, role).await?;

    Ok(Json(current_snapshot(&state).await))
}

pub async fn remove_user_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserManagementResponse>> {
    require_admin(&state, &user).await?;
    let user_id = user_id.parse::<UserId>()?;

    state.user_management.remove_role(user_id).await?;

    Ok(Json(current_snapshot(&state).await))
}

/// Enforces the admin-only rule on the server as well as in the client.
async fn require_admin(state: &AppState, user: &UserIdentity) -> Result<(), AppError> {
    match state.user_management.resolve_access(user).await {
        ScreenPhase::Ready => Ok(()),
        ScreenPhase::Redirected { notice } => Err(AppError::Forbidden(notice.message)),
        ScreenPhase::Loading => Err(AppError::Forbidden(
            "caller role is not resolved yet".to_owned(),
        )),
    }
}

async fn current_snapshot(state: &AppState) -> UserManagementResponse {
    UserManagementResponse::from(state.user_management.snapshot().await)
}
