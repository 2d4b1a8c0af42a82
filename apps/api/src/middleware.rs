use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use gestorq_core::{AppError, UserIdentity};

use crate::error::ApiResult;
use crate::state::AppState;

/// Reads the caller forwarded by the authentication gateway.
pub async fn require_caller(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = caller_from_headers(request.headers(), state.auth_subject_header.as_str())?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

fn caller_from_headers(
    headers: &axum::http::HeaderMap,
    subject_header: &str,
) -> Result<UserIdentity, AppError> {
    let subject = headers
        .get(subject_header)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;
    let email = headers
        .get("x-auth-email")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    Ok(UserIdentity::new(subject, email))
}
