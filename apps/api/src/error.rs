use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gestorq_core::AppError;
use serde::Serialize;
use tracing::error;
use ts_rs::TS;

/// Error body returned for every failed request.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    message: String,
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Fetch(_) | AppError::Persistence(_) => StatusCode::BAD_GATEWAY,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "request failed");
        }

        // Store rejections carry text meant for the user; keep it unprefixed.
        let payload = Json(ErrorResponse {
            message: self.0.message().to_owned(),
        });

        (status, payload).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use gestorq_core::AppError;

    use super::ApiError;

    #[test]
    fn store_failures_map_to_gateway_statuses() {
        let cases = [
            (AppError::Fetch("down".to_owned()), StatusCode::BAD_GATEWAY),
            (
                AppError::Persistence("rls".to_owned()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::Timeout("slow".to_owned()),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (AppError::Conflict("busy".to_owned()), StatusCode::CONFLICT),
            (
                AppError::Forbidden("no".to_owned()),
                StatusCode::FORBIDDEN,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError(error).into_response().status(), status);
        }
    }
}
