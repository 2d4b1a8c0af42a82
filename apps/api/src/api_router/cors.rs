use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use gestorq_core::AppError;
use tower_http::cors::CorsLayer;

/// Browser requests from the front end may only send `Content-Type`; the
/// caller identity header is set by the upstream gateway, never by the page.
pub(super) fn build_cors_layer(frontend_url: &str) -> Result<CorsLayer, AppError> {
    Ok(CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]))
}
