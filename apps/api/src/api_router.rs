use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use gestorq_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let cors_layer = cors::build_cors_layer(frontend_url)?;

    let caller_routes = Router::new()
        .route(
            "/api/premium/check",
            post(handlers::membership::premium_check_handler),
        )
        .route("/api/users", get(handlers::users::list_users_handler))
        .route(
            "/api/users/refresh",
            post(handlers::users::refresh_users_handler),
        )
        .route(
            "/api/users/{user_id}/role",
            put(handlers::users::assign_user_role_handler)
                .delete(handlers::users::remove_user_role_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_caller,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/api/membership",
            get(handlers::membership::membership_offer_handler),
        )
        .route(
            "/api/roles/permissions",
            get(handlers::roles::role_permissions_handler),
        )
        .merge(caller_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
