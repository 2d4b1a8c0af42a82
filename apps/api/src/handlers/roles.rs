use axum::Json;

use crate::dto::RolePermissionMatrixResponse;

pub async fn role_permissions_handler() -> Json<RolePermissionMatrixResponse> {
    Json(RolePermissionMatrixResponse::for_all_roles())
}
