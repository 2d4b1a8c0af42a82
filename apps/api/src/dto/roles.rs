use gestorq_domain::{AppRole, ROLE_PERMISSIONS_HEADING, RoleCapability};
use serde::Serialize;
use ts_rs::TS;

/// One line of a role's capability list.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/role-capability-response.ts"
)]
pub struct RoleCapabilityResponse {
    /// `full`, `read_only` or `denied`.
    pub level: String,
    pub description: String,
}

/// Capabilities of one application role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/role-permissions-response.ts"
)]
pub struct RolePermissionsResponse {
    pub role: String,
    pub label: String,
    pub capabilities: Vec<RoleCapabilityResponse>,
}

/// Permission matrix for every application role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/role-permission-matrix-response.ts"
)]
pub struct RolePermissionMatrixResponse {
    pub heading: String,
    pub roles: Vec<RolePermissionsResponse>,
}

impl From<&RoleCapability> for RoleCapabilityResponse {
    fn from(value: &RoleCapability) -> Self {
        Self {
            level: value.level.as_str().to_owned(),
            description: value.description.to_owned(),
        }
    }
}

impl From<AppRole> for RolePermissionsResponse {
    fn from(value: AppRole) -> Self {
        Self {
            role: value.as_str().to_owned(),
            label: value.display_label().to_owned(),
            capabilities: value
                .capabilities()
                .iter()
                .map(RoleCapabilityResponse::from)
                .collect(),
        }
    }
}

impl RolePermissionMatrixResponse {
    pub fn for_all_roles() -> Self {
        Self {
            heading: ROLE_PERMISSIONS_HEADING.to_owned(),
            roles: AppRole::all()
                .iter()
                .copied()
                .map(RolePermissionsResponse::from)
                .collect(),
        }
    }
}
