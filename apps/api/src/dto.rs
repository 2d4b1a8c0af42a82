mod common;
mod membership;
mod roles;
mod users;

pub use common::HealthResponse;
pub(crate) use membership::decision_label;
pub use membership::{MembershipOfferResponse, PremiumCheckRequest, PremiumCheckResponse};
pub use roles::RolePermissionMatrixResponse;
pub use users::{AssignUserRoleRequest, UserManagementResponse};
