//! Application services and ports.

#![forbid(unsafe_code)]

mod membership_service;
mod role_directory_service;
mod role_mutation_service;
mod store_deadline;
mod user_directory_ports;
mod user_management_screen;

#[cfg(test)]
mod test_support;

pub use membership_service::{MembershipService, SharedAccessPolicy};
pub use role_directory_service::RoleDirectoryService;
pub use role_mutation_service::RoleMutationService;
pub use store_deadline::{DEFAULT_STORE_TIMEOUT, StoreDeadline};
pub use user_directory_ports::{
    CallerRoleResolver, CallerRoleState, Notice, NoticeLevel, NotificationSink,
    ProfileRepository, UserRoleRepository,
};
pub use user_management_screen::{ScreenPhase, UserManagementScreen, UserManagementSnapshot};
