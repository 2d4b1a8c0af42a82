use gestorq_application::{MembershipService, UserManagementScreen};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_management: UserManagementScreen,
    pub membership_service: MembershipService,
    pub auth_subject_header: String,
}
