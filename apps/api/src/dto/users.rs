use gestorq_application::UserManagementSnapshot;
use gestorq_domain::{
    ASSIGN_ROLE_PLACEHOLDER, EMPTY_DIRECTORY_MESSAGE, NO_ROLE_LABEL,
    REMOVE_ROLE_CONFIRMATION_DESCRIPTION, REMOVE_ROLE_CONFIRMATION_TITLE, ROLE_STAT_TITLES,
    RoleDirectoryStats, USER_MANAGEMENT_HEADING, USER_MANAGEMENT_SUBHEADING, USER_TABLE_COLUMNS,
    USER_TABLE_DESCRIPTION, USER_TABLE_TITLE, UserRoleView,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for a role assignment.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/assign-user-role-request.ts"
)]
pub struct AssignUserRoleRequest {
    /// `admin` or `staff`.
    pub role: String,
}

/// One row of the user-management table.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/user-role-response.ts"
)]
pub struct UserRoleResponse {
    pub user_id: String,
    pub short_id: String,
    pub display_name: Option<String>,
    pub display_label: String,
    pub role: Option<String>,
    pub role_label: String,
    pub role_record_id: Option<String>,
    pub registered_at: String,
    pub registered_on: String,
    pub busy: bool,
}

/// Role counts shown above the table.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/role-stats-response.ts"
)]
pub struct RoleStatsResponse {
    pub total: usize,
    pub admins: usize,
    pub staff: usize,
    pub pending: usize,
}

/// Copy of a confirmation dialog.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/confirmation-copy-response.ts"
)]
pub struct ConfirmationCopyResponse {
    pub title: String,
    pub description: String,
}

/// Titles of the role counters.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/role-stat-titles-response.ts"
)]
pub struct RoleStatTitlesResponse {
    pub admins: String,
    pub staff: String,
    pub pending: String,
}

/// Static text of the user-management screen.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/user-management-copy-response.ts"
)]
pub struct UserManagementCopyResponse {
    pub heading: String,
    pub subheading: String,
    pub stat_titles: RoleStatTitlesResponse,
    pub table_title: String,
    pub table_description: String,
    pub table_columns: Vec<String>,
    pub assign_role_placeholder: String,
    pub remove_confirmation: ConfirmationCopyResponse,
}

/// User-management screen state.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/user-management-response.ts"
)]
pub struct UserManagementResponse {
    pub is_loading: bool,
    pub users: Vec<UserRoleResponse>,
    pub stats: RoleStatsResponse,
    /// Present when loading finished without any rows.
    pub empty_message: Option<String>,
    pub copy: UserManagementCopyResponse,
}

impl UserRoleResponse {
    fn from_view(view: &UserRoleView, busy: bool) -> Self {
        Self {
            user_id: view.user_id().to_string(),
            short_id: view.user_id().short_label(),
            display_name: view.display_label().map(str::to_owned),
            display_label: view.display_label_or_placeholder().to_owned(),
            role: view.role().map(|role| role.as_str().to_owned()),
            role_label: view
                .role()
                .map_or(NO_ROLE_LABEL, |role| role.display_label())
                .to_owned(),
            role_record_id: view.role_record_id().map(|id| id.to_string()),
            registered_at: view.registered_at().to_rfc3339(),
            registered_on: view.registered_on_label(),
            busy,
        }
    }
}

impl UserManagementCopyResponse {
    fn current() -> Self {
        let [admins, staff, pending] = ROLE_STAT_TITLES.map(str::to_owned);

        Self {
            heading: USER_MANAGEMENT_HEADING.to_owned(),
            subheading: USER_MANAGEMENT_SUBHEADING.to_owned(),
            stat_titles: RoleStatTitlesResponse {
                admins,
                staff,
                pending,
            },
            table_title: USER_TABLE_TITLE.to_owned(),
            table_description: USER_TABLE_DESCRIPTION.to_owned(),
            table_columns: USER_TABLE_COLUMNS.map(str::to_owned).to_vec(),
            assign_role_placeholder: ASSIGN_ROLE_PLACEHOLDER.to_owned(),
            remove_confirmation: ConfirmationCopyResponse {
                title: REMOVE_ROLE_CONFIRMATION_TITLE.to_owned(),
                description: REMOVE_ROLE_CONFIRMATION_DESCRIPTION.to_owned(),
            },
        }
    }
}

impl From<RoleDirectoryStats> for RoleStatsResponse {
    fn from(value: RoleDirectoryStats) -> Self {
        Self {
            total: value.admins + value.staff + value.pending,
            admins: value.admins,
            staff: value.staff,
            pending: value.pending,
        }
    }
}

impl From<UserManagementSnapshot> for UserManagementResponse {
    fn from(value: UserManagementSnapshot) -> Self {
        let users: Vec<UserRoleResponse> = value
            .users
            .iter()
            .map(|view| {
                UserRoleResponse::from_view(view, value.busy_users.contains(&view.user_id()))
            })
            .collect();
        let empty_message =
            (!value.is_loading && users.is_empty()).then(|| EMPTY_DIRECTORY_MESSAGE.to_owned());

        Self {
            is_loading: value.is_loading,
            users,
            stats: RoleStatsResponse::from(value.stats),
            empty_message,
            copy: UserManagementCopyResponse::current(),
        }
    }
}
