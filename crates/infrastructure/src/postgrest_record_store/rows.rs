use chrono::{DateTime, Utc};
use gestorq_core::AppError;
use gestorq_domain::{AppRole, ProfileRecord, RoleRecord, RoleRecordId, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub(super) struct ProfileRow {
    pub(super) user_id: Uuid,
    pub(super) full_name: Option<String>,
    pub(super) created_at: DateTime<Utc>,
}

impl From<ProfileRow> for ProfileRecord {
    fn from(row: ProfileRow) -> Self {
        Self {
            user_id: UserId::from_uuid(row.user_id),
            // Blank names render the same as missing ones.
            display_name: row.full_name.filter(|name| !name.trim().is_empty()),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RoleRow {
    pub(super) id: Uuid,
    pub(super) user_id: Uuid,
    pub(super) role: String,
}

impl TryFrom<RoleRow> for RoleRecord {
    type Error = AppError;

    fn try_from(row: RoleRow) -> Result<Self, Self::Error> {
        let role = AppRole::from_transport(row.role.as_str()).map_err(|_| {
            AppError::Validation(format!(
                "role record '{}' holds unknown role '{}'",
                row.id, row.role
            ))
        })?;

        Ok(Self {
            role_record_id: RoleRecordId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            role,
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct NewRoleRow {
    user_id: Uuid,
    role: AppRole,
}

impl NewRoleRow {
    pub(super) fn new(user_id: UserId, role: AppRole) -> Self {
        Self {
            user_id: user_id.as_uuid(),
            role,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct RolePatch {
    pub(super) role: AppRole,
}
