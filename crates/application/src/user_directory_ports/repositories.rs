use async_trait::async_trait;

use gestorq_core::AppResult;
use gestorq_domain::{AppRole, ProfileRecord, RoleRecord, RoleRecordId, UserId};

/// Read port over the external `profiles` collection.
///
/// Read failures are reported as [`gestorq_core::AppError::Fetch`].
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Lists every profile row in store order.
    async fn list_profiles(&self) -> AppResult<Vec<ProfileRecord>>;
}

/// Read/write port over the external `user_roles` collection.
///
/// Read failures are reported as [`gestorq_core::AppError::Fetch`], rejected or
/// failed writes as [`gestorq_core::AppError::Persistence`] carrying the
/// store's message. Each write touches exactly one row.
#[async_trait]
pub trait UserRoleRepository: Send + Sync {
    /// Lists every role row in store order.
    async fn list_role_records(&self) -> AppResult<Vec<RoleRecord>>;

    /// Reads the role row currently stored for `user_id`, if any.
    async fn find_role_record(&self, user_id: UserId) -> AppResult<Option<RoleRecord>>;

    /// Inserts a role row for a user.
    async fn insert_role_record(&self, user_id: UserId, role: AppRole) -> AppResult<RoleRecord>;

    /// Changes the role stored in an existing row.
    async fn update_role_record(
        &self,
        role_record_id: RoleRecordId,
        role: AppRole,
    ) -> AppResult<RoleRecord>;

    /// Deletes a role row. Deleting an unknown row is a persistence error.
    async fn delete_role_record(&self, role_record_id: RoleRecordId) -> AppResult<()>;
}
