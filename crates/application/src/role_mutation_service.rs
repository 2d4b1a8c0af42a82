use std::sync::Arc;

use tracing::{info, warn};

use gestorq_core::AppResult;
use gestorq_domain::{AppRole, RoleRecord, RoleRecordId, UserId};

use crate::StoreDeadline;
use crate::user_directory_ports::UserRoleRepository;

/// Applies single-row writes to the external `user_roles` collection.
///
/// Writes for the same user are last-write-wins at the store; no client-side
/// locking happens here.
#[derive(Clone)]
pub struct RoleMutationService {
    role_repository: Arc<dyn UserRoleRepository>,
    deadline: StoreDeadline,
}

impl RoleMutationService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(role_repository: Arc<dyn UserRoleRepository>, deadline: StoreDeadline) -> Self {
        Self {
            role_repository,
            deadline,
        }
    }

    /// Gives `user_id` the `role`.
    ///
    /// The user's current row is read from the store, not from any cached
    /// directory. It is updated when present; a new row is inserted only when
    /// the store holds none.
    pub async fn assign_role(&self, user_id: UserId, role: AppRole) -> AppResult<RoleRecord> {
        let result = match self.current_role_record(user_id).await? {
            Some(existing) => {
                self.deadline
                    .run(
                        "update user role",
                        self.role_repository.update_role_record(existing.role_record_id, role),
                    )
                    .await
            }
            None => {
                self.deadline
                    .run(
                        "insert user role",
                        self.role_repository.insert_role_record(user_id, role),
                    )
                    .await
            }
        };

        match &result {
            Ok(record) => info!(
                user_id = %user_id,
                role_record_id = %record.role_record_id,
                role = role.as_str(),
                "assigned user role"
            ),
            Err(error) => warn!(
                user_id = %user_id,
                role = role.as_str(),
                error = %error,
                "failed to assign user role"
            ),
        }

        result
    }

    /// Reads the role row the store currently holds for `user_id`.
    pub async fn current_role_record(&self, user_id: UserId) -> AppResult<Option<RoleRecord>> {
        self.deadline
            .run("find user role", self.role_repository.find_role_record(user_id))
            .await
            .inspect_err(|error| {
                warn!(user_id = %user_id, error = %error, "failed to read user role");
            })
    }

    /// Deletes one role row. Profiles are never touched.
    pub async fn remove_role(&self, role_record_id: RoleRecordId) -> AppResult<()> {
        let result = self
            .deadline
            .run(
                "delete user role",
                self.role_repository.delete_role_record(role_record_id),
            )
            .await;

        match &result {
            Ok(()) => info!(role_record_id = %role_record_id, "removed user role"),
            Err(error) => warn!(
                role_record_id = %role_record_id,
                error = %error,
                "failed to remove user role"
            ),
        }

        result
    }
}

#[cfg(test)]
mod tests;
