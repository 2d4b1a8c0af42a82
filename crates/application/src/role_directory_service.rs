use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use gestorq_core::AppResult;
use gestorq_domain::RoleDirectory;

use crate::StoreDeadline;
use crate::user_directory_ports::{ProfileRepository, UserRoleRepository};

/// Loads profile and role rows and merges them into a [`RoleDirectory`].
#[derive(Clone)]
pub struct RoleDirectoryService {
    profile_repository: Arc<dyn ProfileRepository>,
    role_repository: Arc<dyn UserRoleRepository>,
    deadline: StoreDeadline,
}

impl RoleDirectoryService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        profile_repository: Arc<dyn ProfileRepository>,
        role_repository: Arc<dyn UserRoleRepository>,
        deadline: StoreDeadline,
    ) -> Self {
        Self {
            profile_repository,
            role_repository,
            deadline,
        }
    }

    /// Fetches both collections and builds a fresh directory.
    ///
    /// Orphan role rows are stamped with the time this call started.
    pub async fn fetch_directory(&self) -> AppResult<RoleDirectory> {
        let fetched_at = Utc::now();

        let profiles = self
            .deadline
            .run("list profiles", self.profile_repository.list_profiles())
            .await?;
        let roles = self
            .deadline
            .run("list user roles", self.role_repository.list_role_records())
            .await?;

        debug!(
            profiles = profiles.len(),
            roles = roles.len(),
            "fetched user directory rows"
        );

        Ok(RoleDirectory::build(profiles, roles, fetched_at))
    }
}
