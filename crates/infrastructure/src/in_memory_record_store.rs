use async_trait::async_trait;
use gestorq_application::{CallerRoleResolver, ProfileRepository, UserRoleRepository};
use gestorq_core::{AppError, AppResult, UserIdentity};
use gestorq_domain::{AppRole, ProfileRecord, RoleRecord, RoleRecordId, UserId};
use tokio::sync::RwLock;

/// In-memory record store holding `profiles` and `user_roles` rows.
///
/// Rows keep insertion order, matching what a listing from the hosted store
/// returns.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    profiles: RwLock<Vec<ProfileRecord>>,
    roles: RwLock<Vec<RoleRecord>>,
}

impl InMemoryRecordStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with rows.
    #[must_use]
    pub fn seeded(profiles: Vec<ProfileRecord>, roles: Vec<RoleRecord>) -> Self {
        Self {
            profiles: RwLock::new(profiles),
            roles: RwLock::new(roles),
        }
    }

    /// Appends a profile row. Profiles are created by sign-up, outside this system.
    pub async fn insert_profile(&self, profile: ProfileRecord) {
        self.profiles.write().await.push(profile);
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRecordStore {
    async fn list_profiles(&self) -> AppResult<Vec<ProfileRecord>> {
        Ok(self.profiles.read().await.clone())
    }
}

#[async_trait]
impl UserRoleRepository for InMemoryRecordStore {
    async fn list_role_records(&self) -> AppResult<Vec<RoleRecord>> {
        Ok(self.roles.read().await.clone())
    }

    async fn find_role_record(&self, user_id: UserId) -> AppResult<Option<RoleRecord>> {
        Ok(self
            .roles
            .read()
            .await
            .iter()
            .find(|record| record.user_id == user_id)
            .cloned())
    }

    async fn insert_role_record(&self, user_id: UserId, role: AppRole) -> AppResult<RoleRecord> {
        let record = RoleRecord {
            role_record_id: RoleRecordId::new(),
            user_id,
            role,
        };
        self.roles.write().await.push(record.clone());

        Ok(record)
    }

    async fn update_role_record(
        &self,
        role_record_id: RoleRecordId,
        role: AppRole,
    ) -> AppResult<RoleRecord> {
        let mut roles = self.roles.write().await;
        let record = roles
            .iter_mut()
            .find(|record| record.role_record_id == role_record_id)
            .ok_or_else(|| {
                AppError::Persistence(format!("role record '{role_record_id}' does not exist"))
            })?;
        record.role = role;

        Ok(record.clone())
    }

    async fn delete_role_record(&self, role_record_id: RoleRecordId) -> AppResult<()> {
        let mut roles = self.roles.write().await;
        let position = roles
            .iter()
            .position(|record| record.role_record_id == role_record_id)
            .ok_or_else(|| {
                AppError::Persistence(format!("role record '{role_record_id}' does not exist"))
            })?;
        roles.remove(position);

        Ok(())
    }
}

#[async_trait]
impl CallerRoleResolver for InMemoryRecordStore {
    async fn resolve_caller_role(&self, caller: &UserIdentity) -> AppResult<Option<AppRole>> {
        let Ok(user_id) = caller.subject().parse::<UserId>() else {
            return Ok(None);
        };

        let record = self.find_role_record(user_id).await?;

        Ok(record.map(|record| record.role))
    }
}
