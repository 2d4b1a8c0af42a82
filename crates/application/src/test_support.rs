use std::collections::VecDeque;
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use gestorq_core::{AppError, AppResult, UserIdentity};
use gestorq_domain::{AppRole, ProfileRecord, RoleRecord, RoleRecordId, UserId};

use crate::user_directory_ports::{
    CallerRoleResolver, Notice, NotificationSink, ProfileRepository, UserRoleRepository,
};

pub(crate) fn user(seed: u128) -> UserId {
    UserId::from_uuid(Uuid::from_u128(seed))
}

pub(crate) fn timestamp(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .unwrap_or_else(|| unreachable!())
}

pub(crate) fn profile(user_id: UserId, name: &str) -> ProfileRecord {
    ProfileRecord {
        user_id,
        display_name: Some(name.to_owned()),
        created_at: timestamp(1_700_000_000),
    }
}

#[derive(Default)]
pub(crate) struct FakeRecordStore {
    pub(crate) profiles: Mutex<Vec<ProfileRecord>>,
    pub(crate) roles: Mutex<Vec<RoleRecord>>,
    pub(crate) fail_reads: AtomicBool,
    pub(crate) fail_profile_reads: AtomicBool,
    pub(crate) reject_writes: AtomicBool,
    pub(crate) write_delay: StdMutex<Option<Duration>>,
    pub(crate) profile_read_delays: StdMutex<VecDeque<Duration>>,
}

impl FakeRecordStore {
    pub(crate) fn with_rows(profiles: Vec<ProfileRecord>, roles: Vec<RoleRecord>) -> Self {
        Self {
            profiles: Mutex::new(profiles),
            roles: Mutex::new(roles),
            ..Self::default()
        }
    }

    pub(crate) async fn roles_for(&self, user_id: UserId) -> Vec<RoleRecord> {
        self.roles
            .lock()
            .await
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect()
    }

    async fn before_write(&self) -> AppResult<()> {
        let delay = *self
            .write_delay
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(AppError::Persistence(
                "new row violates row-level security policy".to_owned(),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for FakeRecordStore {
    async fn list_profiles(&self) -> AppResult<Vec<ProfileRecord>> {
        if self.fail_reads.load(Ordering::SeqCst) || self.fail_profile_reads.load(Ordering::SeqCst)
        {
            return Err(AppError::Fetch("connection refused".to_owned()));
        }

        let rows = self.profiles.lock().await.clone();
        let delay = self
            .profile_read_delays
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        Ok(rows)
    }
}

#[async_trait]
impl UserRoleRepository for FakeRecordStore {
    async fn list_role_records(&self) -> AppResult<Vec<RoleRecord>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Fetch("connection refused".to_owned()));
        }

        Ok(self.roles.lock().await.clone())
    }

    async fn find_role_record(&self, user_id: UserId) -> AppResult<Option<RoleRecord>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Fetch("connection refused".to_owned()));
        }

        Ok(self.roles_for(user_id).await.into_iter().next())
    }

    async fn insert_role_record(&self, user_id: UserId, role: AppRole) -> AppResult<RoleRecord> {
        self.before_write().await?;

        let record = RoleRecord {
            role_record_id: RoleRecordId::new(),
            user_id,
            role,
        };
        self.roles.lock().await.push(record.clone());
        Ok(record)
    }

    async fn update_role_record(
        &self,
        role_record_id: RoleRecordId,
        role: AppRole,
    ) -> AppResult<RoleRecord> {
        self.before_write().await?;

        let mut roles = self.roles.lock().await;
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
        self.before_write().await?;

        let mut roles = self.roles.lock().await;
        let before = roles.len();
        roles.retain(|record| record.role_record_id != role_record_id);
        if roles.len() == before {
            return Err(AppError::Persistence(format!(
                "role record '{role_record_id}' does not exist"
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl CallerRoleResolver for FakeRecordStore {
    async fn resolve_caller_role(&self, caller: &UserIdentity) -> AppResult<Option<AppRole>> {
        let roles = self.roles.lock().await;
        Ok(roles
            .iter()
            .find(|record| record.user_id.to_string() == caller.subject())
            .map(|record| record.role))
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotificationSink {
    pub(crate) notices: StdMutex<Vec<Notice>>,
}

impl RecordingNotificationSink {
    pub(crate) fn recorded(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl NotificationSink for RecordingNotificationSink {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(notice);
    }
}
