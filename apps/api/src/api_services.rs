use std::sync::Arc;

use gestorq_application::{
    CallerRoleResolver, MembershipService, NotificationSink, ProfileRepository,
    RoleDirectoryService, RoleMutationService, SharedAccessPolicy, StoreDeadline,
    UserManagementScreen, UserRoleRepository,
};
use gestorq_core::AppError;
use gestorq_infrastructure::{InMemoryRecordStore, PostgrestRecordStore, TracingNotificationSink};
use tracing::{info, warn};

use crate::api_config::{ApiConfig, RecordStoreConfig};
use crate::state::AppState;

/// Ports served by one record store adapter.
pub struct RecordStorePorts {
    pub profiles: Arc<dyn ProfileRepository>,
    pub roles: Arc<dyn UserRoleRepository>,
    pub caller_roles: Arc<dyn CallerRoleResolver>,
}

impl RecordStorePorts {
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: ProfileRepository + UserRoleRepository + CallerRoleResolver + 'static,
    {
        Self {
            profiles: store.clone(),
            roles: store.clone(),
            caller_roles: store,
        }
    }
}

pub fn build_record_store(config: &ApiConfig) -> Result<RecordStorePorts, AppError> {
    match &config.record_store {
        RecordStoreConfig::Memory => {
            warn!("RECORD_STORE=memory: role changes are lost on restart");
            Ok(RecordStorePorts::from_store(Arc::new(
                InMemoryRecordStore::new(),
            )))
        }
        RecordStoreConfig::Postgrest(postgrest) => {
            let http_client = reqwest::Client::builder()
                .timeout(config.store_timeout)
                .build()
                .map_err(|error| {
                    AppError::Internal(format!("failed to build record store client: {error}"))
                })?;
            let store = PostgrestRecordStore::new(
                http_client,
                &postgrest.project_url,
                postgrest.api_key.clone(),
            )?;
            info!(project_url = %postgrest.project_url, "using hosted record store");

            Ok(RecordStorePorts::from_store(Arc::new(store)))
        }
    }
}

pub fn build_app_state(
    config: &ApiConfig,
    ports: RecordStorePorts,
    notifier: Arc<dyn NotificationSink>,
) -> Result<AppState, AppError> {
    let deadline = StoreDeadline::new(config.store_timeout);

    let user_management = UserManagementScreen::new(
        RoleDirectoryService::new(ports.profiles, ports.roles.clone(), deadline),
        RoleMutationService::new(ports.roles, deadline),
        ports.caller_roles,
        notifier,
        deadline,
    );
    let membership_service = MembershipService::new(
        config.membership_checkout_url.as_str(),
        SharedAccessPolicy::default(),
    )?;

    Ok(AppState {
        user_management,
        membership_service,
        auth_subject_header: config.auth_subject_header.clone(),
    })
}

pub fn default_notifier() -> Arc<dyn NotificationSink> {
    Arc::new(TracingNotificationSink::new())
}
