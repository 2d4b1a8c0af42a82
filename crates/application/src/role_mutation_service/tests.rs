use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use gestorq_core::{AppError, AppResult};
use gestorq_domain::{AppRole, RoleDirectory, RoleRecord, RoleRecordId};

use crate::{RoleDirectoryService, StoreDeadline};
use crate::test_support::{FakeRecordStore, profile, user};

use super::RoleMutationService;

fn service(store: Arc<FakeRecordStore>) -> RoleMutationService {
    RoleMutationService::new(store, StoreDeadline::default())
}

#[tokio::test]
async fn assign_role_inserts_when_user_has_no_row() {
    let u1 = user(1);
    let store = Arc::new(FakeRecordStore::with_rows(vec![profile(u1, "Ana")], Vec::new()));

    let result = service(store.clone()).assign_role(u1, AppRole::Staff).await;

    assert!(result.is_ok());
    let rows = store.roles_for(u1).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].role, AppRole::Staff);
}

#[tokio::test]
async fn assign_role_updates_stored_row() {
    let u1 = user(1);
    let store = Arc::new(FakeRecordStore::default());
    let mutations = service(store.clone());

    let inserted = mutations.assign_role(u1, AppRole::Staff).await;
    assert!(inserted.is_ok());
    let role_record_id = inserted
        .map(|record| record.role_record_id)
        .unwrap_or_else(|_| unreachable!());

    let updated = mutations.assign_role(u1, AppRole::Admin).await;

    assert!(matches!(updated, Ok(record) if record.role_record_id == role_record_id));
    let rows = store.roles_for(u1).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].role, AppRole::Admin);
}

#[tokio::test]
async fn assign_role_surfaces_store_rejection() {
    let u1 = user(1);
    let store = Arc::new(FakeRecordStore::default());
    store.reject_writes.store(true, Ordering::SeqCst);

    let result = service(store.clone()).assign_role(u1, AppRole::Admin).await;

    assert!(
        matches!(result, Err(AppError::Persistence(message)) if message.contains("row-level security"))
    );
    assert!(store.roles_for(u1).await.is_empty());
}

#[tokio::test]
async fn assign_role_fails_closed_when_stored_row_cannot_be_read() {
    let u1 = user(1);
    let store = Arc::new(FakeRecordStore::default());
    store.fail_reads.store(true, Ordering::SeqCst);

    let result = service(store.clone()).assign_role(u1, AppRole::Admin).await;

    assert!(matches!(result, Err(AppError::Fetch(_))));
    assert!(store.roles_for(u1).await.is_empty());
}

#[tokio::test]
async fn current_role_record_reads_the_store() {
    let u1 = user(1);
    let role_record_id = RoleRecordId::new();
    let store = Arc::new(FakeRecordStore::with_rows(
        Vec::new(),
        vec![RoleRecord {
            role_record_id,
            user_id: u1,
            role: AppRole::Staff,
        }],
    ));
    let mutations = service(store);

    let found = mutations.current_role_record(u1).await;
    let missing = mutations.current_role_record(user(2)).await;

    assert!(matches!(found, Ok(Some(record)) if record.role_record_id == role_record_id));
    assert!(matches!(missing, Ok(None)));
}

#[tokio::test]
async fn remove_role_unknown_record_is_persistence_error() {
    let store = Arc::new(FakeRecordStore::default());

    let result = service(store).remove_role(RoleRecordId::new()).await;

    assert!(matches!(result, Err(AppError::Persistence(_))));
}

#[tokio::test]
async fn failed_remove_leaves_directory_unchanged() {
    let u1 = user(1);
    let store = Arc::new(FakeRecordStore::with_rows(
        vec![profile(u1, "Ana")],
        vec![RoleRecord {
            role_record_id: RoleRecordId::new(),
            user_id: u1,
            role: AppRole::Admin,
        }],
    ));
    let directory =
        RoleDirectoryService::new(store.clone(), store.clone(), StoreDeadline::default());
    let before = directory.fetch_directory().await;

    let removed = service(store).remove_role(RoleRecordId::new()).await;
    let after = directory.fetch_directory().await;

    assert!(removed.is_err());
    let views = |fetched: AppResult<RoleDirectory>| {
        fetched
            .map(|directory| {
                directory
                    .views()
                    .iter()
                    .map(|view| (view.user_id(), view.role()))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default()
    };
    assert_eq!(views(before), vec![(u1, Some(AppRole::Admin))]);
    assert_eq!(views(after), vec![(u1, Some(AppRole::Admin))]);
}

#[tokio::test]
async fn remove_role_leaves_profiles_untouched() {
    let u1 = user(1);
    let store = Arc::new(FakeRecordStore::with_rows(vec![profile(u1, "Ana")], Vec::new()));
    let mutations = service(store.clone());

    let inserted = mutations.assign_role(u1, AppRole::Staff).await;
    let role_record_id = inserted
        .map(|record| record.role_record_id)
        .unwrap_or_else(|_| unreachable!());

    let removed = mutations.remove_role(role_record_id).await;

    assert!(removed.is_ok());
    assert!(store.roles_for(u1).await.is_empty());
    assert_eq!(store.profiles.lock().await.len(), 1);
}

#[tokio::test]
async fn slow_store_write_times_out() {
    let store = Arc::new(FakeRecordStore::default());
    *store
        .write_delay
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(Duration::from_secs(5));
    let mutations = RoleMutationService::new(store, StoreDeadline::new(Duration::from_millis(10)));

    let result = mutations.assign_role(user(1), AppRole::Staff).await;

    assert!(matches!(result, Err(AppError::Timeout(_))));
}
