use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode as AxumStatus};
use axum::routing::get;
use chrono::{TimeZone, Utc};
use gestorq_application::{CallerRoleResolver, ProfileRepository, UserRoleRepository};
use gestorq_core::{AppError, UserIdentity};
use gestorq_domain::{AppRole, RoleRecord, RoleRecordId, UserId};
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use url::Url;
use uuid::Uuid;

use super::rows::{ProfileRow, RoleRow};
use super::{PostgrestRecordStore, error_message, known_role_records, rest_base};

fn project_url(value: &str) -> Url {
    Url::parse(value).unwrap_or_else(|_| unreachable!())
}

#[test]
fn rest_base_appends_rest_prefix() {
    let plain = rest_base(&project_url("https://abc.supabase.co"));
    let nested = rest_base(&project_url("http://localhost:54321/proxy"));

    assert_eq!(
        plain.map(String::from).unwrap_or_default(),
        "https://abc.supabase.co/rest/v1/"
    );
    assert_eq!(
        nested.map(String::from).unwrap_or_default(),
        "http://localhost:54321/proxy/rest/v1/"
    );
}

#[test]
fn table_url_encodes_filters() {
    let store = PostgrestRecordStore::new(
        reqwest::Client::new(),
        &project_url("https://abc.supabase.co"),
        "anon-key",
    )
    .unwrap_or_else(|_| unreachable!());
    let role_record_id = RoleRecordId::from_uuid(Uuid::from_u128(7));

    let url = store
        .role_row_url(role_record_id)
        .map(String::from)
        .unwrap_or_default();

    assert_eq!(
        url,
        format!(
            "https://abc.supabase.co/rest/v1/user_roles?id=eq.{role_record_id}&select=id%2Cuser_id%2Crole"
        )
    );
}

#[test]
fn empty_api_key_is_rejected() {
    let result = PostgrestRecordStore::new(
        reqwest::Client::new(),
        &project_url("https://abc.supabase.co"),
        "  ",
    );

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn error_message_prefers_store_message() {
    let body = r#"{"code":"42501","message":"new row violates row-level security policy for table \"user_roles\""}"#;

    assert_eq!(
        error_message(StatusCode::FORBIDDEN, body),
        "new row violates row-level security policy for table \"user_roles\""
    );
    assert_eq!(
        error_message(StatusCode::BAD_GATEWAY, "upstream down"),
        "upstream down"
    );
    assert_eq!(
        error_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
        "record store answered with status 500 Internal Server Error"
    );
}

#[test]
fn profile_rows_normalize_blank_names() {
    let created_at = Utc
        .with_ymd_and_hms(2026, 3, 7, 10, 0, 0)
        .single()
        .unwrap_or_else(|| unreachable!());
    let record = gestorq_domain::ProfileRecord::from(ProfileRow {
        user_id: Uuid::from_u128(1),
        full_name: Some("   ".to_owned()),
        created_at,
    });

    assert_eq!(record.display_name, None);
    assert_eq!(record.created_at, created_at);
}

#[test]
fn unknown_roles_are_skipped_when_listing() {
    let rows = vec![
        RoleRow {
            id: Uuid::from_u128(1),
            user_id: Uuid::from_u128(10),
            role: "admin".to_owned(),
        },
        RoleRow {
            id: Uuid::from_u128(2),
            user_id: Uuid::from_u128(11),
            role: "owner".to_owned(),
        },
    ];

    let records = known_role_records(rows);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].role, AppRole::Admin);
    assert!(
        RoleRecord::try_from(RoleRow {
            id: Uuid::from_u128(3),
            user_id: Uuid::from_u128(12),
            role: "owner".to_owned(),
        })
        .is_err()
    );
}

#[derive(Default)]
struct StubState {
    roles: Mutex<Vec<Value>>,
    reject_writes: bool,
    seen_headers: Mutex<Vec<(String, String, String)>>,
}

async fn list_profiles(State(stub): State<Arc<StubState>>, headers: HeaderMap) -> Json<Value> {
    record_headers(&stub, &headers).await;
    Json(json!([
        {
            "user_id": Uuid::from_u128(10),
            "full_name": "Marta",
            "created_at": "2026-03-07T10:00:00.123456+00:00"
        }
    ]))
}

async fn list_roles(State(stub): State<Arc<StubState>>, RawQuery(query): RawQuery) -> Json<Value> {
    let rows = stub.roles.lock().await.clone();
    let filter = query
        .unwrap_or_default()
        .split('&')
        .find_map(|pair| pair.strip_prefix("user_id=eq.").map(str::to_owned));

    let rows: Vec<Value> = rows
        .into_iter()
        .filter(|row| {
            filter
                .as_deref()
                .is_none_or(|user_id| row["user_id"].as_str() == Some(user_id))
        })
        .collect();
    Json(Value::Array(rows))
}

async fn insert_role(
    State(stub): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (AxumStatus, Json<Value>) {
    record_headers(&stub, &headers).await;
    if stub.reject_writes {
        return (
            AxumStatus::FORBIDDEN,
            Json(json!({
                "code": "42501",
                "message": "new row violates row-level security policy"
            })),
        );
    }

    let row = json!({
        "id": Uuid::from_u128(99),
        "user_id": body["user_id"],
        "role": body["role"],
    });
    stub.roles.lock().await.push(row.clone());
    (AxumStatus::CREATED, Json(json!([row])))
}

async fn delete_role(RawQuery(_query): RawQuery) -> Json<Value> {
    Json(json!([]))
}

async fn record_headers(stub: &StubState, headers: &HeaderMap) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned()
    };
    stub.seen_headers.lock().await.push((
        header("apikey"),
        header("authorization"),
        header("prefer"),
    ));
}

async fn spawn_stub(stub: Arc<StubState>) -> PostgrestRecordStore {
    let app = Router::new()
        .route("/rest/v1/profiles", get(list_profiles))
        .route(
            "/rest/v1/user_roles",
            get(list_roles).post(insert_role).delete(delete_role),
        )
        .with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap_or_else(|_| unreachable!());
    let address = listener.local_addr().unwrap_or_else(|_| unreachable!());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    PostgrestRecordStore::new(
        reqwest::Client::new(),
        &project_url(&format!("http://{address}")),
        "service-key",
    )
    .unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn listing_and_inserting_go_through_rest_endpoints() {
    let stub = Arc::new(StubState::default());
    let store = spawn_stub(stub.clone()).await;
    let user_id = UserId::from_uuid(Uuid::from_u128(10));

    let profiles = store.list_profiles().await.unwrap_or_default();
    let inserted = store.insert_role_record(user_id, AppRole::Staff).await;
    let listed = store.list_role_records().await.unwrap_or_default();

    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].display_name.as_deref(), Some("Marta"));
    assert!(matches!(inserted, Ok(record) if record.role == AppRole::Staff));
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].user_id, user_id);

    let headers = stub.seen_headers.lock().await.clone();
    assert_eq!(headers[0].0, "service-key");
    assert_eq!(headers[0].1, "Bearer service-key");
    assert_eq!(headers[1].2, "return=representation");
}

#[tokio::test]
async fn rejected_insert_surfaces_store_message() {
    let stub = Arc::new(StubState {
        reject_writes: true,
        ..StubState::default()
    });
    let store = spawn_stub(stub).await;

    let result = store.insert_role_record(UserId::new(), AppRole::Admin).await;

    assert!(matches!(
        result,
        Err(AppError::Persistence(message)) if message == "new row violates row-level security policy"
    ));
}

#[tokio::test]
async fn deleting_unmatched_row_is_persistence_error() {
    let store = spawn_stub(Arc::new(StubState::default())).await;

    let result = store.delete_role_record(RoleRecordId::new()).await;

    assert!(matches!(result, Err(AppError::Persistence(_))));
}

#[tokio::test]
async fn caller_role_filters_by_subject() {
    let admin = UserId::from_uuid(Uuid::from_u128(10));
    let stub = Arc::new(StubState::default());
    stub.roles.lock().await.push(json!({
        "id": Uuid::from_u128(1),
        "user_id": admin,
        "role": "admin",
    }));
    let store = spawn_stub(stub).await;

    let known = store
        .resolve_caller_role(&UserIdentity::new(admin.to_string(), None))
        .await;
    let stranger = store
        .resolve_caller_role(&UserIdentity::new(UserId::new().to_string(), None))
        .await;

    assert!(matches!(known, Ok(Some(AppRole::Admin))));
    assert!(matches!(stranger, Ok(None)));
}

#[tokio::test]
async fn find_role_record_returns_the_users_stored_row() {
    let stub = Arc::new(StubState::default());
    let store = spawn_stub(stub).await;
    let user_id = UserId::from_uuid(Uuid::from_u128(10));

    let before = store.find_role_record(user_id).await;
    let inserted = store.insert_role_record(user_id, AppRole::Staff).await;
    let after = store.find_role_record(user_id).await;
    let other = store.find_role_record(UserId::new()).await;

    assert!(matches!(before, Ok(None)));
    assert!(matches!(
        (inserted, after),
        (Ok(written), Ok(Some(found))) if written.role_record_id == found.role_record_id
    ));
    assert!(matches!(other, Ok(None)));
}

#[tokio::test]
async fn unreachable_store_is_fetch_error() {
    let store = PostgrestRecordStore::new(
        reqwest::Client::new(),
        &project_url("http://127.0.0.1:9"),
        "service-key",
    )
    .unwrap_or_else(|_| unreachable!());

    let result = store.list_profiles().await;

    assert!(matches!(result, Err(AppError::Fetch(_))));
}
