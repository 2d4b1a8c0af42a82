//! Record store backed by a hosted PostgREST endpoint (Supabase `rest/v1`).
//!
//! Row-level security on the hosted side decides which calls are allowed;
//! a rejection comes back as an error body whose `message` is passed through
//! unchanged so it can be shown to the user.

use async_trait::async_trait;
use gestorq_application::{CallerRoleResolver, ProfileRepository, UserRoleRepository};
use gestorq_core::{AppError, AppResult, UserIdentity};
use gestorq_domain::{AppRole, ProfileRecord, RoleRecord, RoleRecordId, UserId};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

mod rows;

use rows::{NewRoleRow, ProfileRow, RoleRow, RolePatch};

const PROFILES_TABLE: &str = "profiles";
const USER_ROLES_TABLE: &str = "user_roles";
const PROFILE_COLUMNS: &str = "user_id,full_name,created_at";
const ROLE_COLUMNS: &str = "id,user_id,role";

/// PostgREST-backed implementation of the directory ports.
#[derive(Clone, Debug)]
pub struct PostgrestRecordStore {
    http_client: reqwest::Client,
    rest_base: Url,
    api_key: String,
}

impl PostgrestRecordStore {
    /// Creates a store for the project at `project_url`, authenticating with `api_key`.
    pub fn new(
        http_client: reqwest::Client,
        project_url: &Url,
        api_key: impl Into<String>,
    ) -> AppResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AppError::Validation(
                "record store api key must not be empty".to_owned(),
            ));
        }

        Ok(Self {
            http_client,
            rest_base: rest_base(project_url)?,
            api_key,
        })
    }

    fn table_url(&self, table: &str, query: &[(&str, &str)]) -> AppResult<Url> {
        let mut url = self.rest_base.join(table).map_err(|error| {
            AppError::Internal(format!("failed to build url for table '{table}': {error}"))
        })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .header("apikey", self.api_key.as_str())
            .bearer_auth(self.api_key.as_str())
    }

    async fn read_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> AppResult<Vec<T>> {
        let url = self.table_url(table, query)?;
        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(|error| AppError::Fetch(format!("failed to read '{table}': {error}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Fetch(format!(
                "failed to read '{table}': {}",
                error_message(status, &body)
            )));
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|error| AppError::Fetch(format!("invalid '{table}' payload: {error}")))
    }

    /// Sends a write asking for the touched rows back and returns exactly one.
    async fn write_row(&self, request: RequestBuilder) -> AppResult<RoleRow> {
        let response = request
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(|error| AppError::Persistence(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Persistence(error_message(status, &body)));
        }

        let mut rows = response
            .json::<Vec<RoleRow>>()
            .await
            .map_err(|error| AppError::Persistence(format!("invalid write response: {error}")))?;

        match rows.len() {
            1 => rows
                .pop()
                .ok_or_else(|| AppError::Internal("write response row vanished".to_owned())),
            0 => Err(AppError::Persistence(
                "no role record matched the request".to_owned(),
            )),
            count => Err(AppError::Persistence(format!(
                "write touched {count} role records instead of one"
            ))),
        }
    }

    fn role_row_url(&self, role_record_id: RoleRecordId) -> AppResult<Url> {
        let filter = format!("eq.{role_record_id}");
        self.table_url(
            USER_ROLES_TABLE,
            &[("id", filter.as_str()), ("select", ROLE_COLUMNS)],
        )
    }
}

#[async_trait]
impl ProfileRepository for PostgrestRecordStore {
    async fn list_profiles(&self) -> AppResult<Vec<ProfileRecord>> {
        let rows: Vec<ProfileRow> = self
            .read_rows(PROFILES_TABLE, &[("select", PROFILE_COLUMNS)])
            .await?;

        Ok(rows.into_iter().map(ProfileRecord::from).collect())
    }
}

#[async_trait]
impl UserRoleRepository for PostgrestRecordStore {
    async fn list_role_records(&self) -> AppResult<Vec<RoleRecord>> {
        let rows: Vec<RoleRow> = self
            .read_rows(USER_ROLES_TABLE, &[("select", ROLE_COLUMNS)])
            .await?;

        Ok(known_role_records(rows))
    }

    async fn find_role_record(&self, user_id: UserId) -> AppResult<Option<RoleRecord>> {
        let filter = format!("eq.{user_id}");
        let rows: Vec<RoleRow> = self
            .read_rows(
                USER_ROLES_TABLE,
                &[
                    ("select", ROLE_COLUMNS),
                    ("user_id", filter.as_str()),
                    ("limit", "1"),
                ],
            )
            .await?;

        Ok(known_role_records(rows).into_iter().next())
    }

    async fn insert_role_record(&self, user_id: UserId, role: AppRole) -> AppResult<RoleRecord> {
        let url = self.table_url(USER_ROLES_TABLE, &[("select", ROLE_COLUMNS)])?;
        let row = self
            .write_row(
                self.request(Method::POST, url)
                    .json(&NewRoleRow::new(user_id, role)),
            )
            .await?;

        debug!(%user_id, role = role.as_str(), "inserted role record");
        RoleRecord::try_from(row).map_err(into_persistence)
    }

    async fn update_role_record(
        &self,
        role_record_id: RoleRecordId,
        role: AppRole,
    ) -> AppResult<RoleRecord> {
        let url = self.role_row_url(role_record_id)?;
        let row = self
            .write_row(self.request(Method::PATCH, url).json(&RolePatch { role }))
            .await?;

        RoleRecord::try_from(row).map_err(into_persistence)
    }

    async fn delete_role_record(&self, role_record_id: RoleRecordId) -> AppResult<()> {
        let url = self.role_row_url(role_record_id)?;
        self.write_row(self.request(Method::DELETE, url)).await?;

        Ok(())
    }
}

#[async_trait]
impl CallerRoleResolver for PostgrestRecordStore {
    async fn resolve_caller_role(&self, caller: &UserIdentity) -> AppResult<Option<AppRole>> {
        let Ok(user_id) = caller.subject().parse::<UserId>() else {
            debug!(subject = caller.subject(), "caller subject is not a user id");
            return Ok(None);
        };

        let record = self.find_role_record(user_id).await?;

        Ok(record.map(|record| record.role))
    }
}

fn rest_base(project_url: &Url) -> AppResult<Url> {
    let mut base = project_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join("rest/v1/").map_err(|error| {
        AppError::Validation(format!("invalid record store url '{project_url}': {error}"))
    })
}

/// Drops rows whose role this build does not know instead of failing the listing.
fn known_role_records(rows: Vec<RoleRow>) -> Vec<RoleRecord> {
    rows.into_iter()
        .filter_map(|row| match RoleRecord::try_from(row) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(error = %error, "skipping unreadable role record");
                None
            }
        })
        .collect()
}

fn into_persistence(error: AppError) -> AppError {
    AppError::Persistence(error.message().to_owned())
}

/// Extracts the human-readable message from a PostgREST error response.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .filter(|message| !message.trim().is_empty())
        .or_else(|| {
            let body = body.trim();
            (!body.is_empty()).then(|| body.to_owned())
        })
        .unwrap_or_else(|| format!("record store answered with status {status}"))
}

#[cfg(test)]
mod tests;
