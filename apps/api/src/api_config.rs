use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderName;
use gestorq_application::DEFAULT_STORE_TIMEOUT;
use gestorq_core::AppError;
use gestorq_domain::DEFAULT_CHECKOUT_URL;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Clone)]
pub struct PostgrestRuntimeConfig {
    pub project_url: Url,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub enum RecordStoreConfig {
    Memory,
    Postgrest(PostgrestRuntimeConfig),
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub record_store: RecordStoreConfig,
    pub store_timeout: Duration,
    pub membership_checkout_url: String,
    pub auth_subject_header: String,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let record_store = match env::var("RECORD_STORE")
            .unwrap_or_else(|_| "postgrest".to_owned())
            .as_str()
        {
            "memory" => RecordStoreConfig::Memory,
            "postgrest" => {
                let project_url = required_non_empty_env("SUPABASE_URL")?;
                let project_url = Url::parse(project_url.trim()).map_err(|error| {
                    AppError::Validation(format!("invalid SUPABASE_URL: {error}"))
                })?;
                RecordStoreConfig::Postgrest(PostgrestRuntimeConfig {
                    project_url,
                    api_key: required_non_empty_env("SUPABASE_API_KEY")?,
                })
            }
            other => {
                return Err(AppError::Validation(format!(
                    "RECORD_STORE must be either 'postgrest' or 'memory', got '{other}'"
                )));
            }
        };

        let store_timeout = match env::var("STORE_TIMEOUT_MS") {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|error| {
                    AppError::Validation(format!("invalid STORE_TIMEOUT_MS: {error}"))
                })?,
            Err(_) => DEFAULT_STORE_TIMEOUT,
        };

        let membership_checkout_url = env::var("MEMBERSHIP_CHECKOUT_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CHECKOUT_URL.to_owned());

        let auth_subject_header = env::var("AUTH_SUBJECT_HEADER")
            .ok()
            .map(|value| value.trim().to_ascii_lowercase())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "x-auth-subject".to_owned());
        HeaderName::from_bytes(auth_subject_header.as_bytes()).map_err(|error| {
            AppError::Validation(format!("invalid AUTH_SUBJECT_HEADER: {error}"))
        })?;

        Ok(Self {
            frontend_url,
            api_host,
            api_port,
            record_store,
            store_timeout,
            membership_checkout_url,
            auth_subject_header,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
