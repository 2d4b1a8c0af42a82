//! Admin screen that lists users with their roles and changes those roles.
//!
//! Every successful write is followed by a full re-fetch; the directory is
//! always replaced as a whole. Each refresh takes a generation number when it
//! starts and its result is dropped if a later refresh has already been
//! applied, so a slow fetch can never bring back rows older than the current
//! ones.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use gestorq_core::{AppError, AppResult, UserIdentity};
use gestorq_domain::{AppRole, RoleDirectory, RoleDirectoryStats, UserId, UserRoleView};

use crate::user_directory_ports::{
    ASSIGN_ROLE_FAILED, CallerRoleResolver, CallerRoleState, Notice, NotificationSink,
    REMOVE_ROLE_FAILED,
};
use crate::{RoleDirectoryService, RoleMutationService, StoreDeadline};

mod busy_rows;

use busy_rows::BusyRows;

/// Where the screen stands after checking the caller's role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenPhase {
    /// The caller's role is still resolving; show a spinner, decide nothing yet.
    Loading,
    /// The caller is not an admin and is sent away with `notice`.
    Redirected {
        /// Notice shown on redirect.
        notice: Notice,
    },
    /// The caller is an admin.
    Ready,
}

/// Render-time projection of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserManagementSnapshot {
    /// True until the first fetch finished, successfully or not.
    pub is_loading: bool,
    /// Table rows.
    pub users: Vec<UserRoleView>,
    /// Counts derived from `users`.
    pub stats: RoleDirectoryStats,
    /// Rows whose controls are disabled by an in-flight mutation.
    pub busy_users: Vec<UserId>,
}

#[derive(Debug)]
struct DirectoryState {
    directory: RoleDirectory,
    is_loading: bool,
    issued_generation: u64,
    applied_generation: u64,
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self {
            directory: RoleDirectory::default(),
            is_loading: true,
            issued_generation: 0,
            applied_generation: 0,
        }
    }
}

/// Orchestrates access checks, directory loading and per-row role mutations.
#[derive(Clone)]
pub struct UserManagementScreen {
    directory_service: RoleDirectoryService,
    mutation_service: RoleMutationService,
    caller_role_resolver: Arc<dyn CallerRoleResolver>,
    notifier: Arc<dyn NotificationSink>,
    deadline: StoreDeadline,
    state: Arc<RwLock<DirectoryState>>,
    busy_rows: Arc<BusyRows>,
}

impl UserManagementScreen {
    /// Creates a new screen from required dependencies.
    #[must_use]
    pub fn new(
        directory_service: RoleDirectoryService,
        mutation_service: RoleMutationService,
        caller_role_resolver: Arc<dyn CallerRoleResolver>,
        notifier: Arc<dyn NotificationSink>,
        deadline: StoreDeadline,
    ) -> Self {
        Self {
            directory_service,
            mutation_service,
            caller_role_resolver,
            notifier,
            deadline,
            state: Arc::new(RwLock::new(DirectoryState::default())),
            busy_rows: Arc::new(BusyRows::default()),
        }
    }

    /// Decides access from the caller's role resolution state.
    ///
    /// Nothing is decided while the role is loading, so an admin whose role
    /// has not arrived yet is never bounced.
    pub fn access(&self, caller_role: CallerRoleState) -> ScreenPhase {
        match caller_role {
            CallerRoleState::Loading => ScreenPhase::Loading,
            CallerRoleState::Resolved(Some(AppRole::Admin)) => ScreenPhase::Ready,
            CallerRoleState::Resolved(_) => {
                let notice = Notice::access_denied();
                self.notifier.notify(notice.clone());
                ScreenPhase::Redirected { notice }
            }
        }
    }

    /// Resolves the caller's role and decides access.
    ///
    /// A failed lookup counts as "no role"; the screen is admin-only, so
    /// the caller is redirected.
    pub async fn resolve_access(&self, caller: &UserIdentity) -> ScreenPhase {
        let role = self
            .deadline
            .run(
                "resolve caller role",
                self.caller_role_resolver.resolve_caller_role(caller),
            )
            .await
            .unwrap_or_else(|error| {
                warn!(subject = caller.subject(), error = %error, "failed to resolve caller role");
                None
            });

        self.access(CallerRoleState::Resolved(role))
    }

    /// Checks access and loads the directory on first admin visit.
    ///
    /// A failed first load is already reported through the notifier; the
    /// screen still opens with whatever rows it holds.
    pub async fn mount(&self, caller: &UserIdentity) -> ScreenPhase {
        let phase = self.resolve_access(caller).await;
        if phase == ScreenPhase::Ready {
            let _ = self.ensure_loaded().await;
        }

        phase
    }

    /// Loads the directory unless a fetch already completed.
    pub async fn ensure_loaded(&self) -> AppResult<()> {
        if self.state.read().await.is_loading {
            self.refresh().await?;
        }

        Ok(())
    }

    /// Re-fetches the directory and replaces the current rows.
    ///
    /// On failure the previous rows stay in place, an error notice is shown
    /// and the error is returned.
    pub async fn refresh(&self) -> AppResult<()> {
        let generation = {
            let mut state = self.state.write().await;
            state.issued_generation += 1;
            state.issued_generation
        };

        let fetched = self.directory_service.fetch_directory().await;

        let mut state = self.state.write().await;
        state.is_loading = false;

        match fetched {
            Ok(directory) => {
                if generation > state.applied_generation {
                    state.directory = directory;
                    state.applied_generation = generation;
                } else {
                    debug!(
                        generation,
                        applied = state.applied_generation,
                        "discarded stale directory fetch"
                    );
                }
                Ok(())
            }
            Err(fetch_error) => {
                error!(error = %fetch_error, "failed to fetch user directory");
                self.notifier.notify(Notice::directory_fetch_failed());
                Err(fetch_error)
            }
        }
    }

    /// Returns the current rows, counts and busy markers.
    pub async fn snapshot(&self) -> UserManagementSnapshot {
        let state = self.state.read().await;

        UserManagementSnapshot {
            is_loading: state.is_loading,
            users: state.directory.views().to_vec(),
            stats: state.directory.stats(),
            busy_users: self.busy_rows.snapshot(),
        }
    }

    /// Returns whether a mutation is in flight for `user_id`.
    #[must_use]
    pub fn is_busy(&self, user_id: UserId) -> bool {
        self.busy_rows.contains(user_id)
    }

    /// Gives a listed user the `role`, then re-fetches.
    pub async fn assign_role(&self, user_id: UserId, role: AppRole) -> AppResult<()> {
        let outcome = self.assign_role_inner(user_id, role).await;
        if let Err(failure) = &outcome {
            self.notifier
                .notify(Notice::error(failure_message(failure, ASSIGN_ROLE_FAILED)));
        }

        outcome
    }

    /// Removes a listed user's role row, then re-fetches.
    pub async fn remove_role(&self, user_id: UserId) -> AppResult<()> {
        let outcome = self.remove_role_inner(user_id).await;
        if let Err(failure) = &outcome {
            self.notifier
                .notify(Notice::error(failure_message(failure, REMOVE_ROLE_FAILED)));
        }

        outcome
    }

    async fn assign_role_inner(&self, user_id: UserId, role: AppRole) -> AppResult<()> {
        let _busy = self.busy_rows.acquire(user_id)?;
        self.ensure_listed(user_id).await?;

        self.mutation_service.assign_role(user_id, role).await?;

        self.notifier.notify(Notice::role_updated(role));
        let _ = self.refresh().await;
        Ok(())
    }

    async fn remove_role_inner(&self, user_id: UserId) -> AppResult<()> {
        let _busy = self.busy_rows.acquire(user_id)?;
        self.ensure_listed(user_id).await?;
        let record = self
            .mutation_service
            .current_role_record(user_id)
            .await?
            .ok_or_else(|| {
                AppError::Validation(format!("user '{user_id}' has no role to remove"))
            })?;

        self.mutation_service.remove_role(record.role_record_id).await?;

        self.notifier.notify(Notice::role_removed());
        let _ = self.refresh().await;
        Ok(())
    }

    /// Fails with `NotFound` unless `user_id` is a listed row, re-fetching
    /// once if the user is not listed yet.
    ///
    /// Only membership comes from the cached rows; they may predate the last
    /// write when its re-fetch failed, so role rows are read from the store.
    async fn ensure_listed(&self, user_id: UserId) -> AppResult<()> {
        if self.state.read().await.directory.find(user_id).is_some() {
            return Ok(());
        }

        self.refresh().await?;

        self.state
            .read()
            .await
            .directory
            .find(user_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' is not listed")))
    }
}

fn failure_message(error: &AppError, fallback: &str) -> String {
    match error {
        AppError::Persistence(message) if !message.trim().is_empty() => message.clone(),
        _ => fallback.to_owned(),
    }
}
