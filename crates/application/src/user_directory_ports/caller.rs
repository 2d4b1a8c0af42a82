use async_trait::async_trait;

use gestorq_core::{AppResult, UserIdentity};
use gestorq_domain::AppRole;

/// Resolution state of the caller's own role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallerRoleState {
    /// The role lookup has not answered yet.
    Loading,
    /// The lookup answered; `None` means the caller holds no role.
    Resolved(Option<AppRole>),
}

/// Port resolving the role held by the current caller.
#[async_trait]
pub trait CallerRoleResolver: Send + Sync {
    /// Returns the caller's role, or `None` when the caller has none.
    async fn resolve_caller_role(&self, caller: &UserIdentity) -> AppResult<Option<AppRole>>;
}
