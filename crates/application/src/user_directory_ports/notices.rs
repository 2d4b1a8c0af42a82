use gestorq_domain::AppRole;

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Operation succeeded.
    Success,
    /// Operation failed or was refused.
    Error,
}

/// Transient, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Text in the user's language.
    pub message: String,
}

impl Notice {
    /// Builds a success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Builds an error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Shown when a non-admin caller opens the user-management screen.
    #[must_use]
    pub fn access_denied() -> Self {
        Self::error("No tienes permiso para acceder a esta página")
    }

    /// Shown when the directory could not be loaded.
    #[must_use]
    pub fn directory_fetch_failed() -> Self {
        Self::error("Error al cargar usuarios")
    }

    /// Shown after a role was assigned.
    #[must_use]
    pub fn role_updated(role: AppRole) -> Self {
        Self::success(format!("Rol actualizado a {}", role.display_label()))
    }

    /// Shown after a role was removed.
    #[must_use]
    pub fn role_removed() -> Self {
        Self::success("Rol eliminado")
    }
}

/// Fallback text when a role assignment fails without a store message.
pub(crate) const ASSIGN_ROLE_FAILED: &str = "Error al asignar rol";

/// Fallback text when a role removal fails without a store message.
pub(crate) const REMOVE_ROLE_FAILED: &str = "Error al eliminar rol";

/// Fire-and-forget notification surface. Never queried.
pub trait NotificationSink: Send + Sync {
    /// Shows a notice.
    fn notify(&self, notice: Notice);
}
