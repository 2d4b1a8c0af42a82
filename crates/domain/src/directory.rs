//! Merged per-user view of profile and role rows.
//!
//! The directory is rebuilt from scratch on every fetch. Profile-backed rows
//! come first in the order the store returned them, followed by role rows whose
//! user has no profile yet. When the store holds more than one role row for the
//! same user, the first one returned wins and the rest are ignored.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AppRole, ProfileRecord, RoleRecord, RoleRecordId, UserId};

/// Label shown for a user whose profile has no name.
pub const UNNAMED_USER_LABEL: &str = "Sin nombre";

/// Message shown when the directory loaded without any rows.
pub const EMPTY_DIRECTORY_MESSAGE: &str = "No hay usuarios registrados aún";

/// Heading of the user-management screen.
pub const USER_MANAGEMENT_HEADING: &str = "Gestión de Usuarios";

/// Line under the user-management heading.
pub const USER_MANAGEMENT_SUBHEADING: &str =
    "Administra los roles y permisos de los usuarios del sistema";

/// Titles of the admin, staff and pending counters, in that order.
pub const ROLE_STAT_TITLES: [&str; 3] = ["Administradores", "Staff", "Pendientes"];

/// Title of the user table.
pub const USER_TABLE_TITLE: &str = "Usuarios Registrados";

/// Description under the user table title.
pub const USER_TABLE_DESCRIPTION: &str =
    "Asigna roles a los usuarios para controlar su acceso al sistema";

/// Column headers of the user table.
pub const USER_TABLE_COLUMNS: [&str; 4] =
    ["Usuario", "Rol Actual", "Fecha de Registro", "Acciones"];

/// Placeholder of the per-row role selector.
pub const ASSIGN_ROLE_PLACEHOLDER: &str = "Asignar rol";

/// Title of the confirmation asked before removing a role.
pub const REMOVE_ROLE_CONFIRMATION_TITLE: &str = "¿Eliminar rol de usuario?";

/// Body of the confirmation asked before removing a role.
pub const REMOVE_ROLE_CONFIRMATION_DESCRIPTION: &str =
    "El usuario perderá todo acceso al sistema hasta que se le asigne un nuevo rol.";

/// One row of the user-management table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRoleView {
    user_id: UserId,
    display_label: Option<String>,
    role: Option<AppRole>,
    role_record_id: Option<RoleRecordId>,
    registered_at: DateTime<Utc>,
}

impl UserRoleView {
    /// Returns the user the row describes.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the profile name, absent for unnamed users and orphan role rows.
    #[must_use]
    pub fn display_label(&self) -> Option<&str> {
        self.display_label.as_deref()
    }

    /// Returns the name to render, falling back to a placeholder.
    #[must_use]
    pub fn display_label_or_placeholder(&self) -> &str {
        self.display_label().unwrap_or(UNNAMED_USER_LABEL)
    }

    /// Returns the assigned role, if any.
    #[must_use]
    pub fn role(&self) -> Option<AppRole> {
        self.role
    }

    /// Returns the backing role row, if any.
    #[must_use]
    pub fn role_record_id(&self) -> Option<RoleRecordId> {
        self.role_record_id
    }

    /// Returns the profile creation time, or the fetch time for orphan role rows.
    #[must_use]
    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Returns the registration date in day/month/year form.
    #[must_use]
    pub fn registered_on_label(&self) -> String {
        self.registered_at.format("%-d/%-m/%Y").to_string()
    }
}

/// Role counts shown above the user table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDirectoryStats {
    /// Rows with the admin role.
    pub admins: usize,
    /// Rows with the staff role.
    pub staff: usize,
    /// Rows without any role.
    pub pending: usize,
}

/// Ordered, duplicate-free collection of [`UserRoleView`] rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDirectory {
    views: Vec<UserRoleView>,
}

impl RoleDirectory {
    /// Merges profile and role rows fetched at `fetched_at`.
    #[must_use]
    pub fn build(
        profiles: Vec<ProfileRecord>,
        roles: Vec<RoleRecord>,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        let mut role_by_user: HashMap<UserId, &RoleRecord> = HashMap::with_capacity(roles.len());
        for role in &roles {
            role_by_user.entry(role.user_id).or_insert(role);
        }

        let mut covered: HashSet<UserId> = HashSet::with_capacity(profiles.len() + roles.len());
        let mut views = Vec::with_capacity(profiles.len() + roles.len());

        for profile in profiles {
            if !covered.insert(profile.user_id) {
                continue;
            }

            let role = role_by_user.get(&profile.user_id);
            views.push(UserRoleView {
                user_id: profile.user_id,
                display_label: profile.display_name,
                role: role.map(|record| record.role),
                role_record_id: role.map(|record| record.role_record_id),
                registered_at: profile.created_at,
            });
        }

        for role in &roles {
            if !covered.insert(role.user_id) {
                continue;
            }

            views.push(UserRoleView {
                user_id: role.user_id,
                display_label: None,
                role: Some(role.role),
                role_record_id: Some(role.role_record_id),
                registered_at: fetched_at,
            });
        }

        Self { views }
    }

    /// Returns the rows in display order.
    #[must_use]
    pub fn views(&self) -> &[UserRoleView] {
        self.views.as_slice()
    }

    /// Returns the row for one user.
    #[must_use]
    pub fn find(&self, user_id: UserId) -> Option<&UserRoleView> {
        self.views.iter().find(|view| view.user_id == user_id)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Returns whether the directory has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Counts rows per role.
    #[must_use]
    pub fn stats(&self) -> RoleDirectoryStats {
        self.views
            .iter()
            .fold(RoleDirectoryStats::default(), |mut stats, view| {
                match view.role {
                    Some(AppRole::Admin) => stats.admins += 1,
                    Some(AppRole::Staff) => stats.staff += 1,
                    None => stats.pending += 1,
                }
                stats
            })
    }
}
