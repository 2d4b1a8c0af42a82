use std::str::FromStr;

use chrono::{DateTime, Utc};
use gestorq_core::AppError;
use serde::{Deserialize, Serialize};

use crate::{RoleRecordId, UserId};

/// Application roles stored in the `user_roles` collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppRole {
    /// Full access, including user and role management.
    Admin,
    /// Day-to-day operations with read-only catalog access.
    Staff,
}

impl AppRole {
    /// Returns the stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
        }
    }

    /// Returns the label shown on role badges.
    #[must_use]
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Admin => "Administrador",
            Self::Staff => "Staff",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[AppRole] = &[AppRole::Admin, AppRole::Staff];

        ALL
    }

    /// Returns the capabilities granted by this role.
    #[must_use]
    pub fn capabilities(&self) -> &'static [RoleCapability] {
        match self {
            Self::Admin => ADMIN_CAPABILITIES,
            Self::Staff => STAFF_CAPABILITIES,
        }
    }

    /// Parses a transport value into a role.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for AppRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "staff" => Ok(Self::Staff),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}

/// Label shown for a user without any role.
pub const NO_ROLE_LABEL: &str = "Sin rol";

/// Heading of the per-role permission matrix.
pub const ROLE_PERMISSIONS_HEADING: &str = "Permisos por Rol";

/// How much of a capability a role is granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityLevel {
    /// Read and write.
    Full,
    /// Read only.
    ReadOnly,
    /// No access.
    Denied,
}

impl CapabilityLevel {
    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::ReadOnly => "read_only",
            Self::Denied => "denied",
        }
    }
}

/// One line of the per-role permission matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleCapability {
    /// Granted level.
    pub level: CapabilityLevel,
    /// Human-readable description.
    pub description: &'static str,
}

const ADMIN_CAPABILITIES: &[RoleCapability] = &[
    RoleCapability {
        level: CapabilityLevel::Full,
        description: "Acceso completo a todas las funciones",
    },
    RoleCapability {
        level: CapabilityLevel::Full,
        description: "Gestión de usuarios y roles",
    },
    RoleCapability {
        level: CapabilityLevel::Full,
        description: "CRUD completo en inventario y servicios",
    },
    RoleCapability {
        level: CapabilityLevel::Full,
        description: "Eliminación de registros",
    },
    RoleCapability {
        level: CapabilityLevel::Full,
        description: "Acceso a reportes",
    },
];

const STAFF_CAPABILITIES: &[RoleCapability] = &[
    RoleCapability {
        level: CapabilityLevel::Full,
        description: "Gestión de clientes y citas",
    },
    RoleCapability {
        level: CapabilityLevel::Full,
        description: "Registro de ventas (POS)",
    },
    RoleCapability {
        level: CapabilityLevel::Full,
        description: "Evaluaciones faciales",
    },
    RoleCapability {
        level: CapabilityLevel::ReadOnly,
        description: "Solo lectura en inventario",
    },
    RoleCapability {
        level: CapabilityLevel::ReadOnly,
        description: "Solo lectura en servicios",
    },
    RoleCapability {
        level: CapabilityLevel::Denied,
        description: "Sin acceso a eliminación",
    },
];

/// Row of the `profiles` collection. Read-only for this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Owning user.
    pub user_id: UserId,
    /// Optional full name entered by the user.
    pub display_name: Option<String>,
    /// Profile creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Row of the `user_roles` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    /// Row identifier.
    pub role_record_id: RoleRecordId,
    /// User holding the role.
    pub user_id: UserId,
    /// Assigned role.
    pub role: AppRole,
}
