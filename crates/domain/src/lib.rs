//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod directory;
mod membership;
mod premium;
mod role;
mod user;

pub use directory::{
    ASSIGN_ROLE_PLACEHOLDER, EMPTY_DIRECTORY_MESSAGE, REMOVE_ROLE_CONFIRMATION_DESCRIPTION,
    REMOVE_ROLE_CONFIRMATION_TITLE, ROLE_STAT_TITLES, RoleDirectory, RoleDirectoryStats,
    UNNAMED_USER_LABEL, USER_MANAGEMENT_HEADING, USER_MANAGEMENT_SUBHEADING, USER_TABLE_COLUMNS,
    USER_TABLE_DESCRIPTION, USER_TABLE_TITLE, UserRoleView,
};
pub use membership::{
    DEFAULT_CHECKOUT_URL, MEMBERSHIP_MODAL_DESCRIPTION, MEMBERSHIP_MODAL_TITLE,
    MEMBERSHIP_PAGE_HEADING, MEMBERSHIP_PAGE_SUBHEADING, MembershipBenefit, MembershipOffer,
    OutboundLink,
};
pub use premium::{AccessDecision, AccessPolicy, DenyAllPolicy, GateState, PremiumGate};
pub use role::{
    AppRole, CapabilityLevel, NO_ROLE_LABEL, ProfileRecord, ROLE_PERMISSIONS_HEADING,
    RoleCapability, RoleRecord,
};
pub use user::{RoleRecordId, UserId};
