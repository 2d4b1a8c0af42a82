mod caller;
mod notices;
mod repositories;

pub use caller::{CallerRoleResolver, CallerRoleState};
pub use notices::{Notice, NoticeLevel, NotificationSink};
pub use repositories::{ProfileRepository, UserRoleRepository};

pub(crate) use notices::{ASSIGN_ROLE_FAILED, REMOVE_ROLE_FAILED};
