pub mod health;
pub mod membership;
pub mod roles;
pub mod users;
