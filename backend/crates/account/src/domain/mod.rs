//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    refresh_token::RefreshTokenInfo,
    role::{Role, UserRole},
    user::{NewUser, User},
};
pub use repository::{
    AccountStore, RefreshTokenRepository, RoleRepository, UserRepository, UserRoleRepository,
};
