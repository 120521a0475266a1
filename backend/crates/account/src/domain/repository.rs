//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use crate::domain::entity::{
    refresh_token::RefreshTokenInfo,
    role::{Role, UserRole},
    user::{NewUser, User},
};
use crate::domain::value_object::{RoleId, UserId, email::Email, role_name::RoleName};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user and return it with its assigned id.
    /// A duplicate email fails with `AuthError::EmailTaken`.
    async fn create(&self, user: NewUser) -> AuthResult<User>;

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Case-insensitive exact match
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;
}

/// Role repository trait
///
/// Role names are unique in the store.
#[trait_variant::make(RoleRepository: Send)]
pub trait LocalRoleRepository {
    async fn find_by_name(&self, name: RoleName) -> AuthResult<Option<Role>>;

    async fn find_by_role_id(&self, role_id: RoleId) -> AuthResult<Option<Role>>;

    /// Insert a role unless one with that name exists.
    /// Returns `None` when the name was already taken.
    async fn try_create(&self, name: RoleName) -> AuthResult<Option<Role>>;

    async fn count(&self) -> AuthResult<u64>;
}

/// User-role link repository trait
#[trait_variant::make(UserRoleRepository: Send)]
pub trait LocalUserRoleRepository {
    /// Always inserts; callers keep it to one link per user
    async fn assign(&self, user_id: UserId, role_id: RoleId) -> AuthResult<UserRole>;

    /// First link for the user, if any
    async fn find_by_user_id(&self, user_id: UserId) -> AuthResult<Option<UserRole>>;
}

/// Refresh token repository trait
#[trait_variant::make(RefreshTokenRepository: Send)]
pub trait LocalRefreshTokenRepository {
    async fn find_by_token(&self, token: &str) -> AuthResult<Option<RefreshTokenInfo>>;

    async fn find_for_user(&self, user_id: UserId) -> AuthResult<Option<RefreshTokenInfo>>;

    /// Replace the user's token, inserting the row if there is none
    async fn upsert(&self, user_id: UserId, token: &str) -> AuthResult<()>;

    /// Replace the user's token only if a row exists.
    /// Returns `false` when there was nothing to replace.
    async fn replace_for_user(&self, user_id: UserId, token: &str) -> AuthResult<bool>;
}

/// Every repository the account service needs, behind one handle
pub trait AccountStore:
    UserRepository
    + RoleRepository
    + UserRoleRepository
    + RefreshTokenRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> AccountStore for T where
    T: UserRepository
        + RoleRepository
        + UserRoleRepository
        + RefreshTokenRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
