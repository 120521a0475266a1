//! Refresh Token Use Case
//!
//! Exchanges a stored refresh token for a new token pair, rotating the stored
//! token so the presented one stops working.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::register::require;
use crate::application::role_store::RoleStore;
use crate::application::token_issuer::{self, TokenPair};
use crate::domain::repository::{
    RefreshTokenRepository, RoleRepository, UserRepository, UserRoleRepository,
};
use crate::error::{AuthError, AuthResult};

/// Refresh token use case
pub struct RefreshTokenUseCase<U, R, T>
where
    U: UserRepository,
    R: RoleRepository + UserRoleRepository,
    T: RefreshTokenRepository,
{
    user_repo: Arc<U>,
    roles: RoleStore<R>,
    token_repo: Arc<T>,
    config: Arc<AccountConfig>,
}

impl<U, R, T> RefreshTokenUseCase<U, R, T>
where
    U: UserRepository,
    R: RoleRepository + UserRoleRepository,
    T: RefreshTokenRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        role_repo: Arc<R>,
        token_repo: Arc<T>,
        config: Arc<AccountConfig>,
    ) -> Self {
        Self {
            user_repo,
            roles: RoleStore::new(role_repo),
            token_repo,
            config,
        }
    }

    pub async fn execute(&self, presented: &str) -> AuthResult<TokenPair> {
        require("Refresh token", presented)?;

        let stored = self
            .token_repo
            .find_by_token(presented)
            .await?
            .ok_or(AuthError::RefreshTokenNotFound)?;

        let user = self
            .user_repo
            .find_by_id(stored.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let role = self.roles.role_of(user.user_id).await?;

        let pair = token_issuer::issue_pair(&self.config.jwt, &user, role)?;

        // Rotation never creates a row
        if !self
            .token_repo
            .replace_for_user(user.user_id, &pair.refresh_token)
            .await?
        {
            return Err(AuthError::RefreshTokenRotationFailed);
        }

        tracing::info!(user_id = %user.user_id, "Refresh token rotated");

        Ok(pair)
    }
}
