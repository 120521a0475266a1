//! Sign In Use Case
//!
//! Authenticates a user by email and password and issues a token pair.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::register::require;
use crate::application::role_store::RoleStore;
use crate::application::token_issuer::{self, TokenPair};
use crate::domain::repository::{
    RefreshTokenRepository, RoleRepository, UserRepository, UserRoleRepository,
};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in use case
pub struct SignInUseCase<U, R, T>
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

impl<U, R, T> SignInUseCase<U, R, T>
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

    pub async fn execute(&self, input: SignInInput) -> AuthResult<TokenPair> {
        require("Email", &input.email)?;
        require("Password", &input.password)?;

        let email = Email::new(&input.email)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::EmailNotFound)?;

        let raw_password = RawPassword::presented(input.password);
        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::PasswordIncorrect);
        }

        let role = self.roles.role_of(user.user_id).await?;

        let pair = token_issuer::issue_pair(&self.config.jwt, &user, role)?;
        self.token_repo.upsert(user.user_id, &pair.refresh_token).await?;

        tracing::info!(user_id = %user.user_id, role = %role, "User signed in");

        Ok(pair)
    }
}
