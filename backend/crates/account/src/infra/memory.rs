//! In-Memory Repository Implementation
//!
//! Used when no database is configured and by the test suites. Enforces the
//! same unique constraints as the SQL schema: email, role name, and one
//! refresh token per user.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::entity::{
    refresh_token::RefreshTokenInfo,
    role::{Role, UserRole},
    user::{NewUser, User},
};
use crate::domain::repository::{
    RefreshTokenRepository, RoleRepository, UserRepository, UserRoleRepository,
};
use crate::domain::value_object::{RoleId, UserId, email::Email, role_name::RoleName};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    roles: Vec<Role>,
    user_roles: Vec<UserRole>,
    refresh_tokens: Vec<RefreshTokenInfo>,
    next_user_id: i64,
    next_role_id: i64,
    next_link_id: i64,
}

/// Mutex-guarded tables shared by every clone
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // Every write completes before the guard drops, so a poisoned lock
        // still holds consistent tables
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    pub fn refresh_token_count(&self) -> usize {
        self.lock().refresh_tokens.len()
    }
}

fn next(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

impl UserRepository for InMemoryAccountRepository {
    async fn create(&self, user: NewUser) -> AuthResult<User> {
        let mut tables = self.lock();

        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }

        let user = user.with_id(UserId::from_raw(next(&mut tables.next_user_id)));
        tables.users.push(user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.lock().users.iter().find(|u| &u.email == email).cloned())
    }
}

impl RoleRepository for InMemoryAccountRepository {
    async fn find_by_name(&self, name: RoleName) -> AuthResult<Option<Role>> {
        Ok(self.lock().roles.iter().find(|r| r.name == name).copied())
    }

    async fn find_by_role_id(&self, role_id: RoleId) -> AuthResult<Option<Role>> {
        Ok(self.lock().roles.iter().find(|r| r.role_id == role_id).copied())
    }

    async fn try_create(&self, name: RoleName) -> AuthResult<Option<Role>> {
        let mut tables = self.lock();

        if tables.roles.iter().any(|r| r.name == name) {
            return Ok(None);
        }

        let role = Role {
            role_id: RoleId::from_raw(next(&mut tables.next_role_id)),
            name,
        };
        tables.roles.push(role);

        Ok(Some(role))
    }

    async fn count(&self) -> AuthResult<u64> {
        Ok(self.lock().roles.len() as u64)
    }
}

impl UserRoleRepository for InMemoryAccountRepository {
    async fn assign(&self, user_id: UserId, role_id: RoleId) -> AuthResult<UserRole> {
        let mut tables = self.lock();

        let link = UserRole {
            id: next(&mut tables.next_link_id),
            user_id,
            role_id,
        };
        tables.user_roles.push(link);

        Ok(link)
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AuthResult<Option<UserRole>> {
        Ok(self
            .lock()
            .user_roles
            .iter()
            .find(|l| l.user_id == user_id)
            .copied())
    }
}

impl RefreshTokenRepository for InMemoryAccountRepository {
    async fn find_by_token(&self, token: &str) -> AuthResult<Option<RefreshTokenInfo>> {
        Ok(self
            .lock()
            .refresh_tokens
            .iter()
            .find(|t| t.token == token)
            .cloned())
    }

    async fn find_for_user(&self, user_id: UserId) -> AuthResult<Option<RefreshTokenInfo>> {
        Ok(self
            .lock()
            .refresh_tokens
            .iter()
            .find(|t| t.user_id == user_id)
            .cloned())
    }

    async fn upsert(&self, user_id: UserId, token: &str) -> AuthResult<()> {
        let mut tables = self.lock();

        match tables.refresh_tokens.iter_mut().find(|t| t.user_id == user_id) {
            Some(row) => row.token = token.to_string(),
            None => tables.refresh_tokens.push(RefreshTokenInfo {
                user_id,
                token: token.to_string(),
            }),
        }

        Ok(())
    }

    async fn replace_for_user(&self, user_id: UserId, token: &str) -> AuthResult<bool> {
        let mut tables = self.lock();

        match tables.refresh_tokens.iter_mut().find(|t| t.user_id == user_id) {
            Some(row) => {
                row.token = token.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
