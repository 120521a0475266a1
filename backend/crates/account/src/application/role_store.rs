//! Role Store
//!
//! Lazy, idempotent creation of the two well-known roles and user-role links.

use std::sync::Arc;

use crate::domain::entity::role::{Role, UserRole};
use crate::domain::repository::{RoleRepository, UserRoleRepository};
use crate::domain::value_object::{RoleId, UserId, role_name::RoleName};
use crate::error::{AuthError, AuthResult};

/// Attempts at get-or-create before giving up on a role
const ENSURE_ROLE_ATTEMPTS: usize = 3;

pub struct RoleStore<R>
where
    R: RoleRepository + UserRoleRepository,
{
    repo: Arc<R>,
}

impl<R> RoleStore<R>
where
    R: RoleRepository + UserRoleRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Get the role with this exact name, creating it if absent
    pub async fn ensure_role(&self, name: RoleName) -> AuthResult<Role> {
        for attempt in 1..=ENSURE_ROLE_ATTEMPTS {
            if let Some(role) = self.repo.find_by_name(name).await? {
                return Ok(role);
            }

            if let Some(role) = self.repo.try_create(name).await? {
                tracing::info!(role = %name, role_id = %role.role_id, "Role created");
                return Ok(role);
            }

            // Another writer inserted it between our read and insert
            tracing::debug!(role = %name, attempt, "Role insert lost a race, re-reading");
        }

        Err(AuthError::Internal(format!(
            "Role {name} could not be resolved after {ENSURE_ROLE_ATTEMPTS} attempts"
        )))
    }

    /// Role for a new registrant.
    ///
    /// Whoever creates the "Admin" row is the first registrant; the unique
    /// name constraint guarantees there is exactly one such caller.
    pub async fn ensure_first_admin(&self) -> AuthResult<Role> {
        if let Some(admin) = self.repo.try_create(RoleName::Admin).await? {
            tracing::info!(role_id = %admin.role_id, "First registrant, granting Admin");
            return Ok(admin);
        }

        self.ensure_role(RoleName::User).await
    }

    /// Link a user to a role. Does not check for an existing link.
    pub async fn assign_role(&self, user_id: UserId, role_id: RoleId) -> AuthResult<UserRole> {
        self.repo.assign(user_id, role_id).await
    }

    /// Resolve the role name a user holds
    pub async fn role_of(&self, user_id: UserId) -> AuthResult<RoleName> {
        let link = self
            .repo
            .find_by_user_id(user_id)
            .await?
            .ok_or(AuthError::UserRoleNotFound)?;

        let role = self
            .repo
            .find_by_role_id(link.role_id)
            .await?
            .ok_or(AuthError::RoleNameNotFound)?;

        Ok(role.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryAccountRepository;

    fn store() -> (RoleStore<InMemoryAccountRepository>, InMemoryAccountRepository) {
        let repo = InMemoryAccountRepository::new();
        (RoleStore::new(Arc::new(repo.clone())), repo)
    }

    #[tokio::test]
    async fn test_ensure_role_is_idempotent() {
        let (roles, repo) = store();

        let first = roles.ensure_role(RoleName::User).await.unwrap();
        let second = roles.ensure_role(RoleName::User).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_first_admin_then_users() {
        let (roles, repo) = store();

        let first = roles.ensure_first_admin().await.unwrap();
        let second = roles.ensure_first_admin().await.unwrap();
        let third = roles.ensure_first_admin().await.unwrap();

        assert_eq!(first.name, RoleName::Admin);
        assert_eq!(second.name, RoleName::User);
        assert_eq!(second, third);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_first_admin_grants_one_admin() {
        let (roles, repo) = store();
        let roles = Arc::new(roles);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let roles = roles.clone();
            handles.push(tokio::spawn(async move {
                roles.ensure_first_admin().await.unwrap().name
            }));
        }

        let mut admins = 0;
        for handle in handles {
            if handle.await.unwrap().is_admin() {
                admins += 1;
            }
        }

        assert_eq!(admins, 1);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_role_of_reports_missing_link_and_role() {
        let (roles, _repo) = store();

        let err = roles.role_of(UserId::from_raw(1)).await.unwrap_err();
        assert!(matches!(err, AuthError::UserRoleNotFound));

        roles
            .assign_role(UserId::from_raw(1), RoleId::from_raw(999))
            .await
            .unwrap();
        let err = roles.role_of(UserId::from_raw(1)).await.unwrap_err();
        assert!(matches!(err, AuthError::RoleNameNotFound));
    }

    #[tokio::test]
    async fn test_role_of_uses_link_role_id() {
        let (roles, _repo) = store();

        let admin = roles.ensure_role(RoleName::Admin).await.unwrap();
        let user = roles.ensure_role(RoleName::User).await.unwrap();

        // Burn link ids so the link row id differs from the role id
        for n in 100..103 {
            roles.assign_role(UserId::from_raw(n), admin.role_id).await.unwrap();
        }
        roles.assign_role(UserId::from_raw(5), user.role_id).await.unwrap();

        assert_eq!(roles.role_of(UserId::from_raw(5)).await.unwrap(), RoleName::User);
    }
}
