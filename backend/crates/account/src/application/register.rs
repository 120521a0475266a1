//! Register Use Case
//!
//! Creates a new account and grants it a role.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::role_store::RoleStore;
use crate::domain::entity::user::NewUser;
use crate::domain::repository::{RoleRepository, UserRepository, UserRoleRepository};
use crate::domain::value_object::{
    UserId,
    email::Email,
    full_name::FullName,
    role_name::RoleName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user_id: UserId,
    pub role: RoleName,
}

impl RegisterOutput {
    pub fn message(&self) -> &'static str {
        match self.role {
            RoleName::Admin => "Account registered",
            RoleName::User => "Account created",
        }
    }
}

/// Register use case
pub struct RegisterUseCase<U, R>
where
    U: UserRepository,
    R: RoleRepository + UserRoleRepository,
{
    user_repo: Arc<U>,
    roles: RoleStore<R>,
    config: Arc<AccountConfig>,
}

impl<U, R> RegisterUseCase<U, R>
where
    U: UserRepository,
    R: RoleRepository + UserRoleRepository,
{
    pub fn new(user_repo: Arc<U>, role_repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self {
            user_repo,
            roles: RoleStore::new(role_repo),
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        require("Full name", &input.full_name)?;
        require("Email", &input.email)?;
        require("Password", &input.password)?;

        let strict = self.config.enforce_input_policy;

        let full_name = if strict {
            FullName::checked(&input.full_name)?
        } else {
            FullName::new(&input.full_name)?
        };
        let email = if strict {
            Email::checked(&input.email)?
        } else {
            Email::new(&input.email)?
        };

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let raw_password = if strict {
            RawPassword::new(input.password)?
        } else {
            RawPassword::presented(input.password)
        };
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        // A concurrent duplicate past the check above surfaces as EmailTaken here
        let user = self
            .user_repo
            .create(NewUser::new(full_name, email, password_hash))
            .await?;

        // No transaction: a failure below leaves the user without a role
        let role = self.roles.ensure_first_admin().await?;
        self.roles.assign_role(user.user_id, role.role_id).await?;

        tracing::info!(
            user_id = %user.user_id,
            role = %role.name,
            "Account registered"
        );

        Ok(RegisterOutput {
            user_id: user.user_id,
            role: role.name,
        })
    }
}

/// Reject absent or whitespace-only input
pub(crate) fn require(field: &str, value: &str) -> AuthResult<()> {
    if value.trim().is_empty() {
        return Err(AuthError::Validation(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryAccountRepository;

    type Register = RegisterUseCase<InMemoryAccountRepository, InMemoryAccountRepository>;

    fn use_case_with(config: AccountConfig) -> (Register, InMemoryAccountRepository) {
        let repo = InMemoryAccountRepository::new();
        let shared = Arc::new(repo.clone());
        (
            RegisterUseCase::new(shared.clone(), shared, Arc::new(config)),
            repo,
        )
    }

    fn use_case() -> (Register, InMemoryAccountRepository) {
        use_case_with(AccountConfig::development())
    }

    fn input(full_name: &str, email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            full_name: full_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_first_registrant_is_admin() {
        let (register, _repo) = use_case();

        let first = register
            .execute(input("Ada Lovelace", "ada@example.com", "Tr0ub4dor&3x"))
            .await
            .unwrap();
        let second = register
            .execute(input("Alan Turing", "alan@example.com", "Tr0ub4dor&3x"))
            .await
            .unwrap();

        assert_eq!(first.role, RoleName::Admin);
        assert_eq!(first.message(), "Account registered");
        assert_eq!(second.role, RoleName::User);
        assert_eq!(second.message(), "Account created");
        assert_ne!(first.user_id, second.user_id);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let (register, repo) = use_case();

        register
            .execute(input("Ada Lovelace", "ada@example.com", "Tr0ub4dor&3x"))
            .await
            .unwrap();
        let err = register
            .execute(input("Someone Else", "ADA@Example.com", "Tr0ub4dor&3x"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(err.to_string(), "Email already in use");
        assert_eq!(repo.user_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_fields_are_rejected() {
        let (register, repo) = use_case();

        for (name, email, password) in [
            ("", "ada@example.com", "Tr0ub4dor&3x"),
            ("Ada", "   ", "Tr0ub4dor&3x"),
            ("Ada", "ada@example.com", ""),
        ] {
            let err = register.execute(input(name, email, password)).await.unwrap_err();
            assert!(matches!(err, AuthError::Validation(_)), "{err:?}");
        }

        assert!(
            repo.find_by_email(&Email::new("ada@example.com").unwrap())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_only_blank_input_is_rejected_by_default() {
        let (register, repo) = use_case();

        for (name, email, password) in [
            ("Ada", "ada@localhost", "secret1"),
            ("Alan", "alan@example.com", "password"),
            (&*"x".repeat(101), "x@example.com", "Tr0ub4dor&3x"),
        ] {
            register.execute(input(name, email, password)).await.unwrap();
        }

        assert_eq!(repo.user_count(), 3);
    }

    #[tokio::test]
    async fn test_short_password_can_sign_in_after_register() {
        let (register, repo) = use_case();
        register
            .execute(input("Ada", "ada@localhost", "secret1"))
            .await
            .unwrap();

        let user = repo
            .find_by_email(&Email::new("ada@localhost").unwrap())
            .await
            .unwrap()
            .unwrap();
        let presented = RawPassword::presented("secret1".into());
        assert!(user.password_hash.verify(&presented, None));
    }

    #[tokio::test]
    async fn test_policy_switch_rejects_malformed_input() {
        let (register, repo) = use_case_with(AccountConfig {
            enforce_input_policy: true,
            ..AccountConfig::development()
        });

        for (name, email, password) in [
            ("Ada", "not-an-email", "Tr0ub4dor&3x"),
            ("Ada", "ada@localhost", "Tr0ub4dor&3x"),
            ("Ada", "ada@example.com", "short"),
            (&*"x".repeat(101), "ada@example.com", "Tr0ub4dor&3x"),
        ] {
            let err = register.execute(input(name, email, password)).await.unwrap_err();
            assert!(matches!(err, AuthError::Validation(_)), "{err:?}");
        }

        assert_eq!(repo.user_count(), 0);
    }

    #[tokio::test]
    async fn test_each_user_gets_one_link() {
        let (register, repo) = use_case();

        let out = register
            .execute(input("Ada Lovelace", "ada@example.com", "Tr0ub4dor&3x"))
            .await
            .unwrap();

        let link = repo.find_by_user_id(out.user_id).await.unwrap().unwrap();
        let role = repo.find_by_role_id(link.role_id).await.unwrap().unwrap();
        assert_eq!(role.name, RoleName::Admin);
    }
}
