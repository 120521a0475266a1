//! Account Service
//!
//! One handle over the account use cases, sharing a single store and config.

use std::sync::Arc;

use kernel::claims::AccessClaims;

use crate::application::config::AccountConfig;
use crate::application::refresh_token::RefreshTokenUseCase;
use crate::application::register::{RegisterInput, RegisterOutput, RegisterUseCase};
use crate::application::sign_in::{SignInInput, SignInUseCase};
use crate::application::token_issuer::{self, TokenPair};
use crate::domain::repository::AccountStore;
use crate::error::AuthResult;

pub struct AccountService<R: AccountStore> {
    repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<R: AccountStore> Clone for AccountService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R: AccountStore> AccountService<R> {
    pub fn new(repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &AccountConfig {
        &self.config
    }

    pub async fn register(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        RegisterUseCase::new(self.repo.clone(), self.repo.clone(), self.config.clone())
            .execute(input)
            .await
    }

    pub async fn sign_in(&self, input: SignInInput) -> AuthResult<TokenPair> {
        SignInUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.repo.clone(),
            self.config.clone(),
        )
        .execute(input)
        .await
    }

    pub async fn refresh_token(&self, presented: &str) -> AuthResult<TokenPair> {
        RefreshTokenUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.repo.clone(),
            self.config.clone(),
        )
        .execute(presented)
        .await
    }

    pub fn verify_access_token(&self, token: &str) -> AuthResult<AccessClaims> {
        token_issuer::verify_access_token(&self.config.jwt, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::RoleRepository;
    use crate::domain::value_object::role_name::RoleName;
    use crate::infra::memory::InMemoryAccountRepository;

    fn service() -> (AccountService<InMemoryAccountRepository>, InMemoryAccountRepository) {
        let repo = InMemoryAccountRepository::new();
        (
            AccountService::new(Arc::new(repo.clone()), Arc::new(AccountConfig::development())),
            repo,
        )
    }

    fn registration(n: usize) -> RegisterInput {
        RegisterInput {
            full_name: format!("Employee {n}"),
            email: format!("employee{n}@example.com"),
            password: "Tr0ub4dor&3x".into(),
        }
    }

    #[tokio::test]
    async fn test_full_account_lifecycle() {
        let (service, _repo) = service();

        let registered = service.register(registration(1)).await.unwrap();
        assert_eq!(registered.role, RoleName::Admin);

        let pair = service
            .sign_in(SignInInput {
                email: "employee1@example.com".into(),
                password: "Tr0ub4dor&3x".into(),
            })
            .await
            .unwrap();
        let claims = service.verify_access_token(&pair.access_token).unwrap();
        assert_eq!(claims.name, "Employee 1");

        let rotated = service.refresh_token(&pair.refresh_token).await.unwrap();
        let claims = service.verify_access_token(&rotated.access_token).unwrap();
        assert_eq!(claims.email, "employee1@example.com");
    }

    #[tokio::test]
    async fn test_concurrent_registrations_share_two_roles() {
        let (service, repo) = service();

        let mut handles = Vec::new();
        for n in 0..6 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.register(registration(n)).await.unwrap().role
            }));
        }

        let mut admins = 0;
        for handle in handles {
            if handle.await.unwrap() == RoleName::Admin {
                admins += 1;
            }
        }

        assert_eq!(admins, 1);
        assert!(repo.count().await.unwrap() <= 2);
    }
}
