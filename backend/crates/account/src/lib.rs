//! Account Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, token issuer, role store
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router, bearer-token middleware
//!
//! ## Features
//! - Registration with email + password; the first account becomes Admin
//! - Sign-in issuing a 24 hour HS256 access token and an opaque refresh token
//! - Refresh-token rotation (one live refresh token per user)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application pepper
//! - Refresh tokens are 64 bytes from the OS CSPRNG
//! - Sign-out is client-side only; the stored refresh token stays valid
//!   until the next sign-in or refresh replaces it

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{AccountConfig, AccountService, JwtConfig, TokenPair};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAccountRepository, PgAccountRepository};
pub use presentation::router::{account_router, account_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
