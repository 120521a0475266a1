//! Application Layer
//!
//! Use cases and application services.

pub mod account_service;
pub mod config;
pub mod refresh_token;
pub mod register;
pub mod role_store;
pub mod sign_in;
pub mod token_issuer;

// Re-exports
pub use account_service::AccountService;
pub use config::{AccountConfig, JwtConfig};
pub use refresh_token::RefreshTokenUseCase;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use role_store::RoleStore;
pub use sign_in::{SignInInput, SignInUseCase};
pub use token_issuer::TokenPair;
