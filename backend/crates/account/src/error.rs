//! Account Error Types
//!
//! One variant per failure of the account operations, grouped into the four
//! outcome categories (validation, conflict, not found, authentication) plus
//! infrastructure failures. Outcome failures are reported to callers as
//! `flag: false` bodies; infrastructure failures propagate as 5xx.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::presentation::dto::GeneralResponse;

/// Account-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing, blank or malformed input
    #[error("{0}")]
    Validation(String),

    #[error("Email already in use")]
    EmailTaken,

    #[error("Email not found")]
    EmailNotFound,

    #[error("Password incorrect")]
    PasswordIncorrect,

    #[error("User role not found")]
    UserRoleNotFound,

    #[error("Role name not found")]
    RoleNameNotFound,

    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("User not found")]
    UserNotFound,

    /// The user's refresh-token row vanished between lookup and rotation
    #[error("Refresh token failed to generate")]
    RefreshTokenRotationFailed,

    /// Missing, malformed, expired or foreign access token
    #[error("Invalid access token")]
    InvalidAccessToken,

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::EmailNotFound
            | AuthError::UserRoleNotFound
            | AuthError::RoleNameNotFound
            | AuthError::RefreshTokenNotFound
            | AuthError::UserNotFound
            | AuthError::RefreshTokenRotationFailed => ErrorKind::NotFound,
            AuthError::PasswordIncorrect | AuthError::InvalidAccessToken => {
                ErrorKind::Unauthorized
            }
            AuthError::Token(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// True for failures reported as an outcome body rather than a fault
    pub fn is_outcome(&self) -> bool {
        !matches!(
            self,
            AuthError::InvalidAccessToken
                | AuthError::Token(_)
                | AuthError::Database(_)
                | AuthError::Internal(_)
        )
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => tracing::error!(error = %e, "Account database error"),
            AuthError::Token(e) => tracing::error!(error = %e, "Token signing error"),
            AuthError::Internal(msg) => tracing::error!(message = %msg, "Account internal error"),
            AuthError::PasswordIncorrect => tracing::warn!("Invalid login attempt"),
            AuthError::RefreshTokenNotFound => tracing::warn!("Unknown refresh token presented"),
            _ => tracing::debug!(error = %self, "Account error"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();

        if self.is_outcome() {
            let status = self.status_code();
            return (status, Json(GeneralResponse::failure(self.to_string()))).into_response();
        }

        match self {
            // Let the kernel classify store failures (pool exhaustion -> 503, ...)
            AuthError::Database(e) => AppError::from(e).into_response(),
            other => other.to_app_error().into_response(),
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<crate::domain::value_object::full_name::FullNameError> for AuthError {
    fn from(err: crate::domain::value_object::full_name::FullNameError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<crate::domain::value_object::role_name::UnknownRoleName> for AuthError {
    fn from(err: crate::domain::value_object::role_name::UnknownRoleName) -> Self {
        AuthError::Internal(err.to_string())
    }
}
