//! HTTP Handlers

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};
use kernel::claims::AccessClaims;

use crate::application::{AccountService, RegisterInput, SignInInput};
use crate::domain::repository::AccountStore;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CurrentUserResponse, GeneralResponse, LoginRequest, LoginResponse, RefreshTokenRequest,
    RegisterRequest,
};

/// Shared state for account handlers
pub struct AccountAppState<R: AccountStore> {
    pub service: AccountService<R>,
}

impl<R: AccountStore> Clone for AccountAppState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

/// Unwrap a JSON body; a `null`, empty or unparsable body is a validation outcome
fn payload<T>(body: Result<Json<T>, JsonRejection>) -> AuthResult<T> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Request body rejected");
            Err(AuthError::Validation("Model is null".to_string()))
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/authentication/register
pub async fn register<R: AccountStore>(
    State(state): State<AccountAppState<R>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<Json<GeneralResponse>> {
    let req = payload(body)?;
    let output = state
        .service
        .register(RegisterInput {
            full_name: req.full_name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(GeneralResponse::success(output.message())))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/authentication/login
pub async fn login<R: AccountStore>(
    State(state): State<AccountAppState<R>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<LoginResponse>> {
    let req = payload(body)?;
    let pair = state
        .service
        .sign_in(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse::success(
        "Login successfully",
        pair.access_token,
        pair.refresh_token,
    )))
}

// ============================================================================
// Refresh Token
// ============================================================================

/// POST /api/authentication/refresh-token
pub async fn refresh_token<R: AccountStore>(
    State(state): State<AccountAppState<R>>,
    body: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> AuthResult<Json<LoginResponse>> {
    let req = payload(body)?;
    let pair = state.service.refresh_token(&req.token).await?;

    Ok(Json(LoginResponse::success(
        "Token refreshed successfully",
        pair.access_token,
        pair.refresh_token,
    )))
}

// ============================================================================
// Current User (requires authentication)
// ============================================================================

/// GET /api/authentication/me
pub async fn me(Extension(claims): Extension<AccessClaims>) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        id: claims.sub,
        name: claims.name,
        email: claims.email,
        role: claims.role,
    })
}
