//! Bearer Token Middleware
//!
//! Guards routes that need a signed-in caller. Verified claims are stored in
//! the request extensions for downstream handlers.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};

use crate::domain::repository::AccountStore;
use crate::error::{AuthError, AuthResult};
use crate::presentation::handlers::AccountAppState;

/// Middleware that requires a valid access token
pub async fn require_access_token<R: AccountStore>(
    State(state): State<AccountAppState<R>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request<Body>,
    next: Next,
) -> AuthResult<Response> {
    let TypedHeader(authorization) = bearer.ok_or(AuthError::InvalidAccessToken)?;

    let claims = state.service.verify_access_token(authorization.token())?;
    tracing::debug!(user_id = %claims.sub, "Access token accepted");

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
