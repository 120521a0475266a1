//! Token Issuer
//!
//! Mints HS256 access tokens carrying the four identity claims and opaque
//! random refresh tokens.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use kernel::claims::AccessClaims;

use crate::application::config::{ACCESS_TOKEN_TTL, JwtConfig, REFRESH_TOKEN_BYTES};
use crate::domain::entity::user::User;
use crate::domain::value_object::role_name::RoleName;
use crate::error::{AuthError, AuthResult};

/// Freshly minted access + refresh token pair
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Sign an access token for `user` holding `role`, valid for 24 hours
pub fn issue_access_token(config: &JwtConfig, user: &User, role: RoleName) -> AuthResult<String> {
    let exp = Utc::now().timestamp() + ACCESS_TOKEN_TTL.as_secs() as i64;

    let claims = AccessClaims {
        sub: user.user_id.to_string(),
        name: user.full_name.as_str().to_string(),
        email: user.email.as_str().to_string(),
        role: role.as_str().to_string(),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        exp,
    };

    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(&config.key),
    )?;

    Ok(token)
}

/// 64 random bytes from the OS CSPRNG, standard base64
pub fn issue_refresh_token() -> String {
    platform::crypto::random_base64(REFRESH_TOKEN_BYTES)
}

pub fn issue_pair(config: &JwtConfig, user: &User, role: RoleName) -> AuthResult<TokenPair> {
    Ok(TokenPair {
        access_token: issue_access_token(config, user, role)?,
        refresh_token: issue_refresh_token(),
    })
}

/// Check signature, expiry, issuer and audience
pub fn verify_access_token(config: &JwtConfig, token: &str) -> AuthResult<AccessClaims> {
    let mut validation = Validation::default();
    validation.set_issuer(&[config.issuer.as_str()]);
    validation.set_audience(&[config.audience.as_str()]);
    validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

    jsonwebtoken::decode::<AccessClaims>(token, &DecodingKey::from_secret(&config.key), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "Access token rejected");
            AuthError::InvalidAccessToken
        })
}
