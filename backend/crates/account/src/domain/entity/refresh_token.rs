//! Refresh Token Entity
//!
//! At most one live refresh token per user. The row is written only through
//! `RefreshTokenRepository::upsert` and `RefreshTokenRepository::replace_for_user`.

use std::fmt;

use crate::domain::value_object::UserId;

#[derive(Clone, PartialEq, Eq)]
pub struct RefreshTokenInfo {
    pub user_id: UserId,
    /// Opaque base64 token
    pub token: String,
}

impl fmt::Debug for RefreshTokenInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshTokenInfo")
            .field("user_id", &self.user_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
