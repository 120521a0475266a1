//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Requests
// ============================================================================

/// Register request. Absent fields deserialize as blank and fail validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Refresh token request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefreshTokenRequest {
    pub token: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Outcome of an operation that returns no tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralResponse {
    pub flag: bool,
    pub message: String,
}

impl GeneralResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            flag: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            flag: false,
            message: message.into(),
        }
    }
}

/// Outcome of sign-in and refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub flag: bool,
    pub message: String,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
}

impl LoginResponse {
    pub fn success(
        message: impl Into<String>,
        token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            flag: true,
            message: message.into(),
            token: Some(token.into()),
            refresh_token: Some(refresh_token.into()),
        }
    }
}

/// Claims of the bearer token on `/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}
