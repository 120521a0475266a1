//! Session Error Types

use thiserror::Error;

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The backing key-value store failed
    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why an access token could not be turned into session claims
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not three dot-separated segments
    #[error("Token is not a JWT")]
    Malformed,

    #[error("Token payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Token payload is not a JSON object: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Token is missing the {0} claim")]
    MissingClaim(&'static str),
}
