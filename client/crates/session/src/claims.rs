//! Session Claims
//!
//! Reads the identity claims out of an access token without verifying its
//! signature. The server is the only party that trusts a token; the client
//! only needs to know who it is signed in as.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use kernel::claims::{CLAIM_EMAIL, CLAIM_ID, CLAIM_NAME, CLAIM_ROLE};
use serde_json::{Map, Value};

use crate::error::DecodeError;

/// Identity of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Decode the four identity claims; each one is required
pub fn decode(token: &str) -> Result<SessionClaims, DecodeError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(DecodeError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    let claims: Map<String, Value> = serde_json::from_slice(&bytes)?;

    Ok(SessionClaims {
        id: claim(&claims, CLAIM_ID)?,
        name: claim(&claims, CLAIM_NAME)?,
        email: claim(&claims, CLAIM_EMAIL)?,
        role: claim(&claims, CLAIM_ROLE)?,
    })
}

fn claim(claims: &Map<String, Value>, name: &'static str) -> Result<String, DecodeError> {
    match claims.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        // Some issuers write numeric subjects
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(DecodeError::MissingClaim(name)),
    }
}
