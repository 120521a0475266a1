//! Access Token Claims
//!
//! The claim set carried by every access token. The server signs it and the
//! client reads it back, so both sides share this one definition.

use serde::{Deserialize, Serialize};

/// Subject claim: the user's numeric id, as a string
pub const CLAIM_ID: &str = "sub";
/// Full name claim
pub const CLAIM_NAME: &str = "name";
/// Email claim
pub const CLAIM_EMAIL: &str = "email";
/// Role name claim
pub const CLAIM_ROLE: &str = "role";

/// The four identity claims, in the order they are written
pub const IDENTITY_CLAIMS: [&str; 4] = [CLAIM_ID, CLAIM_NAME, CLAIM_EMAIL, CLAIM_ROLE];

/// JWT payload of an access token
///
/// Identity claims are exactly `sub`, `name`, `email` and `role`.
/// `iss`, `aud` and `exp` are the registered claims the token format needs
/// for validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User id
    pub sub: String,
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Role name ("Admin" or "User")
    pub role: String,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Expiration (Unix timestamp, seconds)
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize_with_expected_names() {
        let claims = AccessClaims {
            sub: "1".into(),
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            role: "Admin".into(),
            iss: "issuer".into(),
            aud: "audience".into(),
            exp: 0,
        };

        let value = serde_json::to_value(&claims).unwrap();
        let object = value.as_object().unwrap();

        for name in IDENTITY_CLAIMS {
            assert!(object.contains_key(name), "missing claim {name}");
        }
        assert_eq!(object.len(), IDENTITY_CLAIMS.len() + 3);
    }
}
