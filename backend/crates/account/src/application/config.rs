//! Application Configuration
//!
//! Configuration for the account application layer.

use std::time::Duration;

/// Access tokens expire this long after issuance
pub const ACCESS_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

/// Refresh tokens are this many random bytes before encoding
pub const REFRESH_TOKEN_BYTES: usize = 64;

/// JWT signing settings
#[derive(Clone)]
pub struct JwtConfig {
    /// Symmetric HS256 key
    pub key: Vec<u8>,
    pub issuer: String,
    pub audience: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("key", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            key: Vec::new(),
            issuer: "employee-management".to_string(),
            audience: "employee-management-client".to_string(),
        }
    }
}

/// Account application configuration
#[derive(Debug, Clone, Default)]
pub struct AccountConfig {
    pub jwt: JwtConfig,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Apply email format, name length and password policy checks at
    /// registration. Off: only blank input is rejected.
    pub enforce_input_policy: bool,
}

impl AccountConfig {
    /// Create config with a random signing key (for development and tests)
    pub fn development() -> Self {
        let key = platform::crypto::random_bytes(32);
        Self {
            jwt: JwtConfig {
                key,
                ..Default::default()
            },
            password_pepper: None,
            enforce_input_policy: false,
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_key_is_random() {
        let a = AccountConfig::development();
        let b = AccountConfig::development();
        assert_eq!(a.jwt.key.len(), 32);
        assert_ne!(a.jwt.key, b.jwt.key);
        assert!(a.pepper().is_none());
        assert!(!a.enforce_input_policy);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AccountConfig::development();
        let debug = format!("{:?}", config);
        assert!(debug.contains("[REDACTED]"));
    }
}
