//! Email Value Object
//!
//! Login identifier. Stored in canonical lower-case form, which makes
//! uniqueness and lookups case-insensitive.

use kernel::error::app_error::{AppError, AppResult};
use std::fmt;
use std::str::FromStr;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Maximum local-part length (per RFC 5321)
const LOCAL_PART_MAX_LENGTH: usize = 64;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Trim and lower-case an address; only blank input is rejected
    pub fn new(email: impl AsRef<str>) -> AppResult<Self> {
        let email = email.as_ref().trim().to_lowercase();

        if email.is_empty() {
            return Err(AppError::bad_request("Email is required"));
        }

        Ok(Self(email))
    }

    /// [`Email::new`] plus length and structural checks
    pub fn checked(email: impl AsRef<str>) -> AppResult<Self> {
        let email = Self::new(email)?;

        if email.0.len() > EMAIL_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Email must be at most {} characters",
                EMAIL_MAX_LENGTH
            )));
        }

        if !Self::is_valid_format(&email.0) {
            return Err(AppError::bad_request("Invalid email format")
                .with_action("Please enter a valid email address"));
        }

        Ok(email)
    }

    /// Structural check only; deliverability is not verified
    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty() || local.len() > LOCAL_PART_MAX_LENGTH || domain.contains('@') {
            return false;
        }
        if local.chars().any(char::is_whitespace) {
            return false;
        }

        !domain.is_empty()
            && domain.contains('.')
            && domain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
            && !domain.starts_with(['.', '-'])
            && !domain.ends_with(['.', '-'])
            && !domain.contains("..")
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for Email {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Email::new(s)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::checked("user@example.com").is_ok());
        assert!(Email::checked("user.name@example.co.jp").is_ok());
        assert!(Email::checked("user+tag@example.com").is_ok());
        assert!(Email::checked("  padded@example.com ").is_ok());
    }

    #[test]
    fn test_new_rejects_only_blank() {
        assert!(Email::new("   ").is_err());
        assert_eq!(Email::new("Ada@LocalHost").unwrap().as_str(), "ada@localhost");
        assert!(Email::checked("ada@localhost").is_err());
    }

    #[test]
    fn test_email_invalid() {
        assert!(Email::checked("").is_err());
        assert!(Email::checked("userexample.com").is_err());
        assert!(Email::checked("user@").is_err());
        assert!(Email::checked("@example.com").is_err());
        assert!(Email::checked("user@@example.com").is_err());
        assert!(Email::checked("user@example").is_err());
        assert!(Email::checked("user@.example.com").is_err());
        assert!(Email::checked("user@example..com").is_err());
        assert!(Email::checked("us er@example.com").is_err());
    }

    #[test]
    fn test_email_case_normalization() {
        let email = Email::new("Ada.Lovelace@Example.COM").unwrap();
        assert_eq!(email.as_str(), "ada.lovelace@example.com");
        assert_eq!(email, Email::new("ada.lovelace@example.com").unwrap());
    }
}
