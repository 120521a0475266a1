//! Full Name Value Object
//!
//! The display name entered at registration and carried in the `name`
//! claim of every access token.
//!
//! ## Invariants
//! - Stored exactly as entered, minus surrounding whitespace
//! - Never blank
//! - Under [`FullName::checked`] additionally: at most
//!   [`FULL_NAME_MAX_LENGTH`] characters and no control characters

use std::fmt;
use thiserror::Error;

/// Maximum length in characters, enforced by [`FullName::checked`]
pub const FULL_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FullNameError {
    #[error("Full name is required")]
    Empty,

    #[error("Full name is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("Full name contains invalid characters")]
    InvalidCharacter,
}

/// Non-blank full name
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FullName(String);

impl FullName {
    /// Trim and reject blank input; nothing else is changed
    pub fn new(input: impl AsRef<str>) -> Result<Self, FullNameError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(FullNameError::Empty);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// [`FullName::new`] plus the length and character limits
    pub fn checked(input: impl AsRef<str>) -> Result<Self, FullNameError> {
        let name = Self::new(input)?;

        if name.0.chars().any(char::is_control) {
            return Err(FullNameError::InvalidCharacter);
        }

        let length = name.0.chars().count();
        if length > FULL_NAME_MAX_LENGTH {
            return Err(FullNameError::TooLong {
                length,
                max: FULL_NAME_MAX_LENGTH,
            });
        }

        Ok(name)
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FullName({:?})", self.0)
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
