use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two well-known role names. No other role is ever created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleName {
    /// Granted to the first account registered system-wide
    Admin,
    /// Granted to every later account
    User,
}

impl RoleName {
    /// Exact name stored in the `roles` table and written to the `role` claim
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            RoleName::Admin => "Admin",
            RoleName::User => "User",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, RoleName::Admin)
    }
}

/// A role name that is neither "Admin" nor "User"
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role name: {0}")]
pub struct UnknownRoleName(pub String);

impl FromStr for RoleName {
    type Err = UnknownRoleName;

    /// Exact, case-sensitive match
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(RoleName::Admin),
            "User" => Ok(RoleName::User),
            other => {
                tracing::error!(role = other, "Invalid role name");
                Err(UnknownRoleName(other.to_string()))
            }
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_roundtrip() {
        for role in [RoleName::Admin, RoleName::User] {
            assert_eq!(role.as_str().parse::<RoleName>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_name_is_case_sensitive() {
        assert!("admin".parse::<RoleName>().is_err());
        assert!("USER".parse::<RoleName>().is_err());
        assert_eq!(
            "Moderator".parse::<RoleName>().unwrap_err(),
            UnknownRoleName("Moderator".to_string())
        );
    }

    #[test]
    fn test_role_name_display() {
        assert_eq!(RoleName::Admin.to_string(), "Admin");
        assert_eq!(RoleName::User.to_string(), "User");
        assert!(RoleName::Admin.is_admin());
        assert!(!RoleName::User.is_admin());
    }
}
