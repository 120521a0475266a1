//! Role Entities
//!
//! `Role` rows are unique by name; `UserRole` links one user to one role.

use crate::domain::value_object::{RoleId, UserId, role_name::RoleName};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Role {
    pub role_id: RoleId,
    pub name: RoleName,
}

/// User-to-role assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserRole {
    /// Row id of the link itself
    pub id: i64,
    pub user_id: UserId,
    pub role_id: RoleId,
}
