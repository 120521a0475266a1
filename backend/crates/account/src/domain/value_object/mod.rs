//! Value Object Module

pub mod email;
pub mod full_name;
pub mod role_name;
pub mod user_password;

pub use kernel::id::{RoleId, UserId};
