//! User Entity
//!
//! A registered account. Immutable after registration.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    UserId, email::Email, full_name::FullName, user_password::UserPassword,
};

/// Persisted user
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identity
    pub user_id: UserId,
    pub full_name: FullName,
    /// Unique, canonical lower-case
    pub email: Email,
    /// Argon2id hash
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
}

/// A user about to be inserted; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: FullName,
    pub email: Email,
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(full_name: FullName, email: Email, password_hash: UserPassword) -> Self {
        Self {
            full_name,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }

    /// Attach the identity assigned on insert
    pub fn with_id(self, user_id: UserId) -> User {
        User {
            user_id,
            full_name: self.full_name,
            email: self.email,
            password_hash: self.password_hash,
            created_at: self.created_at,
        }
    }
}
