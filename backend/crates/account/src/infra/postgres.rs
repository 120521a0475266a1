//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entity::{
    refresh_token::RefreshTokenInfo,
    role::{Role, UserRole},
    user::{NewUser, User},
};
use crate::domain::repository::{
    RefreshTokenRepository, RoleRepository, UserRepository, UserRoleRepository,
};
use crate::domain::value_object::{
    RoleId, UserId, email::Email, full_name::FullName, role_name::RoleName,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL unique-violation SQLSTATE
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION)
    )
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAccountRepository {
    async fn create(&self, user: NewUser) -> AuthResult<User> {
        let user_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (
                full_name,
                email,
                password_hash,
                created_at
            ) VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(user.full_name.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::EmailTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        Ok(user.with_id(UserId::from_raw(user_id)))
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, full_name, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        // Stored lower-case; Email is already canonical
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, full_name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }
}

// ============================================================================
// Role Repository Implementation
// ============================================================================

impl RoleRepository for PgAccountRepository {
    async fn find_by_name(&self, name: RoleName) -> AuthResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>("SELECT id, name FROM roles WHERE name = $1")
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(RoleRow::into_role).transpose()
    }

    async fn find_by_role_id(&self, role_id: RoleId) -> AuthResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>("SELECT id, name FROM roles WHERE id = $1")
            .bind(role_id.get())
            .fetch_optional(&self.pool)
            .await?;

        row.map(RoleRow::into_role).transpose()
    }

    async fn try_create(&self, name: RoleName) -> AuthResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            INSERT INTO roles (name) VALUES ($1)
            ON CONFLICT (name) DO NOTHING
            RETURNING id, name
            "#,
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(RoleRow::into_role).transpose()
    }

    async fn count(&self) -> AuthResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM roles")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }
}

// ============================================================================
// User Role Repository Implementation
// ============================================================================

impl UserRoleRepository for PgAccountRepository {
    async fn assign(&self, user_id: UserId, role_id: RoleId) -> AuthResult<UserRole> {
        let row = sqlx::query_as::<_, UserRoleRow>(
            r#"
            INSERT INTO user_roles (user_id, role_id)
            VALUES ($1, $2)
            RETURNING id, user_id, role_id
            "#,
        )
        .bind(user_id.get())
        .bind(role_id.get())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_user_role())
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AuthResult<Option<UserRole>> {
        let row = sqlx::query_as::<_, UserRoleRow>(
            r#"
            SELECT id, user_id, role_id
            FROM user_roles
            WHERE user_id = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRoleRow::into_user_role))
    }
}

// ============================================================================
// Refresh Token Repository Implementation
// ============================================================================

impl RefreshTokenRepository for PgAccountRepository {
    async fn find_by_token(&self, token: &str) -> AuthResult<Option<RefreshTokenInfo>> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            "SELECT user_id, token FROM refresh_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RefreshTokenRow::into_info))
    }

    async fn find_for_user(&self, user_id: UserId) -> AuthResult<Option<RefreshTokenInfo>> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            "SELECT user_id, token FROM refresh_tokens WHERE user_id = $1",
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RefreshTokenRow::into_info))
    }

    async fn upsert(&self, user_id: UserId, token: &str) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (user_id, token)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET token = EXCLUDED.token
            "#,
        )
        .bind(user_id.get())
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn replace_for_user(&self, user_id: UserId, token: &str) -> AuthResult<bool> {
        let updated = sqlx::query("UPDATE refresh_tokens SET token = $2 WHERE user_id = $1")
            .bind(user_id.get())
            .bind(token)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    full_name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            user_id: UserId::from_raw(self.id),
            full_name: FullName::from_db(self.full_name),
            email: Email::from_db(self.email),
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    id: i64,
    name: String,
}

impl RoleRow {
    fn into_role(self) -> AuthResult<Role> {
        Ok(Role {
            role_id: RoleId::from_raw(self.id),
            name: self.name.parse()?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserRoleRow {
    id: i64,
    user_id: i64,
    role_id: i64,
}

impl UserRoleRow {
    fn into_user_role(self) -> UserRole {
        UserRole {
            id: self.id,
            user_id: UserId::from_raw(self.user_id),
            role_id: RoleId::from_raw(self.role_id),
        }
    }
}

#[derive(sqlx::FromRow)]
struct RefreshTokenRow {
    user_id: i64,
    token: String,
}

impl RefreshTokenRow {
    fn into_info(self) -> RefreshTokenInfo {
        RefreshTokenInfo {
            user_id: UserId::from_raw(self.user_id),
            token: self.token,
        }
    }
}
