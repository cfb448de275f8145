//! PostgreSQL Repository Implementations
//!
//! Uniqueness is enforced by the `users_identity_key` unique index; the insert
//! uses `ON CONFLICT DO NOTHING` so a lost race is reported as a duplicate
//! rather than a storage error.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    UserId, email::Email, phone_number::PhoneNumber, user_password::UserPassword,
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn find_by_identity(&self, identity: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                identity,
                phone,
                password_hash,
                user_role,
                created_at
            FROM users
            WHERE identity = $1
            "#,
        )
        .bind(identity.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn insert_if_absent(&self, candidate: &NewUser) -> AuthResult<UserId> {
        let user_id = UserId::new();

        let inserted = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (
                user_id,
                identity,
                phone,
                password_hash,
                user_role,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (identity) DO NOTHING
            RETURNING user_id
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(candidate.identity.as_str())
        .bind(candidate.phone.as_ref().map(|p| p.as_str()))
        .bind(candidate.password_hash.as_phc_string())
        .bind(candidate.role.id())
        .bind(candidate.created_at)
        .fetch_optional(&self.pool)
        .await?;

        inserted
            .map(UserId::from_uuid)
            .ok_or(AuthError::DuplicateIdentity)
    }
}

#[cfg(any(test, feature = "test-util"))]
impl crate::domain::repository::UserRepositoryFixture for PgUserRepository {
    async fn delete_all(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM users")
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(users_deleted = deleted, "Deleted all users");

        Ok(deleted)
    }

    async fn count(&self) -> AuthResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    identity: String,
    phone: Option<String>,
    password_hash: String,
    user_role: i16,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password_hash: {}", e)))?;

        let role = UserRole::from_id(self.user_role)
            .map_err(|e| AuthError::Internal(format!("Invalid user_role: {}", e)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            identity: Email::from_db(self.identity),
            phone: self.phone.map(PhoneNumber::from_db),
            password_hash,
            role,
            created_at: self.created_at,
        })
    }
}
