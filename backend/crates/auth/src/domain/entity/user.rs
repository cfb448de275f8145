//! User Entity
//!
//! The registered account. A [`NewUser`] is a registration candidate that has
//! not been persisted yet; the repository assigns the [`UserId`] and turns it
//! into a [`User`].

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    UserId, email::Email, phone_number::PhoneNumber, user_password::UserPassword,
    user_role::UserRole,
};

/// Registration candidate (no identifier yet)
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Normalized email, unique across all users
    pub identity: Email,
    /// Optional secondary contact, not unique
    pub phone: Option<PhoneNumber>,
    /// Argon2id hash, always present
    pub password_hash: UserPassword,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(
        identity: Email,
        phone: Option<PhoneNumber>,
        password_hash: UserPassword,
        role: UserRole,
    ) -> Self {
        Self {
            identity,
            phone,
            password_hash,
            role,
            created_at: Utc::now(),
        }
    }

    /// Attach the identifier assigned by the repository
    pub fn into_user(self, user_id: UserId) -> User {
        User {
            user_id,
            identity: self.identity,
            phone: self.phone,
            password_hash: self.password_hash,
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// Persisted user
///
/// Immutable once created.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub identity: Email,
    pub phone: Option<PhoneNumber>,
    pub password_hash: UserPassword,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}
