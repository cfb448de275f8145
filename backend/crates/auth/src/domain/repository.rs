//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! `insert_if_absent` is the only serialization point for the identity
//! uniqueness invariant: every implementation must make the existence check
//! and the insert a single atomic step (unique index, per-key lock, ...).

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::{UserId, email::Email};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by normalized identity
    async fn find_by_identity(&self, identity: &Email) -> AuthResult<Option<User>>;

    /// Persist `candidate` unless a user with the same identity exists
    ///
    /// ## Errors
    /// - `AuthError::DuplicateIdentity` if the identity is taken. Under
    ///   concurrent calls with the same identity exactly one call succeeds.
    /// - `AuthError::StorageUnavailable` on storage failure (not retried here)
    async fn insert_if_absent(&self, candidate: &NewUser) -> AuthResult<UserId>;
}

/// Test-scoped maintenance capability
///
/// Not part of the production contract and never wired to a request path.
#[cfg(any(test, feature = "test-util"))]
#[trait_variant::make(UserRepositoryFixture: Send)]
pub trait LocalUserRepositoryFixture {
    /// Remove every user record
    async fn delete_all(&self) -> AuthResult<u64>;

    /// Number of persisted users
    async fn count(&self) -> AuthResult<u64>;
}
