//! In-Memory Repository Implementation
//!
//! Used for local development without a database and by the test suite.
//! `DashMap::entry` holds the shard write lock for the whole
//! check-and-insert, which makes `insert_if_absent` atomic.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserId, email::Email};
use crate::error::{AuthError, AuthResult};

/// In-memory user repository keyed by normalized identity
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<DashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn find_by_identity(&self, identity: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .get(identity.as_str())
            .map(|entry| entry.value().clone()))
    }

    async fn insert_if_absent(&self, candidate: &NewUser) -> AuthResult<UserId> {
        match self.users.entry(candidate.identity.as_str().to_owned()) {
            Entry::Occupied(_) => Err(AuthError::DuplicateIdentity),
            Entry::Vacant(slot) => {
                let user_id = UserId::new();
                slot.insert(candidate.clone().into_user(user_id));
                Ok(user_id)
            }
        }
    }
}

#[cfg(any(test, feature = "test-util"))]
impl crate::domain::repository::UserRepositoryFixture for InMemoryUserRepository {
    async fn delete_all(&self) -> AuthResult<u64> {
        let deleted = self.users.len() as u64;
        self.users.clear();
        Ok(deleted)
    }

    async fn count(&self) -> AuthResult<u64> {
        Ok(self.users.len() as u64)
    }
}
