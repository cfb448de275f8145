//! Register Use Case
//!
//! Validates a registration request, hashes the password and persists the
//! user. Uniqueness of the identity is decided by the repository's atomic
//! `insert_if_absent`; there is no separate existence check.

use std::sync::Arc;

use platform::password::CredentialHasher;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    UserId,
    email::Email,
    phone_number::PhoneNumber,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    /// Email address (identity)
    pub identity: String,
    pub password: String,
    pub phone: Option<String>,
    /// Role code (`rider`, `driver`, `admin`)
    pub role: String,
}

/// Register output
#[derive(Debug, Clone, Copy)]
pub struct RegisterOutput {
    pub user_id: UserId,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    hasher: Arc<CredentialHasher>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, hasher: Arc<CredentialHasher>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            hasher,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        // Validate
        let identity = Email::new(&input.identity)?;
        let role = UserRole::from_code(&input.role)?;
        let phone = PhoneNumber::parse_optional(input.phone)?;
        let raw_password = RawPassword::new(input.password, &self.config.password_policy)?;

        // Hash before touching storage
        let password_hash = self.hash_password(raw_password).await?;

        // Persist; duplicate identities are rejected atomically here
        let candidate = NewUser::new(identity, phone, password_hash, role);
        let user_id = self.user_repo.insert_if_absent(&candidate).await?;

        tracing::info!(
            user_id = %user_id,
            role = %role,
            email_domain = %candidate.identity.domain(),
            "User registered"
        );

        Ok(RegisterOutput { user_id })
    }

    /// Argon2id is CPU and memory bound; keep it off the async workers
    async fn hash_password(&self, raw_password: RawPassword) -> AuthResult<UserPassword> {
        let hasher = Arc::clone(&self.hasher);
        let hashed = tokio::task::spawn_blocking(move || {
            UserPassword::from_raw(&raw_password, &hasher)
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Hashing task failed: {}", e)))??;

        Ok(hashed)
    }
}
