//! Verify Credentials Use Case
//!
//! Checks an identity/password pair against the stored hash.
//! Unknown identity and wrong password produce the same error, and an
//! unknown identity still pays for one Argon2 verification.

use std::sync::Arc;

use platform::password::CredentialHasher;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    UserId, email::Email, user_password::RawPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Verify credentials input
pub struct VerifyCredentialsInput {
    pub identity: String,
    pub password: String,
}

/// Verify credentials output
#[derive(Debug, Clone, Copy)]
pub struct VerifyCredentialsOutput {
    pub user_id: UserId,
    pub role: UserRole,
    /// Stored hash was made with weaker parameters than the current ones
    pub needs_rehash: bool,
}

/// Verify credentials use case
pub struct VerifyCredentialsUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    hasher: Arc<CredentialHasher>,
}

impl<U> VerifyCredentialsUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, hasher: Arc<CredentialHasher>) -> Self {
        Self { user_repo, hasher }
    }

    pub async fn execute(
        &self,
        input: VerifyCredentialsInput,
    ) -> AuthResult<VerifyCredentialsOutput> {
        let raw_password = RawPassword::submitted(input.password);

        // A malformed identity cannot be registered; treat it as unknown
        let user = match Email::new(&input.identity) {
            Ok(identity) => self.user_repo.find_by_identity(&identity).await?,
            Err(_) => None,
        };

        let hasher = Arc::clone(&self.hasher);
        let verified = tokio::task::spawn_blocking(move || check(user, &raw_password, &hasher))
            .await
            .map_err(|e| AuthError::Internal(format!("Verification task failed: {}", e)))?;

        let Some(output) = verified else {
            return Err(AuthError::InvalidCredentials);
        };

        if output.needs_rehash {
            tracing::info!(
                user_id = %output.user_id,
                "Stored password hash uses outdated parameters"
            );
        }

        Ok(output)
    }
}

fn check(
    user: Option<User>,
    raw_password: &RawPassword,
    hasher: &CredentialHasher,
) -> Option<VerifyCredentialsOutput> {
    match user {
        Some(user) => user
            .password_hash
            .verify(raw_password, hasher)
            .then(|| VerifyCredentialsOutput {
                user_id: user.user_id,
                role: user.role,
                needs_rehash: user.password_hash.needs_rehash(hasher),
            }),
        None => {
            hasher.verify_dummy(raw_password.inner());
            None
        }
    }
}
