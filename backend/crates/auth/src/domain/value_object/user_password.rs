//! User Password Value Object
//!
//! Domain value object for user passwords.
//! Delegates to `platform::password` for policy and cryptographic operations.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//! use platform::password::{CredentialHasher, HashingParams, PasswordPolicy};
//!
//! let hasher = CredentialHasher::new(HashingParams::insecure_fast(), None).unwrap();
//! let raw = RawPassword::new("MySecurePass123!".to_string(), &PasswordPolicy::default()).unwrap();
//!
//! let hashed = UserPassword::from_raw(&raw, &hasher).unwrap();
//! assert!(hashed.verify(&raw, &hasher));
//! ```

use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
use platform::password::{
    ClearTextPassword, CredentialHasher, HashedPassword, PasswordHashError, PasswordPolicy,
    PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password, enforcing `policy`
    ///
    /// ## Errors
    /// Returns a `BadRequest` `AppError` with a user-facing message
    pub fn new(raw: String, policy: &PasswordPolicy) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw, policy).map_err(|e| match e {
            PasswordPolicyError::TooShort { .. } => {
                AppError::bad_request(e.to_string()).with_action("Please choose a longer password")
            }
            PasswordPolicyError::TooLong { .. } => {
                AppError::bad_request(e.to_string()).with_action("Please choose a shorter password")
            }
            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
                    .with_action("Please enter a password")
            }
            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
                    .with_action("Please remove any special control characters")
            }
            PasswordPolicyError::CommonPattern => AppError::bad_request(e.to_string())
                .with_action("Please choose a more unique password"),
        })?;

        Ok(Self(clear_text))
    }

    /// Password submitted for a credential check; no policy applied
    pub fn submitted(raw: String) -> Self {
        Self(ClearTextPassword::submitted(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage
///
/// Argon2id PHC string. Safe to store; never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated raw password
    pub fn from_raw(
        raw: &RawPassword,
        hasher: &CredentialHasher,
    ) -> Result<Self, PasswordHashError> {
        hasher.hash(raw.inner()).map(Self)
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string).map_err(|_| {
            AppError::new(
                ErrorKind::InternalServerError,
                "Invalid password hash in database",
            )
        })?;

        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash
    pub fn verify(&self, raw: &RawPassword, hasher: &CredentialHasher) -> bool {
        hasher.verify(raw.inner(), &self.0)
    }

    /// Whether the hash was made with outdated cost parameters
    pub fn needs_rehash(&self, hasher: &CredentialHasher) -> bool {
        hasher.needs_rehash(&self.0)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
