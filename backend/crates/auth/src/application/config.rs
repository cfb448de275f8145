//! Application Configuration
//!
//! Configuration for the Auth application layer.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{CredentialHasher, HashingParams, PasswordHashError, PasswordPolicy};

/// Auth application configuration
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// Rules new passwords must satisfy
    pub password_policy: PasswordPolicy,
    /// Argon2id cost for new hashes
    pub hashing: HashingParams,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    /// Cheap hashing for development and tests
    pub fn development() -> Self {
        Self {
            hashing: HashingParams::insecure_fast(),
            ..Self::default()
        }
    }

    /// Read overrides from the process environment
    ///
    /// | Variable | Effect |
    /// |---|---|
    /// | `PASSWORD_HASH_MEMORY_KIB` | Argon2 memory cost |
    /// | `PASSWORD_HASH_ITERATIONS` | Argon2 passes |
    /// | `PASSWORD_HASH_PARALLELISM` | Argon2 lanes |
    /// | `PASSWORD_MIN_LENGTH` | Minimum password length |
    /// | `PASSWORD_STRICT_POLICY` | `true` rejects common passwords |
    /// | `PASSWORD_PEPPER` | Application-wide pepper |
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AuthConfig::from_env`] with an injectable variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(v) = parse_var(&lookup, "PASSWORD_HASH_MEMORY_KIB")? {
            config.hashing.memory_kib = v;
        }
        if let Some(v) = parse_var(&lookup, "PASSWORD_HASH_ITERATIONS")? {
            config.hashing.iterations = v;
        }
        if let Some(v) = parse_var(&lookup, "PASSWORD_HASH_PARALLELISM")? {
            config.hashing.parallelism = v;
        }
        if let Some(v) = parse_var(&lookup, "PASSWORD_MIN_LENGTH")? {
            config.password_policy.min_length = v;
        }
        if let Some(v) = parse_var(&lookup, "PASSWORD_STRICT_POLICY")? {
            config.password_policy.reject_common_patterns = v;
        }
        if config.password_policy.min_length > config.password_policy.max_length {
            return Err(AppError::internal(format!(
                "PASSWORD_MIN_LENGTH must not exceed {}",
                config.password_policy.max_length
            )));
        }
        config.password_pepper = lookup("PASSWORD_PEPPER")
            .filter(|p| !p.is_empty())
            .map(String::into_bytes);

        Ok(config)
    }

    /// Build the credential hasher described by this config
    pub fn hasher(&self) -> Result<CredentialHasher, PasswordHashError> {
        CredentialHasher::new(self.hashing, self.password_pepper.clone())
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> AppResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| {
                AppError::internal(format!("Invalid value for {}", key)).with_source(e)
            })
        })
        .transpose()
}
