//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Register
// ============================================================================

/// Register request
///
/// Unknown fields are rejected so client typos surface as validation errors.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("phone", &self.phone)
            .field("role", &self.role)
            .finish()
    }
}

/// Register response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
}

impl RegisterResponse {
    pub const MESSAGE: &'static str = "User registered successfully";

    pub fn new(user_id: impl fmt::Display) -> Self {
        Self {
            message: Self::MESSAGE.to_string(),
            user_id: user_id.to_string(),
        }
    }
}
