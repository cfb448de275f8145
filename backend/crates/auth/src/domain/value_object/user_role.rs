//! User Role Value Object
//!
//! The fixed set of roles an account can be registered with. Stored as a
//! stable numeric id; exchanged with clients as a lowercase code.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum UserRole {
    Rider = 0,
    Driver = 1,
    Admin = 2,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Rider, UserRole::Driver, UserRole::Admin];

    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Rider => "rider",
            Driver => "driver",
            Admin => "admin",
        }
    }

    pub fn from_id(id: i16) -> AppResult<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.id() == id)
            .ok_or_else(|| AppError::internal(format!("Invalid UserRole id: {}", id)))
    }

    /// Parse a client-supplied role code (case-insensitive)
    pub fn from_code(code: &str) -> AppResult<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| {
                AppError::bad_request(format!("Unknown role: {}", code))
                    .with_action("Use one of: rider, driver, admin")
            })
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        UserRole::from_code(s)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
