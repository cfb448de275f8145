//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Machine-readable `reason` values in error bodies
pub mod reason {
    pub const VALIDATION: &str = "validation";
    pub const DUPLICATE: &str = "duplicate";
    pub const INVALID_CREDENTIALS: &str = "invalid_credentials";
    pub const UNAVAILABLE: &str = "unavailable";
    pub const INTERNAL: &str = "internal";
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed input (bad email, weak password, unknown role, bad request body)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Identity already registered
    #[error("Email is already registered")]
    DuplicateIdentity,

    /// Hashing precondition violated
    #[error("Credential could not be processed: {0}")]
    Credential(String),

    /// Identity/password pair does not match a registered user
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Storage transport or engine failure; retryable
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(AppError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) | AuthError::DuplicateIdentity | AuthError::Credential(_) => {
                StatusCode::BAD_REQUEST
            }
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::DuplicateIdentity | AuthError::Credential(_) => {
                ErrorKind::BadRequest
            }
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::StorageUnavailable(_) => ErrorKind::ServiceUnavailable,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Machine-readable classification for clients
    ///
    /// Credential errors are reported as validation failures.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::Validation(_) | AuthError::Credential(_) => reason::VALIDATION,
            AuthError::DuplicateIdentity => reason::DUPLICATE,
            AuthError::InvalidCredentials => reason::INVALID_CREDENTIALS,
            AuthError::StorageUnavailable(_) => reason::UNAVAILABLE,
            AuthError::Internal(_) => reason::INTERNAL,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side details stay in the logs; clients see a fixed message.
    pub fn to_app_error(&self) -> AppError {
        let err = match self {
            AuthError::Validation(msg) => AppError::bad_request(msg.clone())
                .with_action("Correct the highlighted input and try again"),
            AuthError::Credential(_) => AppError::bad_request("Password could not be accepted")
                .with_action("Choose a different password"),
            AuthError::DuplicateIdentity => AppError::bad_request(self.to_string())
                .with_action("Sign in instead, or register with a different email"),
            AuthError::InvalidCredentials => AppError::unauthorized(self.to_string()),
            AuthError::StorageUnavailable(_) => {
                AppError::service_unavailable("Service temporarily unavailable")
                    .with_action("Please retry shortly")
            }
            AuthError::Internal(_) => AppError::internal("Internal server error"),
        };
        err.with_reason(self.reason())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::StorageUnavailable(e) => {
                tracing::warn!(error = %e, "Auth storage unavailable");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid credential check");
            }
            _ => {
                tracing::debug!(error = %self, "Auth request rejected");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::Error> for AuthError {
    /// Unique violations are the storage-level duplicate signal. Transport and
    /// resource failures are unavailable; decode errors, other constraint
    /// violations and schema errors are internal.
    fn from(err: sqlx::Error) -> Self {
        let app_err = AppError::from(err);
        match app_err.kind() {
            ErrorKind::Conflict => AuthError::DuplicateIdentity,
            ErrorKind::ServiceUnavailable => AuthError::StorageUnavailable(app_err),
            _ => AuthError::Internal(app_err.to_string()),
        }
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        match err {
            PasswordHashError::EmptyInput | PasswordHashError::HashingFailed(_) => {
                AuthError::Credential(err.to_string())
            }
            PasswordHashError::InvalidParams(_) | PasswordHashError::InvalidHashFormat => {
                AuthError::Internal(err.to_string())
            }
        }
    }
}
