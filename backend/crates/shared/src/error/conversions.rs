//! Error conversions - From implementations for infrastructure error types
//!
//! Provides automatic conversion from storage/HTTP layer errors to [`AppError`].

#[cfg(any(feature = "sqlx", feature = "axum"))]
use super::app_error::AppError;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// PostgreSQL の SQLSTATE を分類
///
/// 一意制約違反は `Conflict`、接続・資源枯渇系は `ServiceUnavailable`、
/// それ以外は `InternalServerError` になります。
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
#[cfg(feature = "sqlx")]
fn classify_sqlstate(code: &str) -> AppError {
    match code {
        // Class 23: Integrity Constraint Violation
        "23505" => AppError::conflict("Duplicate key value"),
        "23502" | "23514" => AppError::internal("Constraint violation"),
        // Class 08: Connection Exception
        c if c.starts_with("08") => AppError::service_unavailable("Database connection lost"),
        // Class 53: Insufficient Resources
        c if c.starts_with("53") => AppError::service_unavailable("Database resource exhausted"),
        // Class 57: Operator Intervention
        c if c.starts_with("57") => AppError::service_unavailable("Database unavailable"),
        _ => AppError::internal("Database error"),
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::service_unavailable("Database connection pool exhausted").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                let app_err = match db_err.code() {
                    Some(code) => classify_sqlstate(code.as_ref()),
                    None => AppError::internal("Database error"),
                };
                app_err.with_source(err)
            }
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                AppError::service_unavailable("Database connection error").with_source(err)
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                AppError::internal("Stored record could not be decoded").with_source(err)
            }
            _ => AppError::internal("Database error").with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::{StatusCode, header};

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "reason": self.reason(),
            "action": self.action(),
        });

        let mut response = (status, Json(body)).into_response();
        if self.kind().is_retryable() {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, http::HeaderValue::from_static("1"));
        }
        response
    }
}
