//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use std::sync::Arc;

use platform::password::CredentialHasher;

use crate::application::config::AuthConfig;
use crate::application::{RegisterInput, RegisterUseCase};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{RegisterRequest, RegisterResponse};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub hasher: Arc<CredentialHasher>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    /// Build state, deriving the hasher from `config`
    pub fn new(repo: R, config: AuthConfig) -> AuthResult<Self> {
        let hasher = config.hasher()?;
        Ok(Self {
            repo: Arc::new(repo),
            hasher: Arc::new(hasher),
            config: Arc::new(config),
        })
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    // Malformed JSON, missing or unknown fields
    let Json(req) = payload.map_err(|rejection| AuthError::Validation(rejection.body_text()))?;

    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.config.clone(),
    );

    let input = RegisterInput {
        identity: req.email,
        password: req.password,
        phone: req.phone,
        role: req.role,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse::new(output.user_id)),
    ))
}
