//! Unit tests for Auth crate
//! Registration scenarios, uniqueness under concurrency, credential check and
//! the HTTP boundary, all against the in-memory repository.

use std::sync::Arc;

use platform::password::{CredentialHasher, HashingParams};

use crate::application::config::AuthConfig;
use crate::application::{
    RegisterInput, RegisterUseCase, VerifyCredentialsInput, VerifyCredentialsUseCase,
};
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{UserRepository, UserRepositoryFixture};
use crate::domain::value_object::{UserId, email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};
use crate::infra::memory::InMemoryUserRepository;
use kernel::error::app_error::AppError;

fn config() -> AuthConfig {
    AuthConfig::development()
}

fn hasher() -> Arc<CredentialHasher> {
    Arc::new(config().hasher().unwrap())
}

fn register_use_case<R: UserRepository + Clone>(repo: &R) -> RegisterUseCase<R> {
    RegisterUseCase::new(Arc::new(repo.clone()), hasher(), Arc::new(config()))
}

fn input(email: &str, password: &str, phone: Option<&str>, role: &str) -> RegisterInput {
    RegisterInput {
        identity: email.to_string(),
        password: password.to_string(),
        phone: phone.map(str::to_string),
        role: role.to_string(),
    }
}

fn scenario_a() -> RegisterInput {
    input(
        "test@example.com",
        "password123",
        Some("+1234567890"),
        "rider",
    )
}

/// Repository whose storage is always down
#[derive(Clone)]
struct UnavailableRepository;

fn unavailable() -> AuthError {
    AuthError::StorageUnavailable(AppError::service_unavailable(
        "connection refused to db-primary:5432",
    ))
}

impl UserRepository for UnavailableRepository {
    async fn find_by_identity(&self, _identity: &Email) -> AuthResult<Option<User>> {
        Err(unavailable())
    }

    async fn insert_if_absent(&self, _candidate: &NewUser) -> AuthResult<UserId> {
        Err(unavailable())
    }
}

#[cfg(test)]
mod register_tests {
    use super::*;

    #[tokio::test]
    async fn test_register_success() {
        let repo = InMemoryUserRepository::new();
        let output = register_use_case(&repo).execute(scenario_a()).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);

        let identity = Email::new("test@example.com").unwrap();
        let user = repo.find_by_identity(&identity).await.unwrap().unwrap();
        assert_eq!(user.user_id, output.user_id);
        assert_eq!(user.role, UserRole::Rider);
        assert_eq!(user.phone.as_ref().map(|p| p.as_str()), Some("+1234567890"));
    }

    #[tokio::test]
    async fn test_password_stored_as_hash() {
        let repo = InMemoryUserRepository::new();
        register_use_case(&repo).execute(scenario_a()).await.unwrap();

        let identity = Email::new("test@example.com").unwrap();
        let user = repo.find_by_identity(&identity).await.unwrap().unwrap();
        let stored = user.password_hash.as_phc_string();

        assert_ne!(stored, "password123");
        assert!(!stored.contains("password123"));
        assert!(stored.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_duplicate_identity_rejected() {
        let repo = InMemoryUserRepository::new();
        let use_case = register_use_case(&repo);
        use_case.execute(scenario_a()).await.unwrap();

        let err = use_case.execute(scenario_a()).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateIdentity));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_identity_is_case_insensitive() {
        let repo = InMemoryUserRepository::new();
        let use_case = register_use_case(&repo);
        use_case.execute(scenario_a()).await.unwrap();

        let err = use_case
            .execute(input("  Test@EXAMPLE.com ", "another-pass-1", None, "driver"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateIdentity));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_password_rejected() {
        let repo = InMemoryUserRepository::new();
        let err = register_use_case(&repo)
            .execute(input("test@example.com", "", None, "rider"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_inputs_rejected() {
        let repo = InMemoryUserRepository::new();
        let use_case = register_use_case(&repo);

        let cases = [
            input("test@example.com", "password123", None, "passenger"),
            input("not-an-email", "password123", None, "rider"),
            input("test@example.com", "short", None, "rider"),
            input("test@example.com", "password123", Some("call me"), "rider"),
        ];

        for case in cases {
            let err = use_case.execute(case).await.unwrap_err();
            assert!(matches!(err, AuthError::Validation(_)), "{err}");
        }
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_phone_is_optional_and_not_unique() {
        let repo = InMemoryUserRepository::new();
        let use_case = register_use_case(&repo);

        use_case
            .execute(input("a@example.com", "password123", Some("+1 555 0100"), "driver"))
            .await
            .unwrap();
        use_case
            .execute(input("b@example.com", "password123", Some("+15550100"), "admin"))
            .await
            .unwrap();
        use_case
            .execute(input("c@example.com", "password123", Some("   "), "rider"))
            .await
            .unwrap();

        assert_eq!(repo.count().await.unwrap(), 3);
        let c = repo
            .find_by_identity(&Email::new("c@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(c.phone.is_none());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let err = register_use_case(&UnavailableRepository)
            .execute(scenario_a())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::StorageUnavailable(_)));
    }

    #[tokio::test]
    async fn test_fixture_delete_all() {
        let repo = InMemoryUserRepository::new();
        let use_case = register_use_case(&repo);
        use_case.execute(scenario_a()).await.unwrap();

        assert_eq!(repo.delete_all().await.unwrap(), 1);
        assert_eq!(repo.count().await.unwrap(), 0);

        // Identity is free again
        use_case.execute(scenario_a()).await.unwrap();
    }
}

#[cfg(test)]
mod concurrency_tests {
    use super::*;

    const CONTENDERS: usize = 16;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registration_single_winner() {
        let repo = InMemoryUserRepository::new();
        let use_case = Arc::new(register_use_case(&repo));

        let handles: Vec<_> = (0..CONTENDERS)
            .map(|i| {
                let use_case = Arc::clone(&use_case);
                // Same identity spelled differently
                let email = if i % 2 == 0 {
                    "race@example.com"
                } else {
                    "RACE@Example.COM"
                };
                tokio::spawn(async move {
                    use_case
                        .execute(input(email, "password123", None, "rider"))
                        .await
                })
            })
            .collect();

        let mut succeeded = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(AuthError::DuplicateIdentity) => duplicates += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(succeeded, 1);
        assert_eq!(duplicates, CONTENDERS - 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_distinct_identities_all_succeed() {
        let repo = InMemoryUserRepository::new();
        let use_case = Arc::new(register_use_case(&repo));

        let handles: Vec<_> = (0..CONTENDERS)
            .map(|i| {
                let use_case = Arc::clone(&use_case);
                tokio::spawn(async move {
                    use_case
                        .execute(input(
                            &format!("user{i}@example.com"),
                            "password123",
                            None,
                            "driver",
                        ))
                        .await
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().user_id);
        }
        ids.sort_by_key(|id| id.to_string());
        ids.dedup();

        assert_eq!(ids.len(), CONTENDERS);
        assert_eq!(repo.count().await.unwrap(), CONTENDERS as u64);
    }
}

#[cfg(test)]
mod verify_credentials_tests {
    use super::*;

    async fn registered() -> (InMemoryUserRepository, UserId) {
        let repo = InMemoryUserRepository::new();
        let output = register_use_case(&repo).execute(scenario_a()).await.unwrap();
        (repo, output.user_id)
    }

    fn check(identity: &str, password: &str) -> VerifyCredentialsInput {
        VerifyCredentialsInput {
            identity: identity.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_valid_credentials() {
        let (repo, user_id) = registered().await;
        let use_case = VerifyCredentialsUseCase::new(Arc::new(repo), hasher());

        let output = use_case
            .execute(check("TEST@example.com", "password123"))
            .await
            .unwrap();
        assert_eq!(output.user_id, user_id);
        assert_eq!(output.role, UserRole::Rider);
        assert!(!output.needs_rehash);
    }

    #[tokio::test]
    async fn test_failures_are_uniform() {
        let (repo, _) = registered().await;
        let use_case = VerifyCredentialsUseCase::new(Arc::new(repo), hasher());

        for (identity, password) in [
            ("test@example.com", "wrong-password"),
            ("nobody@example.com", "password123"),
            ("not-an-email", "password123"),
            ("test@example.com", ""),
        ] {
            let err = use_case.execute(check(identity, password)).await.unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials), "{identity}");
        }
    }

    #[tokio::test]
    async fn test_outdated_parameters_flagged() {
        let (repo, _) = registered().await;
        let stronger = CredentialHasher::new(
            HashingParams {
                memory_kib: 8192,
                iterations: 2,
                parallelism: 1,
            },
            None,
        )
        .unwrap();
        let use_case = VerifyCredentialsUseCase::new(Arc::new(repo), Arc::new(stronger));

        let output = use_case
            .execute(check("test@example.com", "password123"))
            .await
            .unwrap();
        assert!(output.needs_rehash);
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_masked() {
        let use_case = VerifyCredentialsUseCase::new(Arc::new(UnavailableRepository), hasher());
        let err = use_case
            .execute(check("test@example.com", "password123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::StorageUnavailable(_)));
    }
}

#[cfg(test)]
mod router_tests {
    use super::*;
    use crate::presentation::router::auth_router_generic;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app<R: UserRepository + Clone + Send + Sync + 'static>(repo: R) -> Router {
        auth_router_generic(repo, config()).unwrap()
    }

    async fn post_register(app: Router, body: String) -> (StatusCode, Value, Option<String>) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/register")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap(), retry_after)
    }

    fn scenario_a_body() -> String {
        json!({
            "email": "test@example.com",
            "password": "password123",
            "phone": "+1234567890",
            "role": "rider"
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_register_created() {
        let repo = InMemoryUserRepository::new();
        let (status, body, _) = post_register(app(repo.clone()), scenario_a_body()).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "User registered successfully");
        let user_id: UserId = body["userId"].as_str().unwrap().parse().unwrap();

        let stored = repo
            .find_by_identity(&Email::new("test@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.user_id, user_id);
    }

    #[tokio::test]
    async fn test_register_duplicate() {
        let repo = InMemoryUserRepository::new();
        post_register(app(repo.clone()), scenario_a_body()).await;

        let (status, body, _) = post_register(app(repo.clone()), scenario_a_body()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["reason"], "duplicate");
        assert_eq!(body["status"], 400);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_validation_failures() {
        let repo = InMemoryUserRepository::new();
        let bodies = [
            // Unknown field
            json!({
                "email": "a@example.com",
                "password": "password123",
                "role": "rider",
                "isAdmin": true
            }),
            // Missing field
            json!({"email": "a@example.com", "password": "password123"}),
            // Bad role
            json!({"email": "a@example.com", "password": "password123", "role": "pilot"}),
            // Empty password
            json!({"email": "a@example.com", "password": "", "role": "rider"}),
        ];

        for body in bodies {
            let (status, problem, _) = post_register(app(repo.clone()), body.to_string()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(problem["reason"], "validation", "{body}");
        }

        let (status, problem, _) = post_register(app(repo.clone()), "{not json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(problem["reason"], "validation");

        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_register_storage_unavailable() {
        let (status, body, retry_after) =
            post_register(app(UnavailableRepository), scenario_a_body()).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["reason"], "unavailable");
        assert_eq!(retry_after.as_deref(), Some("1"));
        assert!(!body["detail"].as_str().unwrap().contains("db-primary"));
    }

    #[tokio::test]
    async fn test_invalid_hashing_config_rejected() {
        let config = AuthConfig {
            hashing: HashingParams {
                memory_kib: 1,
                iterations: 1,
                parallelism: 1,
            },
            ..AuthConfig::default()
        };
        let err = auth_router_generic(InMemoryUserRepository::new(), config).unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
