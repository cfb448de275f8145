//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod register;
pub mod verify_credentials;

// Re-exports
pub use config::AuthConfig;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use verify_credentials::{
    VerifyCredentialsInput, VerifyCredentialsOutput, VerifyCredentialsUseCase,
};
