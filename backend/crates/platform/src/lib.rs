//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password policy enforcement (NIST SP 800-63B defaults)
//! - Credential hashing (Argon2id, configurable cost, optional pepper)

pub mod password;
