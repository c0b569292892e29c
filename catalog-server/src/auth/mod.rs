//! Authentication and authorization
//!
//! - `password`: argon2 hashing for stored user passwords
//! - `basic`: HTTP Basic header decoding
//! - `authorizer`: pluggable gate for the clear-all endpoints

pub mod authorizer;
pub mod basic;
pub mod password;

pub use authorizer::{Authorizer, Decision, StaticCredentials};
pub use basic::Caller;
pub use password::{hash_password, verify_password, PasswordParams};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("malformed Authorization header: {0}")]
    MalformedHeader(&'static str),
}
