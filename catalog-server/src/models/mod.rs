//! Domain models
//!
//! Persisted records plus the request payloads that build or mutate them.
//! Payload problems surface as ValidationError, never as a panic.

pub mod validation;
pub mod product;
pub mod user;

pub use validation::ValidationError;
pub use product::{NewProduct, Product};
pub use user::{DeleteUserRequest, User, UserCredentials, UserView};
