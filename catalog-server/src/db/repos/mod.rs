//! Repository implementations for database access
//!
//! Repositories borrow the connection of a `UnitOfWork` and never commit on
//! their own. Uniqueness is enforced by the table constraints; a violation
//! comes back as `DbError::UniqueViolation`.

pub mod products;
pub mod users;

pub use products::ProductRepo;
pub use users::UserRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("{resource} already exists")]
    UniqueViolation { resource: &'static str },
}

/// Map a driver unique-constraint failure to `UniqueViolation`.
pub(crate) fn unique_as(resource: &'static str) -> impl Fn(sqlx::Error) -> DbError {
    move |err| match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => DbError::UniqueViolation { resource },
        _ => DbError::Sqlx(err),
    }
}
