//! Database layer - connection pool, schema, unit-of-work and repositories
//!
//! # Design Principles
//!
//! - One unit-of-work (transaction) per request, released on drop
//! - Rely on DB constraints for uniqueness; pre-checks only shape the response
//! - Repositories never commit; the handler decides

pub mod pool;
pub mod repos;
pub mod schema;
pub mod unit_of_work;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::{DbError, ProductRepo, UserRepo};
pub use unit_of_work::{Store, UnitOfWork};
