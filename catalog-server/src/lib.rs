//! catalog-server: products and users over HTTP
//!
//! CRUD handlers for two SQLite-backed tables. Each request runs inside one
//! unit-of-work; uniqueness of product names and usernames is enforced by
//! the schema.

pub mod auth;
pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod tracing_setup;

pub use config::ServeArgs;
pub use db::{create_pool, Store};
pub use http::{build_router, run_server, AppState, ServerConfig};
