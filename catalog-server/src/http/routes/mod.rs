//! Route handlers organized by resource

pub mod admin;
pub mod health;
pub mod products;
pub mod users;

use std::sync::Arc;

use axum::Router;
use serde::Serialize;

use super::server::AppState;

/// Body of responses that carry only a message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// All routes, unlayered and without state
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::router())
        .merge(products::router())
        .merge(users::router())
        .merge(admin::router())
}
