//! Bulk clear endpoints, gated by the configured authorizer

use std::sync::Arc;

use axum::{extract::State, routing::delete, Json, Router};

use super::MessageResponse;
use crate::http::error::ApiError;
use crate::http::extractors::Authorized;
use crate::http::server::AppState;

/// DELETE /clear_products
async fn clear_products(
    _auth: Authorized,
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut uow = state.store.open_write().await?;
    let count = uow.products().delete_all().await?;
    uow.commit().await?;

    tracing::warn!(count, "all products deleted");
    Ok(Json(MessageResponse::new("All products deleted")))
}

/// DELETE /clear_users
async fn clear_users(
    _auth: Authorized,
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut uow = state.store.open_write().await?;
    let count = uow.users().delete_all().await?;
    uow.commit().await?;

    tracing::warn!(count, "all users deleted");
    Ok(Json(MessageResponse::new("All users deleted")))
}

/// Admin routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/clear_products", delete(clear_products))
        .route("/clear_users", delete(clear_users))
}
