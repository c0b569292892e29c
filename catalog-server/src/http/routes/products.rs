//! Product endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};

use super::MessageResponse;
use crate::db::{DbError, UnitOfWork};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ProductId};
use crate::http::server::AppState;
use crate::models::{NewProduct, Product};

const PRODUCT_EXISTS: &str = "Product already exists";

/// Message plus the affected product, when there is one
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

impl ProductResponse {
    fn with_product(message: &'static str, product: Product) -> Self {
        Self {
            message,
            product: Some(product),
        }
    }

    fn message_only(message: &'static str) -> Self {
        Self {
            message,
            product: None,
        }
    }
}

/// Insert, or `None` when the UNIQUE constraint rejects the name.
async fn insert_unless_taken(
    uow: &mut UnitOfWork,
    req: &NewProduct,
) -> Result<Option<Product>, DbError> {
    match uow.products().insert(req).await {
        Ok(product) => Ok(Some(product)),
        Err(DbError::UniqueViolation { .. }) => {
            tracing::debug!(name = %req.name, "product name taken at insert");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// POST /add_product - create unless the name is taken
///
/// A taken name is reported with 200 and a message, whether the pre-check
/// or the UNIQUE constraint catches it.
async fn add_product(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<NewProduct>,
) -> Result<Json<ProductResponse>, ApiError> {
    let mut uow = state.store.open_write().await?;

    if uow.products().find_by_name(&req.name).await?.is_some() {
        tracing::debug!(name = %req.name, "product name taken");
        return Ok(Json(ProductResponse::message_only(PRODUCT_EXISTS)));
    }

    let Some(product) = insert_unless_taken(&mut uow, &req).await? else {
        return Ok(Json(ProductResponse::message_only(PRODUCT_EXISTS)));
    };
    uow.commit().await?;

    tracing::info!(product_id = product.id, name = %product.name, "product added");
    Ok(Json(ProductResponse::with_product(
        "Product added successfully",
        product,
    )))
}

/// GET /products - every product in store order
async fn list_products(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Product>>, ApiError> {
    let mut uow = state.store.open().await?;
    let products = uow.products().list().await?;
    Ok(Json(products))
}

/// GET /products/{id}
async fn get_product(
    State(state): State<Arc<AppState>>,
    ProductId(id): ProductId,
) -> Result<Json<Product>, ApiError> {
    let mut uow = state.store.open().await?;
    let product = uow.products().get(id).await?;
    Ok(Json(product))
}

/// DELETE /products/{id}
async fn delete_product(
    State(state): State<Arc<AppState>>,
    ProductId(id): ProductId,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut uow = state.store.open_write().await?;
    let product = uow.products().get(id).await?;
    uow.products().delete(product.id).await?;
    uow.commit().await?;

    tracing::info!(product_id = id, "product deleted");
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

/// PUT /products/{id} - replace name, description and price
async fn update_product(
    State(state): State<Arc<AppState>>,
    ProductId(id): ProductId,
    JsonBody(req): JsonBody<NewProduct>,
) -> Result<Json<ProductResponse>, ApiError> {
    let mut uow = state.store.open_write().await?;
    let mut product = uow.products().get(id).await?;

    product.replace_with(req);
    let product = uow.products().update(&product).await?;
    uow.commit().await?;

    tracing::info!(product_id = id, "product updated");
    Ok(Json(ProductResponse::with_product(
        "Product updated successfully",
        product,
    )))
}

/// PATCH /products/{id} - overwrite only the named fields
async fn patch_product(
    State(state): State<Arc<AppState>>,
    ProductId(id): ProductId,
    JsonBody(fields): JsonBody<Map<String, Value>>,
) -> Result<Json<ProductResponse>, ApiError> {
    let mut uow = state.store.open_write().await?;
    let mut product = uow.products().get(id).await?;

    let applied = product.apply_patch(&fields)?;
    let product = uow.products().update(&product).await?;
    uow.commit().await?;

    tracing::info!(product_id = id, fields = ?applied, "product partially updated");
    Ok(Json(ProductResponse::with_product(
        "Product partially updated",
        product,
    )))
}

/// Product routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/add_product", post(add_product))
        .route("/products", get(list_products))
        .route(
            "/products/{id}",
            get(get_product)
                .put(update_product)
                .patch(patch_product)
                .delete(delete_product),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, Store};

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".into(),
            description: "A widget".into(),
            price: 10.0,
        }
    }

    #[tokio::test]
    async fn constraint_hit_at_insert_reads_as_taken() {
        let store = Store::new(create_pool("sqlite::memory:").await.unwrap());
        let mut uow = store.open_write().await.unwrap();
        uow.products().insert(&widget()).await.unwrap();
        uow.commit().await.unwrap();

        // No pre-check: the insert itself meets the existing row.
        let mut uow = store.open_write().await.unwrap();
        assert_eq!(insert_unless_taken(&mut uow, &widget()).await.unwrap(), None);
        drop(uow);

        let mut uow = store.open().await.unwrap();
        assert_eq!(uow.products().list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn free_name_inserts() {
        let store = Store::new(create_pool("sqlite::memory:").await.unwrap());
        let mut uow = store.open_write().await.unwrap();
        let product = insert_unless_taken(&mut uow, &widget()).await.unwrap();
        assert_eq!(product.map(|p| p.name), Some("Widget".to_owned()));
    }

    #[test]
    fn message_only_omits_product_key() {
        let json = serde_json::to_value(ProductResponse::message_only(PRODUCT_EXISTS)).unwrap();
        assert_eq!(json, serde_json::json!({"message": "Product already exists"}));
    }
}
