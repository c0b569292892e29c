//! User endpoints
//!
//! Login outcomes share status 200; only the message tells success from
//! failure.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, post},
    Json, Router,
};
use serde::Serialize;

use super::MessageResponse;
use crate::auth::{hash_password, verify_password};
use crate::db::{DbError, UnitOfWork};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::http::extractors::JsonBody;
use crate::models::{DeleteUserRequest, User, UserCredentials, UserView};

const USERNAME_EXISTS: &str = "Username already exists";
const LOGIN_OK: &str = "Login successful";
const LOGIN_FAILED: &str = "Invalid username or password";

/// Message plus the registered user, when there is one
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserView>,
}

impl RegisterResponse {
    fn taken() -> Self {
        Self {
            message: USERNAME_EXISTS,
            user: None,
        }
    }
}

/// Insert, or `None` when the UNIQUE constraint rejects the username.
async fn insert_unless_taken(
    uow: &mut UnitOfWork,
    username: &str,
    password_hash: &str,
) -> Result<Option<User>, DbError> {
    match uow.users().insert(username, password_hash).await {
        Ok(user) => Ok(Some(user)),
        Err(DbError::UniqueViolation { .. }) => {
            tracing::debug!(username, "username taken at insert");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Run argon2 off the async workers.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, crate::auth::AuthError> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal {
            message: format!("password task failed: {e}"),
        })?;
    Ok(result?)
}

/// POST /register
async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<UserCredentials>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let password = req.password()?.to_owned();

    // Hash before taking the write lock.
    let params = state.password_params;
    let hash = blocking(move || hash_password(&password, params)).await?;

    let mut uow = state.store.open_write().await?;
    if uow.users().find_by_username(&req.username).await?.is_some() {
        tracing::debug!(username = %req.username, "username taken");
        return Ok(Json(RegisterResponse::taken()));
    }

    let Some(user) = insert_unless_taken(&mut uow, &req.username, &hash).await? else {
        return Ok(Json(RegisterResponse::taken()));
    };
    uow.commit().await?;

    tracing::info!(user_id = user.id, username = %user.username, "user registered");
    Ok(Json(RegisterResponse {
        message: "User registered successfully",
        user: Some(UserView::from(user)),
    }))
}

/// POST /login
async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<UserCredentials>,
) -> Result<Json<MessageResponse>, ApiError> {
    let password = req.password()?.to_owned();

    let mut uow = state.store.open().await?;
    let user = uow.users().find_by_username(&req.username).await?;
    // Connection goes back to the pool before argon2 runs.
    drop(uow);

    let Some(user) = user else {
        tracing::debug!(username = %req.username, "login for unknown user");
        return Ok(Json(MessageResponse::new(LOGIN_FAILED)));
    };

    let stored = user.password_hash;
    let verified = blocking(move || verify_password(&password, &stored)).await?;

    if verified {
        tracing::info!(username = %req.username, "login succeeded");
        Ok(Json(MessageResponse::new(LOGIN_OK)))
    } else {
        tracing::debug!(username = %req.username, "login password mismatch");
        Ok(Json(MessageResponse::new(LOGIN_FAILED)))
    }
}

/// DELETE /delete-user
async fn delete_user(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<DeleteUserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut uow = state.store.open_write().await?;
    let user = uow.users().get_by_username(&req.username).await?;
    uow.users().delete(user.id).await?;
    uow.commit().await?;

    tracing::info!(username = %req.username, "user deleted");
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/delete-user", delete(delete_user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, Store};

    #[tokio::test]
    async fn constraint_hit_at_insert_reads_as_taken() {
        let store = Store::new(create_pool("sqlite::memory:").await.unwrap());
        let mut uow = store.open_write().await.unwrap();
        uow.users().insert("john", "hash-a").await.unwrap();
        uow.commit().await.unwrap();

        let mut uow = store.open_write().await.unwrap();
        let inserted = insert_unless_taken(&mut uow, "john", "hash-b").await.unwrap();
        assert!(inserted.is_none());
        drop(uow);

        let mut uow = store.open().await.unwrap();
        let stored = uow.users().get_by_username("john").await.unwrap();
        assert_eq!(stored.password_hash, "hash-a");
    }
}
