//! User repository

use sqlx::SqliteConnection;

use super::{unique_as, DbError};
use crate::models::User;

const RESOURCE: &str = "User";

/// User repository
pub struct UserRepo<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> UserRepo<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub async fn find_by_username(&mut self, username: &str) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(user)
    }

    /// Like `find_by_username`, but a missing row is `DbError::NotFound`.
    pub async fn get_by_username(&mut self, username: &str) -> Result<User, DbError> {
        self.find_by_username(username)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: RESOURCE,
                id: username.to_owned(),
            })
    }

    /// Insert a user with an already-hashed password.
    pub async fn insert(&mut self, username: &str, password_hash: &str) -> Result<User, DbError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES (?, ?)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(unique_as(RESOURCE))
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: RESOURCE,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    pub async fn delete_all(&mut self) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM users").execute(&mut *self.conn).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use crate::db::{create_pool, DbError, Store};

    #[tokio::test]
    async fn insert_find_delete() {
        let store = Store::new(create_pool("sqlite::memory:").await.unwrap());
        let mut uow = store.open().await.unwrap();

        let user = uow.users().insert("John", "hash").await.unwrap();
        assert_eq!(user.username, "John");

        let found = uow.users().get_by_username("John").await.unwrap();
        assert_eq!(found.id, user.id);

        uow.users().delete(user.id).await.unwrap();
        assert!(uow.users().find_by_username("John").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_unique_violation() {
        let store = Store::new(create_pool("sqlite::memory:").await.unwrap());
        let mut uow = store.open().await.unwrap();

        uow.users().insert("John", "hash").await.unwrap();
        let err = uow.users().insert("John", "other").await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { resource: "User" }));
    }

    #[tokio::test]
    async fn missing_username_is_not_found() {
        let store = Store::new(create_pool("sqlite::memory:").await.unwrap());
        let mut uow = store.open().await.unwrap();

        let err = uow.users().get_by_username("nobody").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "User", .. }));
    }
}
