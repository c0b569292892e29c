//! Scoped unit-of-work over a pooled connection
//!
//! A `UnitOfWork` wraps one sqlx transaction. `commit()` makes the writes
//! durable. Dropping it any other way rolls back and hands the connection
//! back to the pool, so release happens on every exit path.

use sqlx::{Sqlite, SqlitePool, Transaction};

use super::repos::{DbError, ProductRepo, UserRepo};

/// Persistence gateway shared by all handlers
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Begin a read-only unit-of-work on one connection.
    pub async fn open(&self) -> Result<UnitOfWork, DbError> {
        let tx = self.pool.begin().await?;
        Ok(UnitOfWork { tx })
    }

    /// Begin a unit-of-work holding the database write lock.
    ///
    /// Waits up to the connection's busy timeout for other writers.
    pub async fn open_write(&self) -> Result<UnitOfWork, DbError> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        Ok(UnitOfWork { tx })
    }
}

/// One request's worth of reads and writes
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    pub fn products(&mut self) -> ProductRepo<'_> {
        ProductRepo::new(&mut *self.tx)
    }

    pub fn users(&mut self) -> UserRepo<'_> {
        UserRepo::new(&mut *self.tx)
    }

    /// Commit and release the connection.
    pub async fn commit(self) -> Result<(), DbError> {
        self.tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, create_pool_with_options};
    use crate::models::NewProduct;

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".into(),
            description: "A widget".into(),
            price: 10.0,
        }
    }

    #[tokio::test]
    async fn dropped_unit_rolls_back() {
        let store = Store::new(create_pool("sqlite::memory:").await.unwrap());

        {
            let mut uow = store.open_write().await.unwrap();
            uow.products().insert(&widget()).await.unwrap();
            // no commit
        }

        let mut uow = store.open().await.unwrap();
        assert!(uow.products().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn committed_unit_persists() {
        let store = Store::new(create_pool("sqlite::memory:").await.unwrap());

        let mut uow = store.open_write().await.unwrap();
        let created = uow.products().insert(&widget()).await.unwrap();
        uow.commit().await.unwrap();

        let mut uow = store.open().await.unwrap();
        let found = uow.products().find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn write_units_on_a_file_database_wait_their_turn() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("catalog.db").display());
        let store = Store::new(create_pool_with_options(&url, 4).await.unwrap());

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let mut uow = store.open_write().await?;
                let name = format!("Widget {i}");
                // read, yield, then write
                assert!(uow.products().find_by_name(&name).await?.is_none());
                tokio::task::yield_now().await;
                uow.products()
                    .insert(&NewProduct {
                        name,
                        description: "A widget".into(),
                        price: 10.0,
                    })
                    .await?;
                uow.commit().await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let mut uow = store.open().await.unwrap();
        assert_eq!(uow.products().list().await.unwrap().len(), 8);
    }
}
