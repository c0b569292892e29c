//! Product repository

use sqlx::SqliteConnection;

use super::{unique_as, DbError};
use crate::models::{NewProduct, Product};

const RESOURCE: &str = "Product";

/// Product repository
pub struct ProductRepo<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> ProductRepo<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// All products in store order.
    pub async fn list(&mut self) -> Result<Vec<Product>, DbError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price FROM products ORDER BY id",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(products)
    }

    pub async fn find_by_id(&mut self, id: i64) -> Result<Option<Product>, DbError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(product)
    }

    /// Like `find_by_id`, but a missing row is `DbError::NotFound`.
    pub async fn get(&mut self, id: i64) -> Result<Product, DbError> {
        self.find_by_id(id).await?.ok_or_else(|| DbError::NotFound {
            resource: RESOURCE,
            id: id.to_string(),
        })
    }

    pub async fn find_by_name(&mut self, name: &str) -> Result<Option<Product>, DbError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price FROM products WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(product)
    }

    /// Insert a product, returning it with its generated id.
    pub async fn insert(&mut self, new: &NewProduct) -> Result<Product, DbError> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price)
            VALUES (?, ?, ?)
            RETURNING id, name, description, price
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(unique_as(RESOURCE))
    }

    /// Write every mutable column of `product` back to its row.
    pub async fn update(&mut self, product: &Product) -> Result<Product, DbError> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = ?, description = ?, price = ?
            WHERE id = ?
            RETURNING id, name, description, price
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.id)
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(unique_as(RESOURCE))?
        .ok_or_else(|| DbError::NotFound {
            resource: RESOURCE,
            id: product.id.to_string(),
        })
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
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

    /// Delete every product, returning how many rows went.
    pub async fn delete_all(&mut self) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM products")
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use crate::db::{create_pool, DbError, Store};
    use crate::models::NewProduct;

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            name: name.into(),
            description: format!("A {}", name.to_lowercase()),
            price: 10.0,
        }
    }

    async fn store() -> Store {
        Store::new(create_pool("sqlite::memory:").await.unwrap())
    }

    #[tokio::test]
    async fn insert_assigns_ids_in_order() {
        let store = store().await;
        let mut uow = store.open().await.unwrap();

        let first = uow.products().insert(&new_product("Widget")).await.unwrap();
        let second = uow.products().insert(&new_product("Gadget")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let names: Vec<_> = uow
            .products()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Widget", "Gadget"]);
    }

    #[tokio::test]
    async fn duplicate_name_is_unique_violation() {
        let store = store().await;
        let mut uow = store.open().await.unwrap();

        uow.products().insert(&new_product("Widget")).await.unwrap();
        let err = uow.products().insert(&new_product("Widget")).await.unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { resource: "Product" }));
    }

    #[tokio::test]
    async fn rename_into_taken_name_is_unique_violation() {
        let store = store().await;
        let mut uow = store.open().await.unwrap();

        uow.products().insert(&new_product("Widget")).await.unwrap();
        let mut gadget = uow.products().insert(&new_product("Gadget")).await.unwrap();
        gadget.name = "Widget".into();

        let err = uow.products().update(&gadget).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn get_and_delete_missing_are_not_found() {
        let store = store().await;
        let mut uow = store.open().await.unwrap();

        assert!(matches!(
            uow.products().get(7).await.unwrap_err(),
            DbError::NotFound { resource: "Product", .. }
        ));
        assert!(matches!(
            uow.products().delete(7).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn delete_all_counts_rows() {
        let store = store().await;
        let mut uow = store.open().await.unwrap();

        uow.products().insert(&new_product("Widget")).await.unwrap();
        uow.products().insert(&new_product("Gadget")).await.unwrap();

        assert_eq!(uow.products().delete_all().await.unwrap(), 2);
        assert!(uow.products().list().await.unwrap().is_empty());
    }
}
