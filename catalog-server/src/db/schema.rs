//! Table bootstrap for products and users

use sqlx::SqlitePool;

const PRODUCTS: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL,
    price REAL NOT NULL
)
"#;

const USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
)
"#;

/// Create both tables if absent. Idempotent.
pub async fn bootstrap(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring catalog tables exist...");

    sqlx::query(PRODUCTS).execute(pool).await?;
    sqlx::query(USERS).execute(pool).await?;

    Ok(())
}
