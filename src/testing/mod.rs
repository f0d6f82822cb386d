//! Test-only helpers. An in-memory SQLite pool pinned to one connection so
//! every query sees the same database.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("in-memory options")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("in-memory pool");

    crate::database::manager::migrate(&pool)
        .await
        .expect("schema");
    pool
}
