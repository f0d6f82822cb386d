use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config;

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Collapse a sqlx unique-index violation into a typed conflict; the
    /// constraints themselves live in the schema so concurrent duplicate
    /// inserts race in the store, never in application pre-checks.
    pub fn from_sqlx(err: sqlx::Error, unique_message: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return DatabaseError::UniqueViolation(unique_message.to_string());
            }
        }
        DatabaseError::Sqlx(err)
    }
}

static POOL: OnceCell<SqlitePool> = OnceCell::const_new();

/// Process-wide SQLite pool, connected lazily from DATABASE_URL
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn pool() -> Result<&'static SqlitePool, DatabaseError> {
        POOL.get_or_try_init(Self::connect).await
    }

    async fn connect() -> Result<SqlitePool, DatabaseError> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let cfg = &config::config().database;
        let options = SqliteConnectOptions::from_str(&url)?
            .create_if_missing(true)
            // Cascading deletes depend on this being set per connection
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(Duration::from_secs(cfg.connection_timeout))
            .connect_with(options)
            .await?;

        migrate(&pool).await?;

        info!("Connected database pool for: {}", url);
        Ok(pool)
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check() -> Result<(), DatabaseError> {
        let pool = Self::pool().await?;
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}

/// Table definitions. Ownership chains hang off users: workout data carries
/// a direct user_id, food items reach their owner through the parent log.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS exercises (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        muscle_group TEXT,
        UNIQUE(user_id, name)
    )",
    "CREATE TABLE IF NOT EXISTS workout_sets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        exercise_id INTEGER NOT NULL REFERENCES exercises(id) ON DELETE CASCADE,
        date TEXT NOT NULL,
        reps INTEGER NOT NULL,
        weight REAL NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS diet_logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        date TEXT NOT NULL,
        UNIQUE(user_id, date)
    )",
    "CREATE TABLE IF NOT EXISTS food_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        diet_log_id INTEGER NOT NULL REFERENCES diet_logs(id) ON DELETE CASCADE,
        meal_type TEXT NOT NULL,
        name TEXT NOT NULL,
        calories INTEGER NOT NULL
    )",
];

/// Apply the schema. Idempotent; runs on startup and against test pools.
pub async fn migrate(pool: &SqlitePool) -> Result<(), DatabaseError> {
    for ddl in SCHEMA {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}
