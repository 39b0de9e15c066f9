use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config;

/// Errors from the database layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DatabaseError::Sqlx(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}

const DEFAULT_DATABASE_URL: &str = "sqlite://karma.db?mode=rwc";

/// Process-wide connection pool, created lazily on first use.
pub struct Database;

impl Database {
    /// Get the shared pool, creating it (and the schema) on first access.
    pub async fn pool() -> Result<SqlitePool, DatabaseError> {
        static POOL: OnceCell<SqlitePool> = OnceCell::const_new();
        POOL.get_or_try_init(Self::connect).await.cloned()
    }

    async fn connect() -> Result<SqlitePool, DatabaseError> {
        let url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let db_config = &config::config().database;
        let pool = SqlitePoolOptions::new()
            .max_connections(db_config.max_connections)
            .acquire_timeout(Duration::from_secs(db_config.connection_timeout))
            .connect(&url)
            .await?;

        Self::migrate(&pool).await?;

        info!("Created database pool for: {}", url);
        Ok(pool)
    }

    /// Create the account table if it does not exist yet.
    pub async fn migrate(pool: &SqlitePool) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_details (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                role INTEGER NOT NULL DEFAULT 2,
                username TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL,
                name TEXT,
                reputation DOUBLE DEFAULT 0
            )
            "#,
        )
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check() -> Result<(), DatabaseError> {
        let pool = Self::pool().await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(())
    }
}
