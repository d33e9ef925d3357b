//! PostgreSQL pool for the credential store
//!
//! The `users` / `logs` schema lives in `./migrations` and is embedded at
//! compile time, so a fresh database is usable right after connecting.

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

/// Pool settings for the credential database
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// Upper bound on waiting for a free connection
    pub acquire_timeout: Duration,
}

impl DbConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    /// Read `DATABASE_URL` from the environment
    pub fn from_env() -> Result<Self, DbError> {
        std::env::var("DATABASE_URL")
            .map(Self::new)
            .map_err(|_| DbError::MissingDatabaseUrl)
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("DATABASE_URL environment variable not set")]
    MissingDatabaseUrl,

    #[error("Failed to connect to database: {0}")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Failed to run migrations: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

pub async fn create_pool(config: &DbConfig) -> Result<PgPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.database_url)
        .await?;

    tracing::debug!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Connect and bring the schema up to date
pub async fn create_pool_with_migrations(config: &DbConfig) -> Result<PgPool, DbError> {
    let pool = create_pool(config).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}
