use sqlx::pool::PoolConnection;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, Sqlite, SqlitePool};
use tracing::{debug, info};

use super::migrations::DatabaseMigrations;
use crate::config::DatabaseConfig;
use crate::error::Result;

/// A pooled connection held for the duration of one aggregation call
pub type Session = PoolConnection<Sqlite>;

#[derive(Debug, Clone)]
pub struct DatabaseConnection {
    pool: SqlitePool,
}

impl DatabaseConnection {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        // Each connection to an in-memory database sees its own empty database
        let max_connections = if config.is_in_memory() {
            1
        } else {
            config.max_connections
        };

        let mut options = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(config.acquire_timeout());
        if config.is_in_memory() {
            options = options.idle_timeout(None).max_lifetime(None);
        }

        let pool = options.connect(&config.url).await?;
        info!(max_connections, in_memory = config.is_in_memory(), "Database pool ready");

        if config.run_migrations {
            DatabaseMigrations::run_all(&pool).await?;
        }

        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Acquire a scoped session; dropping it returns the connection to the pool
    pub async fn session(&self) -> Result<Session> {
        let session = self.pool.acquire().await?;
        debug!(idle = self.pool.num_idle(), "Session acquired");
        Ok(session)
    }

    pub async fn health_check(&self) -> Result<bool> {
        let row = sqlx::query("SELECT 1 as health")
            .fetch_one(&self.pool)
            .await?;

        let health: i32 = row.get("health");
        Ok(health == 1)
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
