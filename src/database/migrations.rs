//! # Database Migration System
//!
//! Schema migrations are embedded at compile time from the `migrations/`
//! directory and applied through SQLx's migrator, which records applied
//! versions in `_sqlx_migrations` so repeated runs are no-ops.

use sqlx::migrate::Migrator;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::Result;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Manages database schema migrations.
pub struct DatabaseMigrations;

impl DatabaseMigrations {
    /// Run all outstanding migrations in order
    pub async fn run_all(pool: &SqlitePool) -> Result<()> {
        MIGRATOR.run(pool).await?;
        info!(
            migrations = MIGRATOR.iter().count(),
            "Database schema is up to date"
        );
        Ok(())
    }
}
