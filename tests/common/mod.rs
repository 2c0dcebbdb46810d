//! Shared helpers for integration tests: an isolated in-memory store per test
//! and builders for the monitoring records.

#![allow(dead_code)]

pub mod builders;
pub mod strategies;

use chrono::{DateTime, TimeZone, Utc};
use dashboard_insights::config::DatabaseConfig;
use dashboard_insights::database::DatabaseConnection;

/// Fresh, migrated in-memory database; nothing is shared between tests
pub async fn test_database() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        ..DatabaseConfig::default()
    };
    DatabaseConnection::connect(&config)
        .await
        .expect("in-memory database should connect and migrate")
}

/// Fixed reference time used as "now" by time-window tests
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 29, 12, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    reference_now() - chrono::Duration::days(days)
}
