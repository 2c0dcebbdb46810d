use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};

use crate::error::Result;

/// One measured execution of an endpoint during a test build
/// Maps to `test_endpoints` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TestEndpoint {
    pub id: i64,
    pub endpoint_name: String,
    pub test_name: String,
    pub execution_time_ms: f64,
    /// Application version under test when the sample was taken
    pub app_version: String,
    /// Build that produced the sample
    pub build_id: String,
    pub time_added: DateTime<Utc>,
}

impl TestEndpoint {
    /// All samples produced by one build, in insertion order
    pub async fn for_build(conn: &mut SqliteConnection, build_id: &str) -> Result<Vec<TestEndpoint>> {
        let samples = sqlx::query_as::<_, TestEndpoint>(
            r#"
            SELECT id, endpoint_name, test_name, execution_time_ms, app_version, build_id, time_added
            FROM test_endpoints
            WHERE build_id = ?
            ORDER BY id
            "#,
        )
        .bind(build_id)
        .fetch_all(conn)
        .await?;

        Ok(samples)
    }
}
