use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};

use crate::error::Result;

/// One executed test of a build/suite run
/// Maps to `test_runs` table
///
/// Several runs share a `suite`; the number of builds is the number of
/// distinct suites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TestRun {
    pub id: i64,
    pub name: String,
    pub execution_time_ms: f64,
    pub time_added: DateTime<Utc>,
    pub version: String,
    pub suite: i64,
    pub run: i64,
}

impl TestRun {
    pub async fn for_suite(conn: &mut SqliteConnection, suite: i64) -> Result<Vec<TestRun>> {
        let runs = sqlx::query_as::<_, TestRun>(
            r#"
            SELECT id, name, execution_time_ms, time_added, version, suite, run
            FROM test_runs
            WHERE suite = ?
            ORDER BY run, id
            "#,
        )
        .bind(suite)
        .fetch_all(conn)
        .await?;

        Ok(runs)
    }
}
