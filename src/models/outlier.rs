use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};

use crate::error::Result;

/// A request flagged as anomalous, keyed by endpoint name
/// Maps to `outliers` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Outlier {
    pub id: i64,
    pub endpoint: String,
    pub request_id: Option<i64>,
    pub stacktrace: Option<String>,
}

impl Outlier {
    /// List the outliers recorded for an endpoint, newest first
    pub async fn for_endpoint(conn: &mut SqliteConnection, endpoint: &str) -> Result<Vec<Outlier>> {
        let outliers = sqlx::query_as::<_, Outlier>(
            r#"
            SELECT id, endpoint, request_id, stacktrace
            FROM outliers
            WHERE endpoint = ?
            ORDER BY id DESC
            "#,
        )
        .bind(endpoint)
        .fetch_all(conn)
        .await?;

        Ok(outliers)
    }
}
