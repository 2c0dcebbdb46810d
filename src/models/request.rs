use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};

use crate::error::Result;

/// One observed HTTP call against a monitored endpoint
/// Maps to `requests` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Request {
    pub id: i64,
    pub endpoint: String,
    pub duration_ms: f64,
    pub time_requested: DateTime<Utc>,
    pub version: String,
    /// User or session key the dashboard groups requests by
    pub group_by: Option<String>,
    pub ip: String,
}

impl Request {
    /// Find a request by ID
    pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<Request>> {
        let request = sqlx::query_as::<_, Request>(
            r#"
            SELECT id, endpoint, duration_ms, time_requested, version, group_by, ip
            FROM requests
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(request)
    }
}
