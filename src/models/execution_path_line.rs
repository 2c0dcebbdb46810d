use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};

use crate::error::Result;

/// One profiler sample line attached to a request
/// Maps to `execution_path_lines` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ExecutionPathLine {
    pub id: i64,
    pub request_id: i64,
    pub line_number: i64,
    pub indent: i64,
    pub line_text: String,
    pub duration_ms: f64,
}

impl ExecutionPathLine {
    /// The profile of one request in line order
    pub async fn for_request(
        conn: &mut SqliteConnection,
        request_id: i64,
    ) -> Result<Vec<ExecutionPathLine>> {
        let lines = sqlx::query_as::<_, ExecutionPathLine>(
            r#"
            SELECT id, request_id, line_number, indent, line_text, duration_ms
            FROM execution_path_lines
            WHERE request_id = ?
            ORDER BY line_number
            "#,
        )
        .bind(request_id)
        .fetch_all(conn)
        .await?;

        Ok(lines)
    }
}
