use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use super::reference_now;

/// Builder for `requests` rows
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    endpoint: String,
    duration_ms: f64,
    time_requested: DateTime<Utc>,
    version: String,
    group_by: Option<String>,
    ip: String,
}

impl RequestBuilder {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            duration_ms: 10.0,
            time_requested: reference_now(),
            version: "1.0".to_string(),
            group_by: None,
            ip: "127.0.0.1".to_string(),
        }
    }

    pub fn user(mut self, user: &str) -> Self {
        self.group_by = Some(user.to_string());
        self
    }

    pub fn ip(mut self, ip: &str) -> Self {
        self.ip = ip.to_string();
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn at(mut self, time_requested: DateTime<Utc>) -> Self {
        self.time_requested = time_requested;
        self
    }

    pub fn duration(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Insert and return the new row id
    pub async fn insert(self, conn: &mut SqliteConnection) -> i64 {
        sqlx::query(
            "INSERT INTO requests (endpoint, duration_ms, time_requested, version, group_by, ip) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(self.endpoint)
        .bind(self.duration_ms)
        .bind(self.time_requested)
        .bind(self.version)
        .bind(self.group_by)
        .bind(self.ip)
        .execute(conn)
        .await
        .expect("insert request")
        .last_insert_rowid()
    }
}

pub async fn insert_outlier(conn: &mut SqliteConnection, endpoint: &str, request_id: i64) -> i64 {
    sqlx::query("INSERT INTO outliers (endpoint, request_id, stacktrace) VALUES (?, ?, ?)")
        .bind(endpoint)
        .bind(request_id)
        .bind("Traceback (most recent call last)")
        .execute(conn)
        .await
        .expect("insert outlier")
        .last_insert_rowid()
}

pub async fn insert_path_line(conn: &mut SqliteConnection, request_id: i64, line_number: i64) {
    sqlx::query(
        "INSERT INTO execution_path_lines (request_id, line_number, indent, line_text, duration_ms) \
         VALUES (?, ?, 0, ?, 1.5)",
    )
    .bind(request_id)
    .bind(line_number)
    .bind(format!("line {line_number}"))
    .execute(conn)
    .await
    .expect("insert execution path line");
}

pub async fn insert_test_run(conn: &mut SqliteConnection, name: &str, suite: i64) {
    sqlx::query(
        "INSERT INTO test_runs (name, execution_time_ms, time_added, version, suite, run) \
         VALUES (?, 12.0, ?, '1.0', ?, 0)",
    )
    .bind(name)
    .bind(reference_now())
    .bind(suite)
    .execute(conn)
    .await
    .expect("insert test run");
}

/// Builder for `test_endpoints` rows
#[derive(Debug, Clone)]
pub struct MeasurementBuilder {
    endpoint: String,
    execution_time_ms: f64,
    version: String,
    build: String,
    time_added: DateTime<Utc>,
    stored_time: Option<String>,
}

impl MeasurementBuilder {
    pub fn new(endpoint: &str, execution_time_ms: f64) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            execution_time_ms,
            version: "1.0".to_string(),
            build: "1".to_string(),
            time_added: reference_now(),
            stored_time: None,
        }
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn build(mut self, build: &str) -> Self {
        self.build = build.to_string();
        self
    }

    pub fn at(mut self, time_added: DateTime<Utc>) -> Self {
        self.time_added = time_added;
        self
    }

    /// Store `time_added` as this literal text, e.g. SQLite's `CURRENT_TIMESTAMP` format
    pub fn stored_as(mut self, text: &str) -> Self {
        self.stored_time = Some(text.to_string());
        self
    }

    pub async fn insert(self, conn: &mut SqliteConnection) {
        let query = sqlx::query(
            "INSERT INTO test_endpoints \
             (endpoint_name, test_name, execution_time_ms, app_version, build_id, time_added) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&self.endpoint)
        .bind(format!("test_{}", self.endpoint))
        .bind(self.execution_time_ms)
        .bind(self.version)
        .bind(self.build);
        let query = match self.stored_time {
            Some(text) => query.bind(text),
            None => query.bind(self.time_added),
        };
        query
            .execute(conn)
            .await
            .expect("insert test endpoint measurement");
    }
}
