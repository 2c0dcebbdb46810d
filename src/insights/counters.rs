//! # Derived Counters
//!
//! Dashboard counters expressed as distinct-count queries. Each function only
//! chooses the counted column and its predicates; execution is shared through
//! [`count_distinct`].

use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;

use crate::error::Result;
use crate::query_builder::{count_distinct, Column, Predicate};

/// Number of distinct users (group-by keys) that requested the endpoint
pub async fn count_users(conn: &mut SqliteConnection, endpoint: &str) -> Result<i64> {
    count_distinct(
        conn,
        Column::RequestGroupBy,
        &[Predicate::eq(Column::RequestEndpoint, endpoint)],
    )
    .await
}

/// Number of distinct IP addresses that requested the endpoint
pub async fn count_ip(conn: &mut SqliteConnection, endpoint: &str) -> Result<i64> {
    count_distinct(
        conn,
        Column::RequestIp,
        &[Predicate::eq(Column::RequestEndpoint, endpoint)],
    )
    .await
}

/// Number of distinct application versions seen in requests
pub async fn count_versions(conn: &mut SqliteConnection) -> Result<i64> {
    count_distinct(conn, Column::RequestVersion, &[]).await
}

/// Number of distinct application versions that served the endpoint
pub async fn count_versions_end(conn: &mut SqliteConnection, endpoint: &str) -> Result<i64> {
    count_distinct(
        conn,
        Column::RequestVersion,
        &[Predicate::eq(Column::RequestEndpoint, endpoint)],
    )
    .await
}

/// Number of builds (distinct test-run suites) available
pub async fn count_builds(conn: &mut SqliteConnection) -> Result<i64> {
    count_distinct(conn, Column::TestRunSuite, &[]).await
}

/// Number of builds that produced endpoint measurements
pub async fn count_builds_endpoint(conn: &mut SqliteConnection) -> Result<i64> {
    count_distinct(conn, Column::TestEndpointBuild, &[]).await
}

/// Number of hits on the endpoint, narrowed by any extra request predicates
pub async fn count_requests(
    conn: &mut SqliteConnection,
    endpoint: &str,
    extra: &[Predicate],
) -> Result<i64> {
    let mut predicates = Vec::with_capacity(extra.len() + 1);
    predicates.push(Predicate::eq(Column::RequestEndpoint, endpoint));
    predicates.extend_from_slice(extra);

    count_distinct(conn, Column::RequestId, &predicates).await
}

/// Number of hits across all endpoints
pub async fn count_total_requests(
    conn: &mut SqliteConnection,
    predicates: &[Predicate],
) -> Result<i64> {
    count_distinct(conn, Column::RequestId, predicates).await
}

/// Number of outliers recorded for the endpoint
pub async fn count_outliers(conn: &mut SqliteConnection, endpoint: &str) -> Result<i64> {
    count_distinct(
        conn,
        Column::OutlierId,
        &[Predicate::eq(Column::OutlierEndpoint, endpoint)],
    )
    .await
}

/// Number of requests to the endpoint that have at least one profiler sample.
///
/// The candidate set is first narrowed to requests referenced by
/// `execution_path_lines`, then filtered by endpoint, then distinct-counted.
pub async fn count_profiled_requests(conn: &mut SqliteConnection, endpoint: &str) -> Result<i64> {
    count_distinct(
        conn,
        Column::RequestId,
        &[
            Predicate::HasProfilingSample,
            Predicate::eq(Column::RequestEndpoint, endpoint),
        ],
    )
    .await
}

/// Every per-endpoint counter shown on the endpoint overview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSummary {
    pub endpoint: String,
    pub hits: i64,
    pub users: i64,
    pub ips: i64,
    pub versions: i64,
    pub outliers: i64,
    pub profiled_requests: i64,
}

pub async fn endpoint_summary(
    conn: &mut SqliteConnection,
    endpoint: &str,
) -> Result<EndpointSummary> {
    Ok(EndpointSummary {
        endpoint: endpoint.to_string(),
        hits: count_requests(conn, endpoint, &[]).await?,
        users: count_users(conn, endpoint).await?,
        ips: count_ip(conn, endpoint).await?,
        versions: count_versions_end(conn, endpoint).await?,
        outliers: count_outliers(conn, endpoint).await?,
        profiled_requests: count_profiled_requests(conn, endpoint).await?,
    })
}
