//! # Comparison Views
//!
//! Per-endpoint tables that put the latest version, the previous version, the
//! recent window and the extended window side by side. Endpoints missing from
//! one slice still get a row: medians read as `None` there, counts as `0`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use std::collections::BTreeSet;
use tracing::debug;

use super::colors::ColorAssigner;
use super::grouped::{
    group_by_endpoint, last_requested_times, last_tested_times, tested_endpoint_names, Count,
    GroupAggregate, Median,
};
use super::lookup::{get_value, get_value_or_none, EndpointMap};
use super::versions::VersionWindow;
use crate::config::WindowConfig;
use crate::error::Result;

/// One row of a comparison table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointComparison<V> {
    pub name: String,
    pub color: String,
    pub latest: V,
    pub previous: V,
    pub week: V,
    pub four_weeks: V,
    pub last_tested: Option<DateTime<Utc>>,
}

/// A route registered by the HTTP layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    pub endpoint: String,
    pub rule: String,
    pub methods: Vec<String>,
}

/// A declared route that no test has exercised
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UntestedEndpoint {
    pub endpoint: String,
    pub rule: String,
    pub methods: Vec<String>,
    pub color: String,
    pub last_accessed: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub tested: Vec<EndpointComparison<i64>>,
    pub untested: Vec<UntestedEndpoint>,
}

/// Median execution time per tested endpoint in each slice; `None` where the
/// endpoint has no measurements in that slice
pub async fn median_comparison(
    conn: &mut SqliteConnection,
    now: DateTime<Utc>,
    windows: &WindowConfig,
    colors: &dyn ColorAssigner,
) -> Result<Vec<EndpointComparison<Option<f64>>>> {
    compare_endpoints(conn, now, windows, colors, &Median, get_value_or_none).await
}

/// Number of test measurements per tested endpoint in each slice, plus the
/// declared routes without any test data
pub async fn coverage_comparison(
    conn: &mut SqliteConnection,
    now: DateTime<Utc>,
    windows: &WindowConfig,
    colors: &dyn ColorAssigner,
    routes: &[RouteRule],
) -> Result<CoverageReport> {
    let tested = compare_endpoints(
        conn,
        now,
        windows,
        colors,
        &Count,
        |map: &EndpointMap<i64>, name: &str| get_value(map, name, 0),
    )
    .await?;

    let tested_names: BTreeSet<&str> = tested.iter().map(|row| row.name.as_str()).collect();
    let last_accessed = last_requested_times(conn).await?;

    let untested: Vec<UntestedEndpoint> = routes
        .iter()
        .filter(|route| !tested_names.contains(route.endpoint.as_str()))
        .map(|route| UntestedEndpoint {
            endpoint: route.endpoint.clone(),
            rule: route.rule.clone(),
            methods: route.methods.clone(),
            color: colors.color_for(&route.endpoint),
            last_accessed: get_value_or_none(&last_accessed, &route.endpoint),
        })
        .collect();

    debug!(
        tested = tested.len(),
        untested = untested.len(),
        routes = routes.len(),
        "Computed endpoint coverage"
    );

    Ok(CoverageReport { tested, untested })
}

async fn compare_endpoints<A, D, F>(
    conn: &mut SqliteConnection,
    now: DateTime<Utc>,
    windows: &WindowConfig,
    colors: &dyn ColorAssigner,
    aggregate: &A,
    read: F,
) -> Result<Vec<EndpointComparison<D>>>
where
    A: GroupAggregate,
    F: Fn(&EndpointMap<A::Output>, &str) -> D,
{
    let window = VersionWindow::resolve(conn, now, windows).await?;

    let latest = group_by_endpoint(conn, aggregate, &[window.latest_predicate()]).await?;
    let previous = group_by_endpoint(conn, aggregate, &[window.previous_predicate()]).await?;
    let week = group_by_endpoint(conn, aggregate, &[window.recent_predicate()]).await?;
    let four_weeks = group_by_endpoint(conn, aggregate, &[window.extended_predicate()]).await?;
    let tested_times = last_tested_times(conn).await?;

    let rows = tested_endpoint_names(conn)
        .await?
        .into_iter()
        .map(|name| EndpointComparison {
            color: colors.color_for(&name),
            latest: read(&latest, &name),
            previous: read(&previous, &name),
            week: read(&week, &name),
            four_weeks: read(&four_weeks, &name),
            last_tested: get_value_or_none(&tested_times, &name),
            name,
        })
        .collect();

    Ok(rows)
}
