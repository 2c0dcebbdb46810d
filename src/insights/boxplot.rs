//! # Per-Build Box Plots
//!
//! Builds the chart dataset that compares endpoint execution times across the
//! most recent builds. The dataset is plain data; rendering is left to the chart
//! layer, which receives it as JSON.

use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use std::num::NonZeroU32;
use tracing::debug;

use super::counters::count_builds_endpoint;
use crate::constants::boxplot::{NEUTRAL_MARKER_COLOR, X_AXIS_TITLE, Y_AXIS_TITLE};
use crate::error::Result;
use crate::query_builder::{push_where, Column, Predicate, Table};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub color: String,
}

/// Execution times of one build, drawn as a single horizontal box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotSeries {
    pub label: String,
    pub values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

impl BoxPlotSeries {
    fn for_build(build: &str, values: Vec<f64>, endpoint: Option<&str>) -> Self {
        let label = format!("{build} -");
        match endpoint {
            Some(endpoint) => Self {
                label,
                values,
                name: Some(endpoint.to_string()),
                marker: None,
            },
            None => Self {
                label,
                values,
                name: None,
                marker: Some(Marker {
                    color: NEUTRAL_MARKER_COLOR.to_string(),
                }),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
    #[serde(default)]
    pub reversed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotLayout {
    pub x_axis: Axis,
    pub y_axis: Axis,
}

impl Default for PlotLayout {
    /// Execution time along x, builds along y with the newest build on top
    fn default() -> Self {
        Self {
            x_axis: Axis {
                title: X_AXIS_TITLE.to_string(),
                reversed: false,
            },
            y_axis: Axis {
                title: Y_AXIS_TITLE.to_string(),
                reversed: true,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotDataset {
    /// One entry per build, newest build first
    pub series: Vec<BoxPlotSeries>,
    pub layout: PlotLayout,
}

impl BoxPlotDataset {
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Bounds of the "number of builds" selector shown above the plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleSizeControl {
    /// Number of builds available
    pub max: i64,
    /// Selected number of builds, never above `max`
    pub value: i64,
}

impl SampleSizeControl {
    pub fn new(max: i64, default_limit: u32) -> Self {
        let max = max.max(0);
        Self {
            max,
            value: i64::from(default_limit).min(max),
        }
    }

    /// The selection as a build limit, `None` when no builds exist
    pub fn build_limit(&self) -> Option<NonZeroU32> {
        u32::try_from(self.value).ok().and_then(NonZeroU32::new)
    }
}

pub async fn sample_size_control(
    conn: &mut SqliteConnection,
    default_limit: u32,
) -> Result<SampleSizeControl> {
    let builds = count_builds_endpoint(conn).await?;
    Ok(SampleSizeControl::new(builds, default_limit))
}

/// Distinct build identifiers of the endpoint measurements, newest first.
///
/// A build's recency is the time of its newest measurement; ties go to the
/// build with the higher row id.
pub async fn build_identifiers(
    conn: &mut SqliteConnection,
    limit: Option<NonZeroU32>,
) -> Result<Vec<String>> {
    let builds = sqlx::query_scalar::<_, String>(
        r#"
        SELECT build_id
        FROM test_endpoints
        GROUP BY build_id
        ORDER BY MAX(julianday(time_added)) DESC, MAX(id) DESC
        LIMIT ?
        "#,
    )
    // SQLite treats a negative LIMIT as unbounded
    .bind(limit.map_or(-1, |limit| i64::from(limit.get())))
    .fetch_all(conn)
    .await?;

    Ok(builds)
}

/// Execution times recorded for a build, optionally for one endpoint only, in row order
pub async fn build_measurements(
    conn: &mut SqliteConnection,
    build: &str,
    endpoint: Option<&str>,
) -> Result<Vec<f64>> {
    let mut predicates = vec![Predicate::eq(Column::TestEndpointBuild, build)];
    if let Some(endpoint) = endpoint {
        predicates.push(Predicate::eq(Column::TestEndpointName, endpoint));
    }

    let mut query = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {} FROM {}",
        Column::TestEndpointExecutionTime.qualified(),
        Table::TestEndpoints
    ));
    push_where(&mut query, &predicates);
    query.push(format!(" ORDER BY {}.id", Table::TestEndpoints));

    let values = query.build_query_scalar::<f64>().fetch_all(conn).await?;
    Ok(values)
}

/// Box-plot dataset over the most recent builds.
///
/// Returns `None` when no build has been recorded. Builds without measurements
/// for the endpoint still get a series, with no values.
pub async fn build_dataset(
    conn: &mut SqliteConnection,
    endpoint: Option<&str>,
    build_limit: Option<NonZeroU32>,
) -> Result<Option<BoxPlotDataset>> {
    let builds = build_identifiers(conn, build_limit).await?;
    if builds.is_empty() {
        debug!(endpoint = ?endpoint, "No builds recorded, skipping box plot");
        return Ok(None);
    }

    let mut series = Vec::with_capacity(builds.len());
    for build in &builds {
        let values = build_measurements(conn, build, endpoint).await?;
        series.push(BoxPlotSeries::for_build(build, values, endpoint));
    }

    debug!(
        endpoint = ?endpoint,
        builds = builds.len(),
        "Built box plot dataset"
    );

    Ok(Some(BoxPlotDataset {
        series,
        layout: PlotLayout::default(),
    }))
}
