//! # Grouped Aggregator
//!
//! One aggregate value per endpoint over the test measurements that match a
//! predicate list. Endpoints without matching measurements are absent from the
//! result rather than mapped to zero; see [`super::lookup`] for reading the
//! result with a default.

use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use std::time::Instant;

use super::lookup::EndpointMap;
use crate::error::Result;
use crate::logging::log_query_operation;
use crate::query_builder::{push_where, validate_predicates, Column, Predicate, Table};
use crate::statistics;

/// Reduces the execution times of one endpoint to a single value
pub trait GroupAggregate {
    type Output;

    /// `values` is sorted ascending and never empty. Returning `None` leaves the
    /// endpoint out of the result.
    fn aggregate(&self, values: &[f64]) -> Option<Self::Output>;
}

/// Number of measurements per endpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct Count;

impl GroupAggregate for Count {
    type Output = i64;

    fn aggregate(&self, values: &[f64]) -> Option<i64> {
        Some(values.len() as i64)
    }
}

/// Median execution time per endpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct Median;

impl GroupAggregate for Median {
    type Output = f64;

    fn aggregate(&self, values: &[f64]) -> Option<f64> {
        statistics::median(values)
    }
}

impl<F, V> GroupAggregate for F
where
    F: Fn(&[f64]) -> V,
{
    type Output = V;

    fn aggregate(&self, values: &[f64]) -> Option<V> {
        Some(self(values))
    }
}

/// Aggregate the execution times of matching `test_endpoints` rows per endpoint
pub async fn group_by_endpoint<A>(
    conn: &mut SqliteConnection,
    aggregate: &A,
    predicates: &[Predicate],
) -> Result<EndpointMap<A::Output>>
where
    A: GroupAggregate,
{
    validate_predicates(Table::TestEndpoints, predicates)?;

    let endpoint = Column::TestEndpointName.qualified();
    let execution_time = Column::TestEndpointExecutionTime.qualified();
    let mut query = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {endpoint}, {execution_time} FROM {}",
        Table::TestEndpoints
    ));
    push_where(&mut query, predicates);

    let started = Instant::now();
    let mut groups: EndpointMap<Vec<f64>> = EndpointMap::new();
    {
        let mut rows = query.build_query_as::<(String, f64)>().fetch(&mut *conn);
        while let Some((name, time)) = rows.try_next().await? {
            groups.entry(name).or_default().push(time);
        }
    }

    log_query_operation(
        "group_by_endpoint",
        Table::TestEndpoints.as_str(),
        "completed",
        Some(started.elapsed().as_millis() as u64),
        None,
    );

    Ok(aggregate_groups(groups, aggregate))
}

/// Group in-memory `(endpoint, execution time)` rows and aggregate each group
pub fn aggregate_rows<A, I>(rows: I, aggregate: &A) -> EndpointMap<A::Output>
where
    A: GroupAggregate,
    I: IntoIterator<Item = (String, f64)>,
{
    let mut groups: EndpointMap<Vec<f64>> = EndpointMap::new();
    for (name, time) in rows {
        groups.entry(name).or_default().push(time);
    }
    aggregate_groups(groups, aggregate)
}

fn aggregate_groups<A>(groups: EndpointMap<Vec<f64>>, aggregate: &A) -> EndpointMap<A::Output>
where
    A: GroupAggregate,
{
    groups
        .into_iter()
        .filter_map(|(name, mut values)| {
            values.sort_by(f64::total_cmp);
            aggregate.aggregate(&values).map(|value| (name, value))
        })
        .collect()
}

/// Most recent test measurement time per endpoint
pub async fn last_tested_times(conn: &mut SqliteConnection) -> Result<EndpointMap<DateTime<Utc>>> {
    // The bare time_added column is taken from the row holding the maximum
    let rows = sqlx::query_as::<_, (String, DateTime<Utc>, f64)>(
        r#"
        SELECT endpoint_name, time_added, MAX(julianday(time_added))
        FROM test_endpoints
        GROUP BY endpoint_name
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(rows.into_iter().map(|(name, time, _)| (name, time)).collect())
}

/// Most recent request time per endpoint
pub async fn last_requested_times(
    conn: &mut SqliteConnection,
) -> Result<EndpointMap<DateTime<Utc>>> {
    let rows = sqlx::query_as::<_, (String, DateTime<Utc>, f64)>(
        r#"
        SELECT endpoint, time_requested, MAX(julianday(time_requested))
        FROM requests
        GROUP BY endpoint
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(rows.into_iter().map(|(name, time, _)| (name, time)).collect())
}

/// Names of every endpoint with at least one test measurement, sorted
pub async fn tested_endpoint_names(conn: &mut SqliteConnection) -> Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT endpoint_name
        FROM test_endpoints
        ORDER BY endpoint_name
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(names)
}
