//! Filter predicates for aggregation queries.
//!
//! Predicates are combined with AND and every value is sent as a bound
//! parameter, never interpolated into the SQL text.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite};

use super::column::{Column, Table};
use crate::constants::tables;
use crate::error::{InsightsError, Result};

/// A bindable predicate value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Text or SQL `NULL`; comparing anything with `NULL` matches no rows
    Text(Option<String>),
    Integer(i64),
    Real(f64),
    Timestamp(DateTime<Utc>),
}

impl SqlValue {
    fn push_bind<'args>(&self, query: &mut QueryBuilder<'args, Sqlite>) {
        match self {
            SqlValue::Text(value) => query.push_bind(value.clone()),
            SqlValue::Integer(value) => query.push_bind(*value),
            SqlValue::Real(value) => query.push_bind(*value),
            SqlValue::Timestamp(value) => query.push_bind(*value),
        };
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(Some(value.to_string()))
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(Some(value))
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Equals { column: Column, value: SqlValue },
    NotEquals { column: Column, value: SqlValue },
    GreaterThan { column: Column, value: SqlValue },
    LessThan { column: Column, value: SqlValue },
    /// Keep only requests that have at least one execution path line
    HasProfilingSample,
}

impl Predicate {
    pub fn eq(column: Column, value: impl Into<SqlValue>) -> Self {
        Predicate::Equals {
            column,
            value: value.into(),
        }
    }

    pub fn ne(column: Column, value: impl Into<SqlValue>) -> Self {
        Predicate::NotEquals {
            column,
            value: value.into(),
        }
    }

    pub fn gt(column: Column, value: impl Into<SqlValue>) -> Self {
        Predicate::GreaterThan {
            column,
            value: value.into(),
        }
    }

    pub fn lt(column: Column, value: impl Into<SqlValue>) -> Self {
        Predicate::LessThan {
            column,
            value: value.into(),
        }
    }

    /// Table whose rows this predicate filters
    pub fn table(&self) -> Table {
        match self {
            Predicate::Equals { column, .. }
            | Predicate::NotEquals { column, .. }
            | Predicate::GreaterThan { column, .. }
            | Predicate::LessThan { column, .. } => column.table(),
            Predicate::HasProfilingSample => Table::Requests,
        }
    }

    pub fn push_sql<'args>(&self, query: &mut QueryBuilder<'args, Sqlite>) {
        let (column, operator, value) = match self {
            Predicate::Equals { column, value } => (column, " = ", value),
            Predicate::NotEquals { column, value } => (column, " <> ", value),
            Predicate::GreaterThan { column, value } => (column, " > ", value),
            Predicate::LessThan { column, value } => (column, " < ", value),
            Predicate::HasProfilingSample => {
                query.push(format!(
                    "{}.id IN (SELECT {lines}.request_id FROM {lines})",
                    tables::REQUESTS,
                    lines = tables::EXECUTION_PATH_LINES
                ));
                return;
            }
        };
        // Stored timestamps may be RFC 3339 or SQLite's "YYYY-MM-DD HH:MM:SS"
        if let SqlValue::Timestamp(_) = value {
            query.push(format!("julianday({})", column.qualified()));
            query.push(operator);
            query.push("julianday(");
            value.push_bind(query);
            query.push(")");
            return;
        }

        query.push(column.qualified());
        query.push(operator);
        value.push_bind(query);
    }
}

/// Append ` WHERE p1 AND p2 ...`; nothing is appended for an empty list
pub fn push_where<'args>(query: &mut QueryBuilder<'args, Sqlite>, predicates: &[Predicate]) {
    for (index, predicate) in predicates.iter().enumerate() {
        query.push(if index == 0 { " WHERE " } else { " AND " });
        predicate.push_sql(query);
    }
}

/// Every predicate must filter the table being queried
pub fn validate_predicates(table: Table, predicates: &[Predicate]) -> Result<()> {
    if let Some(foreign) = predicates.iter().find(|p| p.table() != table) {
        return Err(InsightsError::ValidationError(format!(
            "predicate on {} cannot filter a query over {}",
            foreign.table(),
            table
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_push_where_joins_with_and() {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT 1 FROM requests");
        push_where(
            &mut query,
            &[
                Predicate::eq(Column::RequestEndpoint, "index"),
                Predicate::gt(Column::RequestDuration, 10.0),
                Predicate::HasProfilingSample,
            ],
        );

        assert_eq!(
            query.sql(),
            "SELECT 1 FROM requests WHERE requests.endpoint = ? AND requests.duration_ms > ? \
             AND requests.id IN (SELECT execution_path_lines.request_id FROM execution_path_lines)"
        );
    }

    #[test]
    fn test_timestamp_comparison_normalizes_both_sides() {
        let cutoff = Utc.with_ymd_and_hms(2024, 3, 22, 12, 0, 0).unwrap();
        let mut query = QueryBuilder::<Sqlite>::new("SELECT 1 FROM test_endpoints");
        push_where(
            &mut query,
            &[Predicate::gt(Column::TestEndpointTimeAdded, cutoff)],
        );

        assert_eq!(
            query.sql(),
            "SELECT 1 FROM test_endpoints \
             WHERE julianday(test_endpoints.time_added) > julianday(?)"
        );
    }

    #[test]
    fn test_empty_predicates_add_nothing() {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT 1 FROM outliers");
        push_where(&mut query, &[]);
        assert_eq!(query.sql(), "SELECT 1 FROM outliers");
    }

    #[test]
    fn test_validate_rejects_foreign_table() {
        let result = validate_predicates(
            Table::Outliers,
            &[Predicate::eq(Column::RequestEndpoint, "index")],
        );
        assert!(matches!(result, Err(InsightsError::ValidationError(_))));

        assert!(validate_predicates(Table::Requests, &[Predicate::HasProfilingSample]).is_ok());
        assert!(validate_predicates(Table::TestEndpoints, &[Predicate::HasProfilingSample]).is_err());
    }
}
