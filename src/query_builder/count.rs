//! # Distinct Row Counter
//!
//! `COUNT(DISTINCT column)` over the rows matching a predicate list. This is the
//! primitive every dashboard counter is built from.

use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use std::time::Instant;

use super::column::Column;
use super::conditions::{push_where, validate_predicates, Predicate};
use crate::error::Result;
use crate::logging::{log_error, log_query_operation};

/// Descriptor of one distinct-count query
#[derive(Debug, Clone, PartialEq)]
pub struct CountQuery {
    column: Column,
    predicates: Vec<Predicate>,
}

impl CountQuery {
    pub fn new(column: Column) -> Self {
        Self {
            column,
            predicates: Vec::new(),
        }
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn filters(mut self, predicates: impl IntoIterator<Item = Predicate>) -> Self {
        self.predicates.extend(predicates);
        self
    }

    pub fn column(&self) -> Column {
        self.column
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Build the bound query, rejecting predicates on other tables
    pub fn build(&self) -> Result<QueryBuilder<'static, Sqlite>> {
        let table = self.column.table();
        validate_predicates(table, &self.predicates)?;

        let mut query = QueryBuilder::new(format!(
            "SELECT COUNT(DISTINCT {}) FROM {}",
            self.column.qualified(),
            table
        ));
        push_where(&mut query, &self.predicates);
        Ok(query)
    }

    /// Number of distinct non-null values; 0 when nothing matches
    pub async fn execute(&self, conn: &mut SqliteConnection) -> Result<i64> {
        let mut query = self.build()?;
        let started = Instant::now();

        let count = query
            .build_query_scalar::<i64>()
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                log_error(
                    "query_builder",
                    "count_distinct",
                    &err.to_string(),
                    Some(self.column.name()),
                );
                err
            })?;

        log_query_operation(
            "count_distinct",
            self.column.table().as_str(),
            "completed",
            Some(started.elapsed().as_millis() as u64),
            Some(self.column.name()),
        );

        Ok(count.unwrap_or(0))
    }
}

/// Count the distinct values of `column` among rows matching every predicate
pub async fn count_distinct(
    conn: &mut SqliteConnection,
    column: Column,
    predicates: &[Predicate],
) -> Result<i64> {
    CountQuery::new(column)
        .filters(predicates.iter().cloned())
        .execute(conn)
        .await
}
