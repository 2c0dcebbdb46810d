//! # Query Building
//!
//! Typed query descriptors for the aggregation layer.
//!
//! ## Key Components
//!
//! - [`column`] - Table and column identifiers
//! - [`conditions`] - Bound filter predicates combined with AND
//! - [`count`] - The generic distinct row counter
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use dashboard_insights::query_builder::{Column, CountQuery, Predicate};
//!
//! # async fn example(conn: &mut sqlx::SqliteConnection) -> dashboard_insights::Result<()> {
//! let distinct_users = CountQuery::new(Column::RequestGroupBy)
//!     .filter(Predicate::eq(Column::RequestEndpoint, "index"))
//!     .execute(conn)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod column;
pub mod conditions;
pub mod count;

pub use column::{Column, Table};
pub use conditions::{push_where, validate_predicates, Predicate, SqlValue};
pub use count::{count_distinct, CountQuery};
