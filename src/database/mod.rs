//! # Database Operations
//!
//! Read-side access to the monitoring store through SQLx.
//!
//! ## Key Components
//!
//! - [`connection`] - Pool construction and scoped per-call sessions
//! - [`migrations`] - Embedded schema migrations
//!
//! ## Scoped Sessions
//!
//! Every aggregation acquires one pooled connection through
//! [`DatabaseConnection::session`]. The returned guard hands the connection back
//! to the pool when dropped, so it is released on success and on `?` propagation
//! alike.
//!
//! ```rust,no_run
//! use dashboard_insights::config::DatabaseConfig;
//! use dashboard_insights::database::DatabaseConnection;
//! use dashboard_insights::insights::counters;
//!
//! # async fn example() -> dashboard_insights::Result<()> {
//! let db = DatabaseConnection::connect(&DatabaseConfig::default()).await?;
//! let mut session = db.session().await?;
//! let users = counters::count_users(&mut session, "index").await?;
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod migrations;

pub use connection::{DatabaseConnection, Session};
pub use migrations::DatabaseMigrations;
