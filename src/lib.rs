#![allow(clippy::doc_markdown)] // Allow technical terms like SQLite, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Dashboard Insights
//!
//! Aggregation core of a performance-monitoring dashboard.
//!
//! ## Overview
//!
//! An instrumented web application records every request, outlier, profiler
//! sample and test measurement into an append-only store. This crate turns those
//! rows into the numbers and datasets the dashboard renders: distinct counters,
//! per-endpoint aggregates, version and time-window comparisons, and per-build
//! box plots.
//!
//! ## Module Organization
//!
//! - [`insights`] - Counters, grouped aggregates, comparisons and box plots
//! - [`query_builder`] - Typed distinct-count and predicate descriptors
//! - [`models`] - Read-only record types
//! - [`database`] - Pool, scoped sessions and embedded migrations
//! - [`config`] - Layered YAML and environment configuration
//! - [`logging`] - Structured logging setup
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dashboard_insights::config::ConfigManager;
//! use dashboard_insights::insights::InsightsService;
//!
//! # async fn example() -> dashboard_insights::Result<()> {
//! dashboard_insights::logging::init_structured_logging();
//!
//! let manager = ConfigManager::load()?;
//! let service = InsightsService::connect(manager.config()).await?;
//!
//! let users = service.count_users("index").await?;
//! let rows = service.test_monitor().await?;
//! println!("{users} users, {} tested endpoints", rows.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! Tests run against in-memory SQLite databases migrated on connect:
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests
//! ```

pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod insights;
pub mod logging;
pub mod models;
pub mod query_builder;
pub mod statistics;

pub use config::{ConfigManager, DatabaseConfig, InsightsConfig, WindowConfig};
pub use database::{DatabaseConnection, Session};
pub use error::{InsightsError, Result};
pub use insights::{get_value, EndpointMap, InsightsService};
pub use query_builder::{count_distinct, Column, CountQuery, Predicate};
