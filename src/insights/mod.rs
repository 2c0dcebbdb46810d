//! # Dashboard Insights
//!
//! Aggregations behind the monitoring dashboard pages.
//!
//! ## Key Components
//!
//! - [`counters`] - Distinct counts of users, IPs, versions, builds, hits and outliers
//! - [`grouped`] - One aggregate per endpoint over filtered test measurements
//! - [`lookup`] - Reading grouped results with an explicit default
//! - [`versions`] - Latest/previous tested version and rolling window cutoffs
//! - [`boxplot`] - Per-build execution time datasets
//! - [`comparison`] - Side-by-side median and coverage tables
//! - [`service`] - Session-scoped facade used by the HTTP layer
//!
//! All free functions take `&mut SqliteConnection` so several aggregations can
//! share one session. [`InsightsService`] acquires that session per call.

pub mod boxplot;
pub mod colors;
pub mod comparison;
pub mod counters;
pub mod grouped;
pub mod lookup;
pub mod service;
pub mod versions;

pub use boxplot::{
    build_dataset, build_identifiers, sample_size_control, BoxPlotDataset, BoxPlotSeries,
    PlotLayout, SampleSizeControl,
};
pub use colors::{ColorAssigner, HashColorAssigner};
pub use comparison::{
    coverage_comparison, median_comparison, CoverageReport, EndpointComparison, RouteRule,
    UntestedEndpoint,
};
pub use counters::{endpoint_summary, EndpointSummary};
pub use grouped::{aggregate_rows, group_by_endpoint, Count, GroupAggregate, Median};
pub use lookup::{get_value, get_value_or_none, lookup, EndpointMap};
pub use service::InsightsService;
pub use versions::VersionWindow;
