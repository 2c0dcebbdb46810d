//! # Insights Service
//!
//! Entry point for the HTTP layer. Each method borrows one pooled session for
//! the duration of the call; the session goes back to the pool when it is
//! dropped, whether the call succeeds or fails.
//!
//! ```rust
//! use dashboard_insights::config::InsightsConfig;
//! use dashboard_insights::insights::InsightsService;
//!
//! # tokio_test::block_on(async {
//! let mut config = InsightsConfig::default();
//! config.database.url = "sqlite::memory:".to_string();
//!
//! let service = InsightsService::connect(&config).await.unwrap();
//! assert_eq!(service.count_users("index").await.unwrap(), 0);
//! assert!(service.build_performance(None, None).await.unwrap().is_none());
//! # });
//! ```

use chrono::{DateTime, Utc};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::instrument;

use super::boxplot::{self, BoxPlotDataset, SampleSizeControl};
use super::colors::{ColorAssigner, HashColorAssigner};
use super::comparison::{self, CoverageReport, EndpointComparison, RouteRule};
use super::counters::{self, EndpointSummary};
use crate::config::{BoxPlotConfig, InsightsConfig, WindowConfig};
use crate::database::{DatabaseConnection, Session};
use crate::error::Result;
use crate::models::{ExecutionPathLine, Outlier, Request, TestEndpoint, TestRun};
use crate::query_builder::Predicate;

#[derive(Clone)]
pub struct InsightsService {
    database: DatabaseConnection,
    windows: WindowConfig,
    boxplot: BoxPlotConfig,
    colors: Arc<dyn ColorAssigner>,
}

impl std::fmt::Debug for InsightsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightsService")
            .field("database", &self.database)
            .field("windows", &self.windows)
            .field("boxplot", &self.boxplot)
            .finish_non_exhaustive()
    }
}

impl InsightsService {
    pub fn new(
        database: DatabaseConnection,
        config: &InsightsConfig,
        colors: Arc<dyn ColorAssigner>,
    ) -> Self {
        Self {
            database,
            windows: config.windows,
            boxplot: config.boxplot.clone(),
            colors,
        }
    }

    /// Connect to the configured store and use [`HashColorAssigner`] for colors
    pub async fn connect(config: &InsightsConfig) -> Result<Self> {
        let database = DatabaseConnection::connect(&config.database).await?;
        Ok(Self::new(database, config, Arc::new(HashColorAssigner)))
    }

    pub fn database(&self) -> &DatabaseConnection {
        &self.database
    }

    async fn session(&self) -> Result<Session> {
        self.database.session().await
    }

    #[instrument(skip(self))]
    pub async fn count_users(&self, endpoint: &str) -> Result<i64> {
        let mut session = self.session().await?;
        counters::count_users(&mut session, endpoint).await
    }

    #[instrument(skip(self))]
    pub async fn count_ip(&self, endpoint: &str) -> Result<i64> {
        let mut session = self.session().await?;
        counters::count_ip(&mut session, endpoint).await
    }

    #[instrument(skip(self))]
    pub async fn count_versions(&self) -> Result<i64> {
        let mut session = self.session().await?;
        counters::count_versions(&mut session).await
    }

    #[instrument(skip(self))]
    pub async fn count_versions_end(&self, endpoint: &str) -> Result<i64> {
        let mut session = self.session().await?;
        counters::count_versions_end(&mut session, endpoint).await
    }

    #[instrument(skip(self))]
    pub async fn count_builds(&self) -> Result<i64> {
        let mut session = self.session().await?;
        counters::count_builds(&mut session).await
    }

    #[instrument(skip(self))]
    pub async fn count_builds_endpoint(&self) -> Result<i64> {
        let mut session = self.session().await?;
        counters::count_builds_endpoint(&mut session).await
    }

    #[instrument(skip(self, extra))]
    pub async fn count_requests(&self, endpoint: &str, extra: &[Predicate]) -> Result<i64> {
        let mut session = self.session().await?;
        counters::count_requests(&mut session, endpoint, extra).await
    }

    #[instrument(skip(self, predicates))]
    pub async fn count_total_requests(&self, predicates: &[Predicate]) -> Result<i64> {
        let mut session = self.session().await?;
        counters::count_total_requests(&mut session, predicates).await
    }

    #[instrument(skip(self))]
    pub async fn count_outliers(&self, endpoint: &str) -> Result<i64> {
        let mut session = self.session().await?;
        counters::count_outliers(&mut session, endpoint).await
    }

    #[instrument(skip(self))]
    pub async fn count_profiled_requests(&self, endpoint: &str) -> Result<i64> {
        let mut session = self.session().await?;
        counters::count_profiled_requests(&mut session, endpoint).await
    }

    #[instrument(skip(self))]
    pub async fn endpoint_summary(&self, endpoint: &str) -> Result<EndpointSummary> {
        let mut session = self.session().await?;
        counters::endpoint_summary(&mut session, endpoint).await
    }

    /// Median execution time comparison as of now
    pub async fn test_monitor(&self) -> Result<Vec<EndpointComparison<Option<f64>>>> {
        self.test_monitor_at(Utc::now()).await
    }

    #[instrument(skip(self))]
    pub async fn test_monitor_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<EndpointComparison<Option<f64>>>> {
        let mut session = self.session().await?;
        comparison::median_comparison(&mut session, now, &self.windows, self.colors.as_ref()).await
    }

    /// Test coverage of the declared routes as of now
    pub async fn endpoint_coverage(&self, routes: &[RouteRule]) -> Result<CoverageReport> {
        self.endpoint_coverage_at(Utc::now(), routes).await
    }

    #[instrument(skip(self, routes), fields(routes = routes.len()))]
    pub async fn endpoint_coverage_at(
        &self,
        now: DateTime<Utc>,
        routes: &[RouteRule],
    ) -> Result<CoverageReport> {
        let mut session = self.session().await?;
        comparison::coverage_comparison(
            &mut session,
            now,
            &self.windows,
            self.colors.as_ref(),
            routes,
        )
        .await
    }

    /// Per-build box plot; all endpoints when `endpoint` is `None`
    #[instrument(skip(self))]
    pub async fn build_performance(
        &self,
        endpoint: Option<&str>,
        build_limit: Option<NonZeroU32>,
    ) -> Result<Option<BoxPlotDataset>> {
        let mut session = self.session().await?;
        boxplot::build_dataset(&mut session, endpoint, build_limit).await
    }

    #[instrument(skip(self))]
    pub async fn sample_size_control(&self) -> Result<SampleSizeControl> {
        let mut session = self.session().await?;
        boxplot::sample_size_control(&mut session, self.boxplot.default_build_limit).await
    }

    /// A single recorded request, `None` when the id is unknown
    #[instrument(skip(self))]
    pub async fn request(&self, id: i64) -> Result<Option<Request>> {
        let mut session = self.session().await?;
        Request::find_by_id(&mut session, id).await
    }

    /// Outliers of an endpoint, newest first
    #[instrument(skip(self))]
    pub async fn outliers(&self, endpoint: &str) -> Result<Vec<Outlier>> {
        let mut session = self.session().await?;
        Outlier::for_endpoint(&mut session, endpoint).await
    }

    /// Profiler lines of a request in execution order
    #[instrument(skip(self))]
    pub async fn request_profile(&self, request_id: i64) -> Result<Vec<ExecutionPathLine>> {
        let mut session = self.session().await?;
        ExecutionPathLine::for_request(&mut session, request_id).await
    }

    #[instrument(skip(self))]
    pub async fn suite_runs(&self, suite: i64) -> Result<Vec<TestRun>> {
        let mut session = self.session().await?;
        TestRun::for_suite(&mut session, suite).await
    }

    /// Raw endpoint measurements behind one box of the build plot
    #[instrument(skip(self))]
    pub async fn build_samples(&self, build_id: &str) -> Result<Vec<TestEndpoint>> {
        let mut session = self.session().await?;
        TestEndpoint::for_build(&mut session, build_id).await
    }
}
