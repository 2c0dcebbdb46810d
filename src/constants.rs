//! # Dashboard Constants
//!
//! Fixed values shared by the aggregation layer: table names, default comparison
//! windows, and the presentation defaults baked into box-plot datasets.

/// Storage table names
pub mod tables {
    pub const REQUESTS: &str = "requests";
    pub const OUTLIERS: &str = "outliers";
    pub const EXECUTION_PATH_LINES: &str = "execution_path_lines";
    pub const TEST_RUNS: &str = "test_runs";
    pub const TEST_ENDPOINTS: &str = "test_endpoints";
}

/// Rolling comparison windows, in days
pub mod windows {
    pub const RECENT_WINDOW_DAYS: i64 = 7;
    pub const EXTENDED_WINDOW_DAYS: i64 = 28;
}

/// Box-plot presentation defaults
pub mod boxplot {
    /// Marker color used when a dataset spans all endpoints
    pub const NEUTRAL_MARKER_COLOR: &str = "rgb(105, 105, 105)";
    pub const X_AXIS_TITLE: &str = "Execution time (ms)";
    pub const Y_AXIS_TITLE: &str = "Build";
    /// Default number of builds shown when the caller supplies no limit
    pub const DEFAULT_BUILD_LIMIT: u32 = 10;
}

/// Environment variables read during configuration and logging setup
pub mod env {
    pub const ENVIRONMENT: &str = "INSIGHTS_ENV";
    pub const APP_ENVIRONMENT: &str = "APP_ENV";
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const CONFIG_PREFIX: &str = "INSIGHTS";
}
