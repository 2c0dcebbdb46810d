//! # Insights Configuration System
//!
//! Layered configuration for the aggregation layer. Values come from an optional
//! base YAML file, an optional environment-specific YAML file, and finally
//! `INSIGHTS__*` environment variables, with `DATABASE_URL` taking precedence for
//! the connection string.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dashboard_insights::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let url = &manager.config().database.url;
//! let recent_days = manager.config().windows.recent_days;
//! # Ok(())
//! # }
//! ```

pub mod loader;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::constants::{boxplot, windows};
use crate::error::{InsightsError, Result};

pub use loader::ConfigManager;

/// Root configuration structure mirroring insights.yaml
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InsightsConfig {
    /// Store connection and pooling configuration
    pub database: DatabaseConfig,

    /// Rolling comparison windows
    pub windows: WindowConfig,

    /// Box-plot sample size defaults
    pub boxplot: BoxPlotConfig,

    /// Logging output settings
    pub logging: LoggingConfig,
}

/// Store connection and pooling configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    /// Apply embedded migrations when connecting
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://dashboard.db?mode=rwc".to_string(),
            max_connections: 5,
            acquire_timeout_seconds: 30,
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    /// In-memory databases vanish with their connection, so the pool must hold exactly one
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    pub fn acquire_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.acquire_timeout_seconds)
    }
}

/// Rolling windows for the "last week" and "last four weeks" comparison columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub recent_days: i64,
    pub extended_days: i64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            recent_days: windows::RECENT_WINDOW_DAYS,
            extended_days: windows::EXTENDED_WINDOW_DAYS,
        }
    }
}

impl WindowConfig {
    pub fn recent(&self) -> Duration {
        Duration::days(self.recent_days)
    }

    pub fn extended(&self) -> Duration {
        Duration::days(self.extended_days)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BoxPlotConfig {
    /// Number of builds preselected on the sample-size control
    pub default_build_limit: u32,
}

impl Default for BoxPlotConfig {
    fn default() -> Self {
        Self {
            default_build_limit: boxplot::DEFAULT_BUILD_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Overrides the environment-derived level when set
    pub level: Option<String>,
}

impl InsightsConfig {
    /// Reject configurations the aggregation layer cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(InsightsError::ConfigurationError(
                "database.url must not be empty".to_string(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(InsightsError::ConfigurationError(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }

        if self.windows.recent_days <= 0 || self.windows.extended_days <= 0 {
            return Err(InsightsError::ConfigurationError(format!(
                "comparison windows must be positive (recent_days={}, extended_days={})",
                self.windows.recent_days, self.windows.extended_days
            )));
        }

        if self.windows.recent_days > self.windows.extended_days {
            return Err(InsightsError::ConfigurationError(format!(
                "windows.recent_days ({}) must not exceed windows.extended_days ({})",
                self.windows.recent_days, self.windows.extended_days
            )));
        }

        if self.boxplot.default_build_limit == 0 {
            return Err(InsightsError::ConfigurationError(
                "boxplot.default_build_limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
