//! # Version and Time Window Resolution
//!
//! Resolves the four parameters of the comparison views: the latest and the
//! previous tested application version, and the cutoffs of the recent and
//! extended rolling windows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use tracing::debug;

use crate::config::WindowConfig;
use crate::error::Result;
use crate::query_builder::{Column, Predicate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionWindow {
    /// Version of the most recently added test measurement
    pub latest: Option<String>,
    /// The next most recent distinct version, if two or more exist
    pub previous: Option<String>,
    /// Start of the recent window (`now - recent_days`)
    pub recent_cutoff: DateTime<Utc>,
    /// Start of the extended window (`now - extended_days`)
    pub extended_cutoff: DateTime<Utc>,
}

impl VersionWindow {
    pub async fn resolve(
        conn: &mut SqliteConnection,
        now: DateTime<Utc>,
        windows: &WindowConfig,
    ) -> Result<Self> {
        let versions = tested_versions_by_recency(conn, Some(2)).await?;
        let mut versions = versions.into_iter();

        let window = Self {
            latest: versions.next(),
            previous: versions.next(),
            recent_cutoff: now - windows.recent(),
            extended_cutoff: now - windows.extended(),
        };

        debug!(
            latest = ?window.latest,
            previous = ?window.previous,
            recent_cutoff = %window.recent_cutoff,
            extended_cutoff = %window.extended_cutoff,
            "Resolved version window"
        );

        Ok(window)
    }

    /// Measurements taken under the latest version
    pub fn latest_predicate(&self) -> Predicate {
        Predicate::eq(Column::TestEndpointVersion, self.latest.clone())
    }

    /// Measurements taken under the previous version; matches nothing when there is none
    pub fn previous_predicate(&self) -> Predicate {
        Predicate::eq(Column::TestEndpointVersion, self.previous.clone())
    }

    pub fn recent_predicate(&self) -> Predicate {
        Predicate::gt(Column::TestEndpointTimeAdded, self.recent_cutoff)
    }

    pub fn extended_predicate(&self) -> Predicate {
        Predicate::gt(Column::TestEndpointTimeAdded, self.extended_cutoff)
    }
}

/// Distinct tested versions, most recent first.
///
/// A version's recency is the time of its newest measurement; versions whose
/// newest measurements share a timestamp are ordered by version text, descending.
pub async fn tested_versions_by_recency(
    conn: &mut SqliteConnection,
    limit: Option<u32>,
) -> Result<Vec<String>> {
    let versions = sqlx::query_scalar::<_, String>(
        r#"
        SELECT app_version
        FROM test_endpoints
        GROUP BY app_version
        ORDER BY MAX(julianday(time_added)) DESC, app_version DESC
        LIMIT ?
        "#,
    )
    // SQLite treats a negative LIMIT as unbounded
    .bind(limit.map_or(-1, i64::from))
    .fetch_all(conn)
    .await?;

    Ok(versions)
}
