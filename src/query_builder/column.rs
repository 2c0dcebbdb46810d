//! Typed identifiers for the tables and columns the aggregation layer reads.

use std::fmt;

use crate::constants::tables;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Requests,
    Outliers,
    ExecutionPathLines,
    TestRuns,
    TestEndpoints,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Requests => tables::REQUESTS,
            Table::Outliers => tables::OUTLIERS,
            Table::ExecutionPathLines => tables::EXECUTION_PATH_LINES,
            Table::TestRuns => tables::TEST_RUNS,
            Table::TestEndpoints => tables::TEST_ENDPOINTS,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column that can be counted or filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    RequestId,
    RequestEndpoint,
    RequestGroupBy,
    RequestIp,
    RequestVersion,
    RequestTime,
    RequestDuration,
    OutlierId,
    OutlierEndpoint,
    ExecutionPathLineRequestId,
    TestRunSuite,
    TestRunVersion,
    TestRunTimeAdded,
    TestEndpointName,
    TestEndpointVersion,
    TestEndpointBuild,
    TestEndpointTimeAdded,
    TestEndpointExecutionTime,
}

impl Column {
    pub fn table(&self) -> Table {
        match self {
            Column::RequestId
            | Column::RequestEndpoint
            | Column::RequestGroupBy
            | Column::RequestIp
            | Column::RequestVersion
            | Column::RequestTime
            | Column::RequestDuration => Table::Requests,
            Column::OutlierId | Column::OutlierEndpoint => Table::Outliers,
            Column::ExecutionPathLineRequestId => Table::ExecutionPathLines,
            Column::TestRunSuite | Column::TestRunVersion | Column::TestRunTimeAdded => {
                Table::TestRuns
            }
            Column::TestEndpointName
            | Column::TestEndpointVersion
            | Column::TestEndpointBuild
            | Column::TestEndpointTimeAdded
            | Column::TestEndpointExecutionTime => Table::TestEndpoints,
        }
    }

    /// Column name within its table
    pub fn name(&self) -> &'static str {
        match self {
            Column::RequestId | Column::OutlierId => "id",
            Column::RequestEndpoint | Column::OutlierEndpoint => "endpoint",
            Column::RequestGroupBy => "group_by",
            Column::RequestIp => "ip",
            Column::RequestVersion | Column::TestRunVersion => "version",
            Column::RequestTime => "time_requested",
            Column::RequestDuration => "duration_ms",
            Column::ExecutionPathLineRequestId => "request_id",
            Column::TestRunSuite => "suite",
            Column::TestRunTimeAdded | Column::TestEndpointTimeAdded => "time_added",
            Column::TestEndpointName => "endpoint_name",
            Column::TestEndpointVersion => "app_version",
            Column::TestEndpointBuild => "build_id",
            Column::TestEndpointExecutionTime => "execution_time_ms",
        }
    }

    /// `table.column`, safe to embed in SQL since both parts are static identifiers
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.table(), self.name())
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table(), self.name())
    }
}
