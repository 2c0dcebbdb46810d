//! # Monitoring Records
//!
//! Read-only views of the append-only records written by the ingestion
//! pipeline. Nothing in this crate inserts, updates, or deletes these rows.

pub mod execution_path_line;
pub mod outlier;
pub mod request;
pub mod test_endpoint;
pub mod test_run;

// Re-export core models for easy access
pub use execution_path_line::ExecutionPathLine;
pub use outlier::Outlier;
pub use request::Request;
pub use test_endpoint::TestEndpoint;
pub use test_run::TestRun;
