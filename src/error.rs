use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InsightsError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Migration error: {0}")]
    MigrationError(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for InsightsError {
    fn from(err: sqlx::Error) -> Self {
        InsightsError::DatabaseError(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for InsightsError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        InsightsError::MigrationError(err.to_string())
    }
}

impl From<serde_json::Error> for InsightsError {
    fn from(err: serde_json::Error) -> Self {
        InsightsError::ValidationError(format!("JSON serialization error: {err}"))
    }
}

impl From<config::ConfigError> for InsightsError {
    fn from(err: config::ConfigError) -> Self {
        InsightsError::ConfigurationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, InsightsError>;
