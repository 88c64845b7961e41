use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("dashboard is not initialized")]
    NotInitialized,

    #[error("failed to initialize dashboard from {source_name}: {reason}")]
    Initialization { source_name: String, reason: String },

    #[error("view consumer with id `{0}` is already registered")]
    DuplicateConsumer(String),
}
