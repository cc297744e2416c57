use thiserror::Error;

/// Failures at the edges of the scheduler: files, formats and the server.
/// Scheduling problems themselves are reported as `ValidationError` data.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse config file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Schedule generation rejected: {0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
