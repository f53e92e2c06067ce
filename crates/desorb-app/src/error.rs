//! Error types for the desorb-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and gives front ends a single error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Experiment error: {0}")]
    Experiment(String),

    #[error("Experiment validation failed: {0}")]
    Validation(String),

    #[error("Reduction failed: {0}")]
    Reduce(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("No previous run recorded; run an experiment or the demo first")]
    NoLastRun,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to write {path}: {message}")]
    Export { path: PathBuf, message: String },

    #[error("Chart rendering failed for {path}: {message}")]
    Chart { path: PathBuf, message: String },

    #[error("Property table error: {0}")]
    Tables(#[from] desorb_props::PropsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for desorb-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<desorb_project::ProjectError> for AppError {
    fn from(err: desorb_project::ProjectError) -> Self {
        match err {
            desorb_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Experiment(other.to_string()),
        }
    }
}

impl From<desorb_project::ValidationError> for AppError {
    fn from(err: desorb_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<desorb_reduce::ReduceError> for AppError {
    fn from(err: desorb_reduce::ReduceError) -> Self {
        AppError::Reduce(err.to_string())
    }
}

impl From<desorb_results::ResultsError> for AppError {
    fn from(err: desorb_results::ResultsError) -> Self {
        match err {
            desorb_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}
