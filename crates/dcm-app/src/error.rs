//! Error types for the dcm-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// provides a unified error interface for front-ends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to write output file: {path}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Controller error: {0}")]
    Control(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for dcm-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<dcm_project::ProjectError> for AppError {
    fn from(err: dcm_project::ProjectError) -> Self {
        match err {
            dcm_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<dcm_project::ValidationError> for AppError {
    fn from(err: dcm_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<dcm_sim::SimError> for AppError {
    fn from(err: dcm_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<dcm_controls::ControlError> for AppError {
    fn from(err: dcm_controls::ControlError) -> Self {
        AppError::Control(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
