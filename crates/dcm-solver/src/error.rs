//! Error types for solver operations.

use dcm_core::CoreError;
use thiserror::Error;

/// Errors that can occur while solving a nonlinear system.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Invalid state: {what}")]
    InvalidState { what: String },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Residual evaluation failed: {message}")]
    Residual { message: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },

    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

pub type SolverResult<T> = Result<T, SolverError>;
