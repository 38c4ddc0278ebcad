//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while configuring or advancing a motor simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid parameter: {what}")]
    InvalidParameter { what: String },

    #[error("Engine not configured: call configure(step, method) before stepping")]
    NotConfigured,

    #[error("Invalid integration method: {value}")]
    InvalidMethod { value: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<dcm_solver::SolverError> for SimError {
    fn from(e: dcm_solver::SolverError) -> Self {
        match e {
            dcm_solver::SolverError::ConvergenceFailed { what } => {
                SimError::ConvergenceFailed { what }
            }
            other => SimError::Backend {
                message: other.to_string(),
            },
        }
    }
}

impl From<dcm_core::CoreError> for SimError {
    fn from(e: dcm_core::CoreError) -> Self {
        SimError::InvalidArg {
            what: e.to_string(),
        }
    }
}
