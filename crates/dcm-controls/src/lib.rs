//! Discrete controllers for closing loops around the motor simulator.
//!
//! Controllers are sampled: they are updated once per sample period and their
//! output is held constant in between (zero-order hold on the motor inputs).

pub mod controller;
pub mod error;

pub use controller::{PidController, PidState};
pub use error::{ControlError, ControlResult};
