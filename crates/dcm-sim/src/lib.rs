//! Fixed-step simulation of a shunt DC motor.
//!
//! Provides:
//! - Two-state electromechanical motor model (armature current, rotor speed)
//! - Forward Euler, implicit trapezoidal and RK4 integrators
//! - `MotorEngine`: configure once, then step once per input sample
//! - Sampled sessions with a per-sample logbook
//! - Batch runner for any `TransientModel`

pub mod engine;
pub mod error;
pub mod integrator;
pub mod logbook;
pub mod method;
pub mod model;
pub mod motor;
pub mod session;
pub mod sim;

// Re-exports for public API
pub use engine::{MotorEngine, StepConfig};
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator, RK4, Trapezoidal, integrate};
pub use logbook::{LogRecord, Logbook};
pub use method::IntegrationMethod;
pub use model::TransientModel;
pub use motor::{MotorDynamics, MotorInputs, MotorParams, MotorState, ShuntMotor};
pub use session::SimSession;
pub use sim::{SimOptions, SimRecord, run_sim};
