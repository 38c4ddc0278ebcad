//! Dense nonlinear solver used by implicit time integration.
//!
//! Unknowns are packed into an `nalgebra::DVector`; the caller supplies a
//! residual (and optionally an analytic Jacobian) through [`NonlinearSystem`].

pub mod error;
pub mod jacobian;
pub mod newton;

pub use error::{SolverError, SolverResult};
pub use jacobian::finite_difference_jacobian;
pub use newton::{NewtonConfig, NewtonResult, NonlinearSystem, newton_solve};
