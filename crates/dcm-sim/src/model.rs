//! TransientModel trait for pluggable dynamic systems.

use crate::error::{SimError, SimResult};
use dcm_solver::{SolverError, finite_difference_jacobian};
use nalgebra::{DMatrix, DVector};

/// Trait for transient (dynamic) system models.
///
/// A TransientModel must implement:
/// - State type (Clone, for snapshots)
/// - Initial state
/// - RHS (right-hand side) computation: x_dot = f(t, x)
/// - Scalar field arithmetic for integration: add states, scale by scalar
/// - Packing to and from a dense vector, used by implicit integrators
pub trait TransientModel {
    /// State type (must be Clone).
    type State: Clone;

    /// Return the initial state at t=0.
    fn initial_state(&self) -> Self::State;

    /// Compute state derivative dxdt = f(t, x).
    ///
    /// Takes &mut self so models may cache intermediate results between calls.
    fn rhs(&mut self, t: f64, x: &Self::State) -> SimResult<Self::State>;

    /// Add two states element-wise: result = a + b.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Scale a state by a scalar: result = scale * a.
    fn scale(&self, a: &Self::State, scale: f64) -> Self::State;

    /// Pack a state into a dense vector.
    fn to_vector(&self, x: &Self::State) -> DVector<f64>;

    /// Unpack a dense vector into a state.
    fn from_vector(&self, v: &DVector<f64>) -> SimResult<Self::State>;

    /// Jacobian of the rhs with respect to the state, `df/dx`.
    ///
    /// Defaults to forward finite differences; override when an analytic form exists.
    fn jacobian(&mut self, t: f64, x: &Self::State) -> SimResult<DMatrix<f64>> {
        let x0 = self.to_vector(x);
        let jac = finite_difference_jacobian(
            &x0,
            |v| {
                let state = self.from_vector(v).map_err(residual_error)?;
                let xdot = self.rhs(t, &state).map_err(residual_error)?;
                Ok(self.to_vector(&xdot))
            },
            1e-7,
        )?;
        Ok(jac)
    }
}

pub(crate) fn residual_error(e: SimError) -> SolverError {
    SolverError::Residual {
        message: e.to_string(),
    }
}
