//! Forward-difference Jacobian for residuals without an analytic derivative.

use crate::error::{SolverError, SolverResult};
use nalgebra::{DMatrix, DVector};

/// Approximate `df/dx` at `x` by forward differences.
///
/// Column `j` perturbs `x[j]` by `epsilon * max(|x[j]|, 1)`, so currents of a
/// few amps and speeds of hundreds of rad/s get comparable relative steps. The
/// step actually applied is recovered as `(x[j] + h) - x[j]` to cancel the
/// rounding of the perturbed coordinate. Costs `n + 1` evaluations of `f`.
pub fn finite_difference_jacobian<F>(
    x: &DVector<f64>,
    mut f: F,
    epsilon: f64,
) -> SolverResult<DMatrix<f64>>
where
    F: FnMut(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let f_x = f(x)?;
    let (m, n) = (f_x.len(), x.len());
    let mut jac = DMatrix::zeros(m, n);
    let mut probe = x.clone();

    for j in 0..n {
        let xj = x[j];
        probe[j] = xj + epsilon * xj.abs().max(1.0);
        let dx = probe[j] - xj;
        if dx == 0.0 || !dx.is_finite() {
            return Err(SolverError::Numeric {
                what: "finite-difference step underflowed".to_string(),
            });
        }

        let f_probe = f(&probe)?;
        probe[j] = xj;

        if f_probe.len() != m {
            return Err(SolverError::DimensionMismatch {
                expected: m,
                actual: f_probe.len(),
            });
        }
        jac.set_column(j, &((f_probe - &f_x) / dx));
    }

    Ok(jac)
}
