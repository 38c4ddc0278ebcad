//! Damped Newton solver for small dense systems.

use crate::error::{SolverError, SolverResult};
use crate::jacobian::finite_difference_jacobian;
use nalgebra::{DMatrix, DVector};

/// Residual and Jacobian of a square nonlinear system `r(x) = 0`.
pub trait NonlinearSystem {
    /// Evaluate the residual at `x`.
    fn residual(&mut self, x: &DVector<f64>) -> SolverResult<DVector<f64>>;

    /// Jacobian `dr/dx` at `x`. Defaults to forward finite differences.
    fn jacobian(&mut self, x: &DVector<f64>) -> SolverResult<DMatrix<f64>> {
        finite_difference_jacobian(x, |v| self.residual(v), 1e-7)
    }
}

/// Newton solver configuration.
#[derive(Clone, Debug)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance for residual norm
    pub abs_tol: f64,
    /// Relative tolerance for residual norm
    pub rel_tol: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            abs_tol: 1e-6,
            rel_tol: 1e-6,
            line_search_beta: 0.5,
            max_line_search_iters: 20,
        }
    }
}

/// Newton iteration result.
#[derive(Clone, Debug)]
pub struct NewtonResult {
    /// Solution vector
    pub x: DVector<f64>,
    /// Final residual norm
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Converged flag
    pub converged: bool,
}

/// Newton solver with backtracking line search.
pub fn newton_solve<S>(
    x0: DVector<f64>,
    system: &mut S,
    config: &NewtonConfig,
) -> SolverResult<NewtonResult>
where
    S: NonlinearSystem + ?Sized,
{
    let mut x = x0;
    let mut r = system.residual(&x)?;
    if r.len() != x.len() {
        return Err(SolverError::DimensionMismatch {
            expected: x.len(),
            actual: r.len(),
        });
    }
    let mut r_norm = r.norm();
    let r0_norm = r_norm;

    for iter in 0..config.max_iterations {
        if !r_norm.is_finite() {
            return Err(SolverError::Numeric {
                what: format!("non-finite residual at iteration {}", iter),
            });
        }

        // Check convergence
        if r_norm < config.abs_tol || r_norm < config.rel_tol * r0_norm {
            tracing::trace!(iterations = iter, residual = r_norm, "newton converged");
            return Ok(NewtonResult {
                x,
                residual_norm: r_norm,
                iterations: iter,
                converged: true,
            });
        }

        let jac = system.jacobian(&x)?;

        // Solve J * dx = -r
        let dx = jac
            .lu()
            .solve(&(-r.clone()))
            .ok_or_else(|| SolverError::Numeric {
                what: "Jacobian solve failed".to_string(),
            })?;

        // Backtrack until the residual decreases
        let mut alpha = 1.0;
        let mut x_new = &x + alpha * &dx;
        let mut r_new = system.residual(&x_new)?;
        let mut r_new_norm = r_new.norm();

        for _ in 0..config.max_line_search_iters {
            if r_new_norm < r_norm {
                break;
            }
            alpha *= config.line_search_beta;
            x_new = &x + alpha * &dx;
            r_new = system.residual(&x_new)?;
            r_new_norm = r_new.norm();
        }

        // A full step that cannot reduce the residual is at the rounding floor.
        let floor = 10.0 * config.abs_tol.max(f64::EPSILON * x.norm());
        if r_new_norm >= r_norm && r_norm <= floor {
            return Ok(NewtonResult {
                x,
                residual_norm: r_norm,
                iterations: iter,
                converged: true,
            });
        }

        x = x_new;
        r = r_new;
        r_norm = r_new_norm;

        if alpha < 1e-10 {
            return Err(SolverError::ConvergenceFailed {
                what: format!("Line search stagnated at iteration {}", iter),
            });
        }
    }

    if r_norm < config.abs_tol || r_norm < config.rel_tol * r0_norm {
        return Ok(NewtonResult {
            x,
            residual_norm: r_norm,
            iterations: config.max_iterations,
            converged: true,
        });
    }

    tracing::debug!(residual = r_norm, "newton hit iteration limit");
    Err(SolverError::ConvergenceFailed {
        what: format!(
            "Maximum iterations {} reached, residual = {}",
            config.max_iterations, r_norm
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Quadratic;

    impl NonlinearSystem for Quadratic {
        fn residual(&mut self, x: &DVector<f64>) -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0] - 4.0))
        }

        fn jacobian(&mut self, x: &DVector<f64>) -> SolverResult<DMatrix<f64>> {
            Ok(DMatrix::from_element(1, 1, 2.0 * x[0]))
        }
    }

    /// Linear system solved through the default finite-difference Jacobian.
    struct Linear {
        evaluations: usize,
    }

    impl NonlinearSystem for Linear {
        fn residual(&mut self, x: &DVector<f64>) -> SolverResult<DVector<f64>> {
            self.evaluations += 1;
            Ok(DVector::from_vec(vec![
                3.0 * x[0] + x[1] - 9.0,
                x[0] + 2.0 * x[1] - 8.0,
            ]))
        }
    }

    #[test]
    fn simple_quadratic() {
        let x0 = DVector::from_element(1, 3.0);
        let config = NewtonConfig::default();
        let result = newton_solve(x0, &mut Quadratic, &config).unwrap();

        assert!(result.converged);
        assert!((result.x[0] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn linear_with_default_jacobian() {
        let mut system = Linear { evaluations: 0 };
        let config = NewtonConfig {
            abs_tol: 1e-10,
            rel_tol: 1e-14,
            ..NewtonConfig::default()
        };
        let result = newton_solve(DVector::zeros(2), &mut system, &config).unwrap();

        assert!(result.converged);
        assert!((result.x[0] - 2.0).abs() < 1e-8);
        assert!((result.x[1] - 3.0).abs() < 1e-8);
        assert!(result.iterations <= 3);
        assert!(system.evaluations > 0);
    }

    #[test]
    fn already_converged_returns_immediately() {
        let x0 = DVector::from_element(1, 2.0);
        let result = newton_solve(x0, &mut Quadratic, &NewtonConfig::default()).unwrap();
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn singular_jacobian_is_reported() {
        struct Flat;
        impl NonlinearSystem for Flat {
            fn residual(&mut self, _x: &DVector<f64>) -> SolverResult<DVector<f64>> {
                Ok(DVector::from_element(1, 1.0))
            }
            fn jacobian(&mut self, _x: &DVector<f64>) -> SolverResult<DMatrix<f64>> {
                Ok(DMatrix::zeros(1, 1))
            }
        }

        let err = newton_solve(DVector::zeros(1), &mut Flat, &NewtonConfig::default());
        assert!(matches!(err, Err(SolverError::Numeric { .. })));
    }
}
