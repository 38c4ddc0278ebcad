//! Fixed-step time integrators.

use crate::error::SimResult;
use crate::method::IntegrationMethod;
use crate::model::{TransientModel, residual_error};
use dcm_solver::{NewtonConfig, NonlinearSystem, SolverResult, newton_solve};
use nalgebra::{DMatrix, DVector};

/// Trait for time integrators.
pub trait Integrator {
    /// Advance state by one time step using the transient model.
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State>;
}

/// Forward Euler (explicit, 1st order).
/// Calls rhs() once per step instead of 4 times (RK4).
#[derive(Clone, Debug, Default)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let xdot = model.rhs(t, x)?;
        Ok(model.add(x, &model.scale(&xdot, dt)))
    }
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Debug, Default)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let k1 = model.rhs(t, x)?;

        let x2 = model.add(x, &model.scale(&k1, 0.5 * dt));
        let k2 = model.rhs(t + 0.5 * dt, &x2)?;

        let x3 = model.add(x, &model.scale(&k2, 0.5 * dt));
        let k3 = model.rhs(t + 0.5 * dt, &x3)?;

        let x4 = model.add(x, &model.scale(&k3, dt));
        let k4 = model.rhs(t + dt, &x4)?;

        // Combine: x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        let k_sum = model.add(
            &model.add(&k1, &model.scale(&k2, 2.0)),
            &model.add(&model.scale(&k3, 2.0), &k4),
        );

        Ok(model.add(x, &model.scale(&k_sum, dt / 6.0)))
    }
}

/// Implicit trapezoidal rule (2nd order, A-stable).
///
/// Solves `x1 = x0 + dt/2 * (f(t, x0) + f(t + dt, x1))` for `x1` with Newton
/// iteration, starting from a forward Euler predictor.
#[derive(Clone, Debug)]
pub struct Trapezoidal {
    pub newton: NewtonConfig,
}

impl Default for Trapezoidal {
    fn default() -> Self {
        Self {
            newton: NewtonConfig {
                max_iterations: 20,
                abs_tol: 1e-10,
                rel_tol: 1e-12,
                ..NewtonConfig::default()
            },
        }
    }
}

/// Residual `r(x1) = x1 - x0 - dt/2 * (f0 + f(t1, x1))`.
struct TrapezoidalResidual<'a, M: TransientModel> {
    model: &'a mut M,
    t_next: f64,
    dt: f64,
    x_prev: DVector<f64>,
    f_prev: DVector<f64>,
}

impl<M: TransientModel> NonlinearSystem for TrapezoidalResidual<'_, M> {
    fn residual(&mut self, x: &DVector<f64>) -> SolverResult<DVector<f64>> {
        let state = self.model.from_vector(x).map_err(residual_error)?;
        let f_next = self.model.rhs(self.t_next, &state).map_err(residual_error)?;
        let f_next = self.model.to_vector(&f_next);
        Ok(x - &self.x_prev - (&self.f_prev + f_next) * (0.5 * self.dt))
    }

    fn jacobian(&mut self, x: &DVector<f64>) -> SolverResult<DMatrix<f64>> {
        let state = self.model.from_vector(x).map_err(residual_error)?;
        let df = self
            .model
            .jacobian(self.t_next, &state)
            .map_err(residual_error)?;
        let n = x.len();
        Ok(DMatrix::identity(n, n) - df * (0.5 * self.dt))
    }
}

impl Integrator for Trapezoidal {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let f0 = model.rhs(t, x)?;
        let predictor = model.add(x, &model.scale(&f0, dt));

        let x_prev = model.to_vector(x);
        let f_prev = model.to_vector(&f0);
        let guess = model.to_vector(&predictor);

        let mut system = TrapezoidalResidual {
            model: &mut *model,
            t_next: t + dt,
            dt,
            x_prev,
            f_prev,
        };
        let result = newton_solve(guess, &mut system, &self.newton)?;

        model.from_vector(&result.x)
    }
}

/// Advance one step with the selected method.
pub fn integrate<M: TransientModel>(
    method: IntegrationMethod,
    model: &mut M,
    t: f64,
    x: &M::State,
    dt: f64,
) -> SimResult<M::State> {
    match method {
        IntegrationMethod::ForwardEuler => ForwardEuler.step(model, t, x, dt),
        IntegrationMethod::Trapezoidal => Trapezoidal::default().step(model, t, x, dt),
        IntegrationMethod::RungeKutta4 => RK4.step(model, t, x, dt),
    }
}
