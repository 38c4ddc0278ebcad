//! Batch simulation runner and result recording.

use crate::error::{SimError, SimResult};
use crate::integrator::integrate;
use crate::method::IntegrationMethod;
use crate::model::TransientModel;

/// Options for batch simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
    /// Integration method
    pub method: IntegrationMethod,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1e-3,
            t_end: 1.0,
            max_steps: 100_000,
            record_every: 10,
            method: IntegrationMethod::default(),
        }
    }
}

impl SimOptions {
    /// Number of whole steps needed to reach `t_end`.
    pub fn step_count(&self) -> usize {
        let n = (self.t_end / self.dt).round();
        if n <= 0.0 { 0 } else { n as usize }
    }

    fn validate(&self) -> SimResult<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "dt must be positive".to_string(),
            });
        }
        if !self.t_end.is_finite() || self.t_end < 0.0 {
            return Err(SimError::InvalidArg {
                what: "t_end must be non-negative".to_string(),
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive".to_string(),
            });
        }
        if self.record_every == 0 {
            return Err(SimError::InvalidArg {
                what: "record_every must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Record of simulation results.
#[derive(Clone, Debug)]
pub struct SimRecord<S> {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<S>,
}

impl<S> SimRecord<S> {
    pub fn last(&self) -> Option<(f64, &S)> {
        match (self.t.last(), self.x.last()) {
            (Some(t), Some(x)) => Some((*t, x)),
            _ => None,
        }
    }
}

/// Run a fixed-step simulation from the model's initial state.
///
/// Time is computed as `step * dt` so that runs with the same step count end
/// at exactly the same time regardless of rounding.
pub fn run_sim<M: TransientModel>(
    model: &mut M,
    opts: &SimOptions,
) -> SimResult<SimRecord<M::State>> {
    opts.validate()?;

    let n_steps = opts.step_count().min(opts.max_steps);
    let mut x = model.initial_state();

    let mut t_record = vec![0.0];
    let mut x_record = vec![x.clone()];

    for step in 0..n_steps {
        let t = step as f64 * opts.dt;
        x = integrate(opts.method, model, t, &x, opts.dt)?;

        // Record if decimation matches
        if (step + 1) % opts.record_every == 0 {
            t_record.push((step + 1) as f64 * opts.dt);
            x_record.push(x.clone());
        }
    }

    // Always record final state
    if n_steps % opts.record_every != 0 {
        t_record.push(n_steps as f64 * opts.dt);
        x_record.push(x);
    }

    tracing::debug!(steps = n_steps, method = %opts.method, "batch run finished");

    Ok(SimRecord {
        t: t_record,
        x: x_record,
    })
}
