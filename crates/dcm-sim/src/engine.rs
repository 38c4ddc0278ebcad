//! Motor integration engine.
//!
//! Owns the motor parameters, the evolving state, and the step configuration.
//! Callers construct it once, configure a step size and method, then feed one
//! input sample per [`MotorEngine::step`] call and read back the new state.

use crate::error::{SimError, SimResult};
use crate::integrator::integrate;
use crate::method::IntegrationMethod;
use crate::motor::{MotorDynamics, MotorInputs, MotorParams, MotorState, ShuntMotor};
use crate::model::TransientModel;
use serde::{Deserialize, Serialize};

/// Step size and method used by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepConfig {
    /// Integration step (seconds)
    pub step: f64,
    /// Integration method
    pub method: IntegrationMethod,
}

impl StepConfig {
    pub fn new(step: f64, method: IntegrationMethod) -> SimResult<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(SimError::InvalidArg {
                what: format!("step size must be finite and positive, got {step}"),
            });
        }
        Ok(Self { step, method })
    }
}

/// Single-motor, fixed-step simulator.
#[derive(Clone, Debug)]
pub struct MotorEngine {
    dynamics: MotorDynamics,
    state: MotorState,
    config: Option<StepConfig>,
    time: f64,
    steps: u64,
}

impl MotorEngine {
    /// Create an engine at rest (zero current, zero speed).
    pub fn new(params: MotorParams) -> SimResult<Self> {
        Self::with_initial_state(params, MotorState::default())
    }

    /// Create an engine starting from `initial`.
    pub fn with_initial_state(params: MotorParams, initial: MotorState) -> SimResult<Self> {
        let motor = ShuntMotor::new(params)?;
        if !initial.is_finite() {
            return Err(SimError::InvalidArg {
                what: "initial state must be finite".to_string(),
            });
        }
        let dynamics = MotorDynamics::new(motor, initial);
        let state = dynamics.initial_state();
        Ok(Self {
            dynamics,
            state,
            config: None,
            time: 0.0,
            steps: 0,
        })
    }

    /// Set step size and method; takes effect on the next step.
    ///
    /// On error the previous configuration is kept.
    pub fn configure(&mut self, step: f64, method: IntegrationMethod) -> SimResult<()> {
        let config = StepConfig::new(step, method)?;
        if self.config != Some(config) {
            tracing::debug!(step, %method, "engine configured");
        }
        self.config = Some(config);
        Ok(())
    }

    /// Advance the state by exactly one configured step.
    ///
    /// Inputs are held constant across the whole step.
    pub fn step(&mut self, inputs: MotorInputs) -> SimResult<MotorState> {
        let config = self.config.ok_or(SimError::NotConfigured)?;
        if !inputs.is_finite() {
            return Err(SimError::InvalidArg {
                what: format!("inputs must be finite, got {inputs:?}"),
            });
        }

        self.dynamics.hold(inputs);
        let next = integrate(
            config.method,
            &mut self.dynamics,
            self.time,
            &self.state,
            config.step,
        )?;
        if !next.is_finite() {
            return Err(SimError::NonPhysical {
                what: "state diverged to a non-finite value",
            });
        }

        self.state = next;
        self.time += config.step;
        self.steps += 1;
        Ok(next)
    }

    /// Copy of the current state.
    pub fn state(&self) -> MotorState {
        self.state
    }

    /// Replace the state and rewind the clock. Configuration is kept.
    pub fn reset(&mut self, state: MotorState) -> SimResult<()> {
        if !state.is_finite() {
            return Err(SimError::InvalidArg {
                what: "reset state must be finite".to_string(),
            });
        }
        self.state = state;
        self.time = 0.0;
        self.steps = 0;
        Ok(())
    }

    /// Simulated time since construction or the last reset (seconds).
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Steps taken since construction or the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn config(&self) -> Option<StepConfig> {
        self.config
    }

    pub fn motor(&self) -> &ShuntMotor {
        &self.dynamics.motor
    }

    pub fn params(&self) -> &MotorParams {
        self.dynamics.motor.params()
    }
}
