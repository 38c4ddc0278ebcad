//! Sampled simulation session.
//!
//! A session drives a configured [`MotorEngine`] at a sample period that is an
//! integer multiple of the integration step, logging every sample.

use crate::engine::MotorEngine;
use crate::error::{SimError, SimResult};
use crate::logbook::{LogRecord, Logbook};
use crate::motor::{MotorInputs, MotorState};

#[derive(Clone, Debug)]
pub struct SimSession {
    engine: MotorEngine,
    steps_per_sample: u32,
    samples: u64,
    logbook: Logbook,
}

impl SimSession {
    /// Wrap a configured engine.
    ///
    /// # Errors
    /// `NotConfigured` if the engine has no step configuration, `InvalidArg` if
    /// `steps_per_sample` is zero.
    pub fn new(engine: MotorEngine, steps_per_sample: u32) -> SimResult<Self> {
        if engine.config().is_none() {
            return Err(SimError::NotConfigured);
        }
        if steps_per_sample == 0 {
            return Err(SimError::InvalidArg {
                what: "steps per sample must be at least 1".to_string(),
            });
        }
        Ok(Self {
            engine,
            steps_per_sample,
            samples: 0,
            logbook: Logbook::new(),
        })
    }

    /// Initial observation.
    pub fn start(&self) -> MotorState {
        self.engine.state()
    }

    /// Log the current sample, then integrate one sample period with `inputs` held.
    ///
    /// Sample `k` is logged at `k * sample_period()`. The sample is committed as
    /// a whole: if any of its `kh` steps fails, the engine and logbook are left
    /// as they were before the call.
    pub fn advance(&mut self, inputs: MotorInputs) -> SimResult<MotorState> {
        let t = self.samples as f64 * self.sample_period()?;
        let record = LogRecord::new(t, self.engine.state(), inputs);

        let mut engine = self.engine.clone();
        for _ in 0..self.steps_per_sample {
            engine.step(inputs)?;
        }

        self.engine = engine;
        self.samples += 1;
        self.logbook.push(record);
        Ok(self.engine.state())
    }

    /// Samples advanced so far.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Sample period `h * kh` (seconds).
    pub fn sample_period(&self) -> SimResult<f64> {
        let config = self.engine.config().ok_or(SimError::NotConfigured)?;
        Ok(config.step * f64::from(self.steps_per_sample))
    }

    pub fn steps_per_sample(&self) -> u32 {
        self.steps_per_sample
    }

    pub fn state(&self) -> MotorState {
        self.engine.state()
    }

    pub fn time(&self) -> f64 {
        self.engine.time()
    }

    pub fn engine(&self) -> &MotorEngine {
        &self.engine
    }

    /// Mutable engine access, e.g. to reconfigure between samples.
    pub fn engine_mut(&mut self) -> &mut MotorEngine {
        &mut self.engine
    }

    pub fn logbook(&self) -> &Logbook {
        &self.logbook
    }

    pub fn into_logbook(self) -> Logbook {
        self.logbook
    }
}
