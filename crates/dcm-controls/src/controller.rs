//! PID controller.
//!
//! Parallel form with derivative on measurement:
//!
//! ```text
//! u = kp*e + ki*∫e dt - kd*d(pv)/dt,   e = sp - pv
//! ```
//!
//! Taking the derivative of the measurement instead of the error avoids an
//! output kick when the setpoint steps. Optional output limits use
//! conditional integration for anti-windup.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};

/// PID controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidController {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain (1/s).
    pub ki: f64,
    /// Derivative gain (s).
    pub kd: f64,
    /// Minimum output value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_min: Option<f64>,
    /// Maximum output value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_max: Option<f64>,
}

impl PidController {
    /// Create an unbounded PID controller.
    ///
    /// # Arguments
    ///
    /// * `kp` - Proportional gain
    /// * `ki` - Integral gain, must be non-negative
    /// * `kd` - Derivative gain, must be non-negative
    pub fn new(kp: f64, ki: f64, kd: f64) -> ControlResult<Self> {
        if !(kp.is_finite() && ki.is_finite() && kd.is_finite()) {
            return Err(ControlError::InvalidArg {
                what: "gains must be finite",
            });
        }
        if ki < 0.0 {
            return Err(ControlError::InvalidArg {
                what: "ki must be non-negative",
            });
        }
        if kd < 0.0 {
            return Err(ControlError::InvalidArg {
                what: "kd must be non-negative",
            });
        }
        Ok(Self {
            kp,
            ki,
            kd,
            out_min: None,
            out_max: None,
        })
    }

    /// Clamp the output to `[out_min, out_max]`.
    pub fn with_output_limits(mut self, out_min: f64, out_max: f64) -> ControlResult<Self> {
        if out_min.is_nan() || out_max.is_nan() || out_min >= out_max {
            return Err(ControlError::InvalidArg {
                what: "out_min must be less than out_max",
            });
        }
        self.out_min = Some(out_min);
        self.out_max = Some(out_max);
        Ok(self)
    }

    /// Check a deserialized configuration.
    pub fn validate(&self) -> ControlResult<()> {
        let checked = Self::new(self.kp, self.ki, self.kd)?;
        match (self.out_min, self.out_max) {
            (Some(lo), Some(hi)) => checked.with_output_limits(lo, hi).map(|_| ()),
            (None, None) => Ok(()),
            _ => Err(ControlError::InvalidArg {
                what: "output limits must be given as a pair",
            }),
        }
    }

    fn clamp(&self, u: f64) -> f64 {
        let u = self.out_max.map_or(u, |hi| u.min(hi));
        self.out_min.map_or(u, |lo| u.max(lo))
    }

    /// Compute controller output given process variable and setpoint.
    ///
    /// # Arguments
    ///
    /// * `state` - Controller state (integral and previous measurement)
    /// * `pv` - Process variable (measured value)
    /// * `sp` - Setpoint (desired value)
    /// * `dt` - Time since last update (seconds), must be positive
    ///
    /// # Returns
    ///
    /// Updated state and output value.
    pub fn update(&self, state: &PidState, pv: f64, sp: f64, dt: f64) -> (PidState, f64) {
        let error = sp - pv;

        let p_term = self.kp * error;
        let i_term = self.ki * state.integral;
        let d_term = match state.last_pv {
            Some(prev) if dt > 0.0 => -self.kd * (pv - prev) / dt,
            _ => 0.0,
        };

        let output_raw = p_term + i_term + d_term;
        let output = self.clamp(output_raw);

        // Anti-windup: stop integrating while saturated
        let integral = if output == output_raw {
            state.integral + error * dt
        } else {
            state.integral
        };

        let new_state = PidState {
            integral,
            last_pv: Some(pv),
        };

        (new_state, output)
    }
}

/// PID controller state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PidState {
    /// Integral accumulator.
    pub integral: f64,
    /// Measurement at the previous update.
    pub last_pv: Option<f64>,
}
