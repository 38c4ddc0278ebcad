//! Project schema definitions.

use dcm_sim::{MotorParams, MotorState};
use serde::{Deserialize, Serialize};

/// Schema version written by this crate.
pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    pub version: u32,
    pub name: String,
    pub motor: MotorDef,
    #[serde(default)]
    pub initial_state: InitialStateDef,
    pub simulation: SimulationDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<ControllerDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<ScenarioDef>,
}

/// Motor parameters in SI units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MotorDef {
    /// Armature resistance (Ω)
    pub r: f64,
    /// Armature inductance (H)
    pub l: f64,
    /// Rotor inertia (kg·m²)
    pub j: f64,
    /// Viscous friction (kg·m²/s)
    pub b: f64,
    /// Torque constant (N·m/A)
    pub k1: f64,
    /// Back-EMF constant (V·s/rad)
    pub k2: f64,
}

impl MotorDef {
    pub fn to_params(&self) -> MotorParams {
        MotorParams {
            r: self.r,
            l: self.l,
            j: self.j,
            b: self.b,
            k1: self.k1,
            k2: self.k2,
        }
    }
}

impl From<MotorParams> for MotorDef {
    fn from(p: MotorParams) -> Self {
        Self {
            r: p.r,
            l: p.l,
            j: p.j,
            b: p.b,
            k1: p.k1,
            k2: p.k2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct InitialStateDef {
    /// Armature current (A)
    #[serde(default)]
    pub ia: f64,
    /// Rotor speed (rad/s)
    #[serde(default)]
    pub w: f64,
}

impl InitialStateDef {
    pub fn to_state(&self) -> MotorState {
        MotorState::new(self.ia, self.w)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationDef {
    /// Integration step `h` (s)
    pub h: f64,
    /// Integration steps per sample period
    #[serde(default = "default_kh")]
    pub kh: u32,
    /// Method name or ordinal code, e.g. `euler`, `trapezoidal`, `rk4`, `2`
    #[serde(default = "default_method")]
    pub method: String,
}

fn default_kh() -> u32 {
    1
}

fn default_method() -> String {
    "euler".to_string()
}

/// Discrete PID gains for speed control; output is the terminal voltage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControllerDef {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v_max: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioDef {
    pub duration_s: f64,
    pub drive: DriveDef,
    #[serde(default)]
    pub load_steps: Vec<LoadStepDef>,
}

/// How the terminal voltage is produced each sample.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DriveDef {
    /// Constant open-loop voltage.
    Voltage { volts: f64 },
    /// Closed-loop speed reference; requires a `controller` section.
    SpeedReference { rpm: f64 },
}

/// Load torque applied from `at_s` onwards, until the next step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LoadStepDef {
    pub at_s: f64,
    #[serde(default)]
    pub tlc: f64,
    #[serde(default)]
    pub tlw: f64,
}

impl ScenarioDef {
    /// Load torques `(tlc, tlw)` in effect at time `t`.
    ///
    /// Steps are taken in time order regardless of how they are listed.
    pub fn load_at(&self, t: f64) -> (f64, f64) {
        self.load_steps
            .iter()
            .filter(|s| s.at_s <= t)
            .max_by(|a, b| a.at_s.total_cmp(&b.at_s))
            .map_or((0.0, 0.0), |s| (s.tlc, s.tlw))
    }
}
