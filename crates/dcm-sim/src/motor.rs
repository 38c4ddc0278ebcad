//! Shunt DC motor electromechanical model.

use crate::error::{SimError, SimResult};
use crate::model::TransientModel;
use dcm_core::units::{AngularVelocity, Current, Inductance, Inertia, Resistance};
use dcm_core::{CoreError, ensure_finite, ensure_non_negative, ensure_positive};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Physical parameters of a shunt DC motor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotorParams {
    /// Armature resistance (Ω)
    pub r: f64,
    /// Armature inductance (H)
    pub l: f64,
    /// Rotor moment of inertia (kg·m²)
    pub j: f64,
    /// Viscous friction coefficient (kg·m²/s)
    pub b: f64,
    /// Torque constant (N·m/A)
    pub k1: f64,
    /// Back-EMF constant (V/(rad/s))
    pub k2: f64,
}

impl MotorParams {
    /// Build parameters from typed SI quantities.
    pub fn from_quantities(
        resistance: Resistance,
        inductance: Inductance,
        inertia: Inertia,
        friction: f64,
        k1: f64,
        k2: f64,
    ) -> Self {
        use uom::si::electrical_resistance::ohm;
        use uom::si::inductance::henry;
        use uom::si::moment_of_inertia::kilogram_square_meter;

        Self {
            r: resistance.get::<ohm>(),
            l: inductance.get::<henry>(),
            j: inertia.get::<kilogram_square_meter>(),
            b: friction,
            k1,
            k2,
        }
    }

    /// Check the parameters describe a well-defined model.
    ///
    /// L and J are divisors and must be strictly positive; R and B must be
    /// non-negative; every value must be finite.
    pub fn validate(&self) -> SimResult<()> {
        ensure_non_negative(self.r, "armature resistance R").map_err(invalid_parameter)?;
        ensure_positive(self.l, "armature inductance L").map_err(invalid_parameter)?;
        ensure_positive(self.j, "rotor inertia J").map_err(invalid_parameter)?;
        ensure_non_negative(self.b, "friction coefficient B").map_err(invalid_parameter)?;
        ensure_finite(self.k1, "torque constant K1").map_err(invalid_parameter)?;
        ensure_finite(self.k2, "back-EMF constant K2").map_err(invalid_parameter)?;
        Ok(())
    }
}

fn invalid_parameter(e: CoreError) -> SimError {
    SimError::InvalidParameter {
        what: e.to_string(),
    }
}

/// Instantaneous motor state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MotorState {
    /// Armature current (A)
    pub ia: f64,
    /// Angular velocity (rad/s)
    pub w: f64,
}

impl MotorState {
    pub fn new(ia: f64, w: f64) -> Self {
        Self { ia, w }
    }

    pub fn current(&self) -> Current {
        dcm_core::units::amp(self.ia)
    }

    pub fn speed(&self) -> AngularVelocity {
        dcm_core::units::rad_per_s(self.w)
    }

    pub fn is_finite(&self) -> bool {
        self.ia.is_finite() && self.w.is_finite()
    }
}

/// External inputs sampled for one integration step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MotorInputs {
    /// Applied terminal voltage (V)
    pub vt: f64,
    /// Constant load torque (N·m)
    pub tlc: f64,
    /// Velocity-proportional load torque coefficient (N·m·s)
    pub tlw: f64,
}

impl MotorInputs {
    pub fn new(vt: f64, tlc: f64, tlw: f64) -> Self {
        Self { vt, tlc, tlw }
    }

    pub fn is_finite(&self) -> bool {
        self.vt.is_finite() && self.tlc.is_finite() && self.tlw.is_finite()
    }
}

/// Shunt DC motor.
///
/// Armature circuit (Kirchhoff) and rotor (Newton) dynamics:
///
/// ```text
/// L * dia/dt = Vt - K2*w - R*ia
/// J * dw/dt  = K1*ia - Tlc - Tlw*w - B*w
/// ```
///
/// The back-EMF is `K2*w` and the electromagnetic torque is `K1*ia`.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuntMotor {
    params: MotorParams,
}

impl ShuntMotor {
    /// Create a motor, rejecting ill-defined parameters.
    pub fn new(params: MotorParams) -> SimResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &MotorParams {
        &self.params
    }

    /// Back-EMF at angular velocity `w` (V).
    pub fn back_emf(&self, w: f64) -> f64 {
        self.params.k2 * w
    }

    /// Electromagnetic torque at armature current `ia` (N·m).
    pub fn electromagnetic_torque(&self, ia: f64) -> f64 {
        self.params.k1 * ia
    }

    /// Total opposing torque: load plus viscous friction (N·m).
    pub fn resisting_torque(&self, w: f64, inputs: &MotorInputs) -> f64 {
        inputs.tlc + inputs.tlw * w + self.params.b * w
    }

    /// State derivative `(dia/dt, dw/dt)`.
    pub fn derivative(&self, state: &MotorState, inputs: &MotorInputs) -> MotorState {
        let p = &self.params;
        let dia = (inputs.vt - self.back_emf(state.w) - p.r * state.ia) / p.l;
        let dw = (self.electromagnetic_torque(state.ia) - self.resisting_torque(state.w, inputs))
            / p.j;

        MotorState { ia: dia, w: dw }
    }

    /// Jacobian of [`derivative`](Self::derivative) with respect to `(ia, w)`.
    ///
    /// The model is linear in the state, so this depends only on `Tlw`.
    pub fn jacobian(&self, inputs: &MotorInputs) -> [[f64; 2]; 2] {
        let p = &self.params;
        [
            [-p.r / p.l, -p.k2 / p.l],
            [p.k1 / p.j, -(inputs.tlw + p.b) / p.j],
        ]
    }

    /// Equilibrium reached under constant inputs.
    pub fn steady_state(&self, inputs: &MotorInputs) -> SimResult<MotorState> {
        let p = &self.params;
        let damping = p.b + inputs.tlw;
        let denom = p.k1 * p.k2 + p.r * damping;
        if denom.abs() < f64::EPSILON {
            return Err(SimError::NonPhysical {
                what: "no unique steady state (K1*K2 + R*(B + Tlw) is zero)",
            });
        }

        let w = (p.k1 * inputs.vt - p.r * inputs.tlc) / denom;
        let ia = if p.k1 != 0.0 {
            (inputs.tlc + damping * w) / p.k1
        } else if p.r > 0.0 {
            (inputs.vt - p.k2 * w) / p.r
        } else {
            return Err(SimError::NonPhysical {
                what: "steady current undefined with K1 = 0 and R = 0",
            });
        };

        Ok(MotorState { ia, w })
    }

    /// Energy stored in the inductance and the rotating mass (J).
    pub fn stored_energy(&self, state: &MotorState) -> f64 {
        0.5 * self.params.l * state.ia * state.ia + 0.5 * self.params.j * state.w * state.w
    }
}

/// Motor with inputs held constant over a step (zero-order hold).
#[derive(Clone, Debug)]
pub struct MotorDynamics {
    pub motor: ShuntMotor,
    pub inputs: MotorInputs,
    pub initial: MotorState,
}

impl MotorDynamics {
    pub fn new(motor: ShuntMotor, initial: MotorState) -> Self {
        Self {
            motor,
            inputs: MotorInputs::default(),
            initial,
        }
    }

    /// Hold a new input sample.
    pub fn hold(&mut self, inputs: MotorInputs) {
        self.inputs = inputs;
    }
}

impl TransientModel for MotorDynamics {
    type State = MotorState;

    fn initial_state(&self) -> Self::State {
        self.initial
    }

    fn rhs(&mut self, _t: f64, x: &Self::State) -> SimResult<Self::State> {
        Ok(self.motor.derivative(x, &self.inputs))
    }

    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State {
        MotorState {
            ia: a.ia + b.ia,
            w: a.w + b.w,
        }
    }

    fn scale(&self, a: &Self::State, scale: f64) -> Self::State {
        MotorState {
            ia: a.ia * scale,
            w: a.w * scale,
        }
    }

    fn to_vector(&self, x: &Self::State) -> DVector<f64> {
        DVector::from_vec(vec![x.ia, x.w])
    }

    fn from_vector(&self, v: &DVector<f64>) -> SimResult<Self::State> {
        if v.len() != 2 {
            return Err(SimError::InvalidArg {
                what: format!("motor state has 2 components, got {}", v.len()),
            });
        }
        Ok(MotorState { ia: v[0], w: v[1] })
    }

    fn jacobian(&mut self, _t: f64, _x: &Self::State) -> SimResult<DMatrix<f64>> {
        let j = self.motor.jacobian(&self.inputs);
        Ok(DMatrix::from_row_slice(
            2,
            2,
            &[j[0][0], j[0][1], j[1][0], j[1][1]],
        ))
    }
}
