//! Compiled-in reference configuration.
//!
//! A 10 HP, 240 V shunt motor stepped at 1 ms with forward Euler, starting at
//! rest. The bundled scenario holds 1750 rpm under PID control for 2 s while
//! the load torque steps from 0 to 40 N·m halfway through.

use crate::schema::{
    ControllerDef, DriveDef, InitialStateDef, LATEST_VERSION, LoadStepDef, MotorDef,
    ProjectConfig, ScenarioDef, SimulationDef,
};

pub fn default_motor() -> MotorDef {
    MotorDef {
        r: 1.086,
        l: 0.01216,
        j: 0.04251,
        b: 0.003406,
        k1: 1.07633,
        k2: 1.07633,
    }
}

/// Speed-loop gains for a 1 ms sample period.
pub fn default_controller() -> ControllerDef {
    ControllerDef {
        kp: 2.0,
        ki: 100.0,
        kd: 0.0005,
        v_min: None,
        v_max: None,
    }
}

pub fn default_config() -> ProjectConfig {
    ProjectConfig {
        version: LATEST_VERSION,
        name: "shunt-10hp".to_string(),
        motor: default_motor(),
        initial_state: InitialStateDef::default(),
        simulation: SimulationDef {
            h: 0.001,
            kh: 1,
            method: "euler".to_string(),
        },
        controller: Some(default_controller()),
        scenario: Some(ScenarioDef {
            duration_s: 2.0,
            drive: DriveDef::SpeedReference { rpm: 1750.0 },
            load_steps: vec![LoadStepDef {
                at_s: 1.0,
                tlc: 40.0,
                tlw: 0.0,
            }],
        }),
    }
}
