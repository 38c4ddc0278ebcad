//! Project validation logic.

use crate::schema::{ControllerDef, DriveDef, LATEST_VERSION, ProjectConfig, ScenarioDef};
use dcm_core::ensure_finite;
use dcm_sim::{IntegrationMethod, MotorEngine, SimError};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid motor parameter: {what}")]
    InvalidParameter { what: String },

    #[error("Unknown integration method: {value}")]
    InvalidMethod { value: String },

    #[error("Missing section: {section} ({reason})")]
    MissingSection { section: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_project(project: &ProjectConfig) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let sim = &project.simulation;
    if !sim.h.is_finite() || sim.h <= 0.0 {
        return Err(invalid("simulation.h", sim.h, "must be finite and positive"));
    }
    if sim.kh < 1 {
        return Err(invalid("simulation.kh", sim.kh, "must be at least 1"));
    }
    parse_method(&sim.method)?;

    // Engine construction runs the same parameter and initial-state checks a
    // run would hit.
    MotorEngine::with_initial_state(project.motor.to_params(), project.initial_state.to_state())
        .map_err(|e| match e {
            SimError::InvalidParameter { what } => ValidationError::InvalidParameter { what },
            other => invalid("initial_state", "", &other.to_string()),
        })?;

    if let Some(controller) = &project.controller {
        validate_controller(controller)?;
    }
    if let Some(scenario) = &project.scenario {
        validate_scenario(scenario, project.controller.is_some())?;
    }

    Ok(())
}

/// Resolve a method name or ordinal code.
pub fn parse_method(value: &str) -> Result<IntegrationMethod, ValidationError> {
    value
        .parse::<IntegrationMethod>()
        .map_err(|_| ValidationError::InvalidMethod {
            value: value.to_string(),
        })
}

fn validate_controller(controller: &ControllerDef) -> Result<(), ValidationError> {
    for (field, value) in [
        ("controller.kp", controller.kp),
        ("controller.ki", controller.ki),
        ("controller.kd", controller.kd),
    ] {
        ensure_finite(value, "gain").map_err(|e| invalid(field, value, &e.to_string()))?;
    }
    if controller.ki < 0.0 {
        return Err(invalid("controller.ki", controller.ki, "must be non-negative"));
    }
    if controller.kd < 0.0 {
        return Err(invalid("controller.kd", controller.kd, "must be non-negative"));
    }
    match (controller.v_min, controller.v_max) {
        (Some(lo), Some(hi)) if lo.is_nan() || hi.is_nan() || lo >= hi => Err(invalid(
            "controller.v_min",
            lo,
            "must be less than controller.v_max",
        )),
        (Some(_), None) | (None, Some(_)) => Err(invalid(
            "controller.v_min/v_max",
            "",
            "voltage limits must be given as a pair",
        )),
        _ => Ok(()),
    }
}

fn validate_scenario(scenario: &ScenarioDef, has_controller: bool) -> Result<(), ValidationError> {
    if !scenario.duration_s.is_finite() || scenario.duration_s <= 0.0 {
        return Err(invalid(
            "scenario.duration_s",
            scenario.duration_s,
            "must be finite and positive",
        ));
    }

    match scenario.drive {
        DriveDef::Voltage { volts } if !volts.is_finite() => {
            return Err(invalid("scenario.drive.volts", volts, "must be finite"));
        }
        DriveDef::SpeedReference { rpm } if !rpm.is_finite() => {
            return Err(invalid("scenario.drive.rpm", rpm, "must be finite"));
        }
        DriveDef::SpeedReference { .. } if !has_controller => {
            return Err(ValidationError::MissingSection {
                section: "controller".to_string(),
                reason: "a speed reference needs a controller".to_string(),
            });
        }
        _ => {}
    }

    for step in &scenario.load_steps {
        if !step.at_s.is_finite() || step.at_s < 0.0 {
            return Err(invalid(
                "scenario.load_steps.at_s",
                step.at_s,
                "must be finite and non-negative",
            ));
        }
        if !step.tlc.is_finite() || !step.tlw.is_finite() {
            return Err(invalid(
                "scenario.load_steps",
                format!("tlc={}, tlw={}", step.tlc, step.tlw),
                "load torques must be finite",
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_config;
    use crate::schema::LoadStepDef;

    #[test]
    fn default_config_is_valid() {
        validate_project(&default_config()).unwrap();
    }

    #[test]
    fn rejects_non_positive_step() {
        for h in [0.0, -1e-3, f64::NAN, f64::INFINITY] {
            let mut project = default_config();
            project.simulation.h = h;
            assert!(matches!(
                validate_project(&project),
                Err(ValidationError::InvalidValue { ref field, .. }) if field == "simulation.h"
            ));
        }
    }

    #[test]
    fn rejects_zero_kh() {
        let mut project = default_config();
        project.simulation.kh = 0;
        assert!(validate_project(&project).is_err());
    }

    #[test]
    fn rejects_unknown_method() {
        let mut project = default_config();
        project.simulation.method = "adams-bashforth".to_string();
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::InvalidMethod { .. })
        ));
    }

    #[test]
    fn accepts_method_codes_and_aliases() {
        for method in ["0", "1", "2", "EULER_PROG", "trapezoidal", "RUNGEKUTTA4"] {
            let mut project = default_config();
            project.simulation.method = method.to_string();
            validate_project(&project).unwrap();
        }
    }

    #[test]
    fn rejects_bad_motor_parameters() {
        let mut project = default_config();
        project.motor.l = 0.0;
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn speed_reference_needs_controller() {
        let mut project = default_config();
        project.controller = None;
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::MissingSection { .. })
        ));
    }

    #[test]
    fn rejects_negative_load_step_time() {
        let mut project = default_config();
        if let Some(scenario) = project.scenario.as_mut() {
            scenario.load_steps.push(LoadStepDef {
                at_s: -0.5,
                tlc: 1.0,
                tlw: 0.0,
            });
        }
        assert!(validate_project(&project).is_err());
    }

    #[test]
    fn rejects_future_version() {
        let mut project = default_config();
        project.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }
}
