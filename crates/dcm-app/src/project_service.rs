//! Project loading and construction of simulation objects from it.

use std::path::Path;

use dcm_controls::PidController;
use dcm_project::schema::{ControllerDef, ProjectConfig};
use dcm_project::{default_config, parse_method, validate_project};
use dcm_sim::{MotorEngine, SimSession};

use crate::error::AppResult;

/// Command-line style overrides applied on top of a loaded project.
#[derive(Debug, Clone, Default)]
pub struct SessionOverrides {
    pub method: Option<String>,
    pub step: Option<f64>,
    pub steps_per_sample: Option<u32>,
}

/// Load a project file, or the compiled-in configuration when `path` is `None`.
pub fn load_project(path: Option<&Path>) -> AppResult<ProjectConfig> {
    match path {
        Some(path) => {
            let project = dcm_project::load(path)?;
            tracing::info!(path = %path.display(), name = %project.name, "project loaded");
            Ok(project)
        }
        None => Ok(default_config()),
    }
}

/// Apply overrides and re-validate the result.
pub fn apply_overrides(
    mut project: ProjectConfig,
    overrides: &SessionOverrides,
) -> AppResult<ProjectConfig> {
    if let Some(method) = &overrides.method {
        project.simulation.method = method.clone();
    }
    if let Some(step) = overrides.step {
        project.simulation.h = step;
    }
    if let Some(kh) = overrides.steps_per_sample {
        project.simulation.kh = kh;
    }
    validate_project(&project)?;
    Ok(project)
}

/// Construct and configure the engine described by `project`.
pub fn build_engine(project: &ProjectConfig) -> AppResult<MotorEngine> {
    let method = parse_method(&project.simulation.method)?;
    let mut engine = MotorEngine::with_initial_state(
        project.motor.to_params(),
        project.initial_state.to_state(),
    )?;
    engine.configure(project.simulation.h, method)?;
    Ok(engine)
}

/// Construct a sampled session (engine plus `kh`) for `project`.
pub fn build_session(project: &ProjectConfig) -> AppResult<SimSession> {
    let engine = build_engine(project)?;
    Ok(SimSession::new(engine, project.simulation.kh)?)
}

pub fn build_controller(def: &ControllerDef) -> AppResult<PidController> {
    let pid = PidController::new(def.kp, def.ki, def.kd)?;
    match (def.v_min, def.v_max) {
        (Some(lo), Some(hi)) => Ok(pid.with_output_limits(lo, hi)?),
        _ => Ok(pid),
    }
}
