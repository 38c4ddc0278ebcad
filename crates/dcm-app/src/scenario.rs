//! Batch scenario runner.
//!
//! Drives a session for a fixed duration. The terminal voltage comes from the
//! open-loop setting or from a PID speed loop sampled once per sample period;
//! load torque follows the scenario's step schedule.

use dcm_controls::{PidController, PidState};
use dcm_core::units::{rad_s_to_rpm, rpm_to_rad_s};
use dcm_project::schema::{DriveDef, ProjectConfig};
use dcm_sim::{Logbook, MotorInputs};

use crate::error::{AppError, AppResult};
use crate::project_service::{build_controller, build_session};

enum VoltageSource {
    OpenLoop(f64),
    SpeedLoop {
        pid: PidController,
        state: PidState,
        reference: f64,
    },
}

impl VoltageSource {
    fn voltage(&mut self, measured_speed: f64, dt: f64) -> f64 {
        match self {
            VoltageSource::OpenLoop(volts) => *volts,
            VoltageSource::SpeedLoop {
                pid,
                state,
                reference,
            } => {
                let (next, output) = pid.update(state, measured_speed, *reference, dt);
                *state = next;
                output
            }
        }
    }
}

/// Run the project's scenario and return the per-sample logbook.
pub fn run_scenario(project: &ProjectConfig) -> AppResult<Logbook> {
    let scenario = project
        .scenario
        .as_ref()
        .ok_or_else(|| AppError::InvalidInput("project has no scenario section".to_string()))?;

    let mut session = build_session(project)?;
    let period = session.sample_period()?;
    let samples = (scenario.duration_s / period).round().max(1.0) as u64;

    let mut source = match scenario.drive {
        DriveDef::Voltage { volts } => VoltageSource::OpenLoop(volts),
        DriveDef::SpeedReference { rpm } => {
            let def = project.controller.as_ref().ok_or_else(|| {
                AppError::InvalidInput("speed reference requires a controller".to_string())
            })?;
            VoltageSource::SpeedLoop {
                pid: build_controller(def)?,
                state: PidState::default(),
                reference: rpm_to_rad_s(rpm),
            }
        }
    };

    tracing::info!(
        name = %project.name,
        samples,
        sample_period = period,
        "scenario started"
    );

    let mut load = (0.0, 0.0);
    for k in 0..samples {
        let t = k as f64 * period;
        let (tlc, tlw) = scenario.load_at(t);
        if (tlc, tlw) != load {
            tracing::debug!(t, tlc, tlw, "load step");
            load = (tlc, tlw);
        }
        let vt = source.voltage(session.state().w, period);
        session.advance(MotorInputs::new(vt, tlc, tlw))?;
    }

    let end = session.state();
    tracing::info!(
        time = session.time(),
        speed_rpm = rad_s_to_rpm(end.w),
        current = end.ia,
        "scenario finished"
    );

    Ok(session.into_logbook())
}
