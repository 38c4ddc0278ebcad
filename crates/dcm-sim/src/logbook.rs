//! Per-sample record of observations and applied inputs.

use crate::motor::{MotorInputs, MotorState};
use serde::{Deserialize, Serialize};

/// One logged sample: the observation before stepping and the inputs applied.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Sample time (seconds)
    pub t: f64,
    /// Armature current (A)
    pub ia: f64,
    /// Angular velocity (rad/s)
    pub w: f64,
    /// Applied terminal voltage (V)
    pub vt: f64,
    /// Constant load torque (N·m)
    pub tlc: f64,
    /// Speed-proportional load coefficient (N·m·s)
    pub tlw: f64,
}

impl LogRecord {
    pub fn new(t: f64, state: MotorState, inputs: MotorInputs) -> Self {
        Self {
            t,
            ia: state.ia,
            w: state.w,
            vt: inputs.vt,
            tlc: inputs.tlc,
            tlw: inputs.tlw,
        }
    }

    pub fn state(&self) -> MotorState {
        MotorState::new(self.ia, self.w)
    }

    pub fn inputs(&self) -> MotorInputs {
        MotorInputs::new(self.vt, self.tlc, self.tlw)
    }
}

/// Ordered simulation log.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Logbook {
    records: Vec<LogRecord>,
}

impl Logbook {
    pub const CSV_HEADER: &'static str = "t,ia,w,vt,tlc,tlw";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: LogRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&LogRecord> {
        self.records.last()
    }

    /// Time column.
    pub fn times(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.t).collect()
    }

    /// Speed column (rad/s).
    pub fn speeds(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.w).collect()
    }

    /// Current column (A).
    pub fn currents(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.ia).collect()
    }

    /// Render as CSV with a header row.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(Self::CSV_HEADER);
        csv.push('\n');
        for r in &self.records {
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                r.t, r.ia, r.w, r.vt, r.tlc, r.tlw
            ));
        }
        csv
    }
}
