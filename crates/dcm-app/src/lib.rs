//! Shared application service layer for the motor simulator.
//!
//! Front-ends go through this crate to load projects, build sessions, serve
//! the console protocol and run batch scenarios.

pub mod console;
pub mod error;
pub mod export;
pub mod project_service;
pub mod scenario;

// Re-export key types for convenience
pub use console::{ConsoleSummary, run_console};
pub use error::{AppError, AppResult};
pub use export::{OutputFormat, render_logbook, write_logbook};
pub use project_service::{
    SessionOverrides, apply_overrides, build_controller, build_engine, build_session,
    load_project,
};
pub use scenario::run_scenario;
