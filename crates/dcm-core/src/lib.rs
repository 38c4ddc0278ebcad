//! dcm-core: shared foundation for the DC motor simulator.
//!
//! Contains:
//! - units (uom SI types + constructors for electromechanical quantities)
//! - numeric (Real + tolerances + float checks)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
