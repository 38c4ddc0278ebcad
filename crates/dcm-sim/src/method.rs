//! Integration method selector.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed-step integration scheme used by the engine.
///
/// The discriminants match the selector codes of the console deployment
/// (0 = forward Euler, 1 = trapezoidal, 2 = RK4).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationMethod {
    /// Forward Euler (1st-order, 1 rhs call per step).
    #[default]
    #[serde(alias = "euler")]
    ForwardEuler = 0,
    /// Implicit trapezoidal rule (2nd-order, Newton solve per step).
    Trapezoidal = 1,
    /// Classical 4th-order Runge-Kutta (4 rhs calls per step).
    #[serde(alias = "rk4")]
    RungeKutta4 = 2,
}

impl IntegrationMethod {
    pub const ALL: [IntegrationMethod; 3] = [
        IntegrationMethod::ForwardEuler,
        IntegrationMethod::Trapezoidal,
        IntegrationMethod::RungeKutta4,
    ];

    /// Resolve a numeric selector code.
    pub fn from_code(code: i64) -> SimResult<Self> {
        match code {
            0 => Ok(IntegrationMethod::ForwardEuler),
            1 => Ok(IntegrationMethod::Trapezoidal),
            2 => Ok(IntegrationMethod::RungeKutta4),
            other => Err(SimError::InvalidMethod {
                value: other.to_string(),
            }),
        }
    }

    pub fn code(self) -> i64 {
        self as i64
    }

    /// Short canonical name.
    pub fn name(self) -> &'static str {
        match self {
            IntegrationMethod::ForwardEuler => "euler",
            IntegrationMethod::Trapezoidal => "trapezoidal",
            IntegrationMethod::RungeKutta4 => "rk4",
        }
    }

    /// Theoretical global order of accuracy.
    pub fn order(self) -> u32 {
        match self {
            IntegrationMethod::ForwardEuler => 1,
            IntegrationMethod::Trapezoidal => 2,
            IntegrationMethod::RungeKutta4 => 4,
        }
    }
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IntegrationMethod {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.trim().parse::<i64>() {
            return IntegrationMethod::from_code(code);
        }

        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "euler" | "forwardeuler" | "eulerprog" => Ok(IntegrationMethod::ForwardEuler),
            "trapezoidal" | "trap" => Ok(IntegrationMethod::Trapezoidal),
            "rk4" | "rungekutta4" | "rungekutta" => Ok(IntegrationMethod::RungeKutta4),
            _ => Err(SimError::InvalidMethod {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reference_names() {
        assert_eq!(
            "EULER_PROG".parse::<IntegrationMethod>().unwrap(),
            IntegrationMethod::ForwardEuler
        );
        assert_eq!(
            "TRAPEZOIDAL".parse::<IntegrationMethod>().unwrap(),
            IntegrationMethod::Trapezoidal
        );
        assert_eq!(
            "RUNGEKUTTA4".parse::<IntegrationMethod>().unwrap(),
            IntegrationMethod::RungeKutta4
        );
    }

    #[test]
    fn parses_short_names_and_codes() {
        assert_eq!(
            "forward-euler".parse::<IntegrationMethod>().unwrap(),
            IntegrationMethod::ForwardEuler
        );
        assert_eq!(
            "Runge_Kutta_4".parse::<IntegrationMethod>().unwrap(),
            IntegrationMethod::RungeKutta4
        );
        assert_eq!(
            "2".parse::<IntegrationMethod>().unwrap(),
            IntegrationMethod::RungeKutta4
        );
    }

    #[test]
    fn rejects_unknown_method() {
        let err = "adams-bashforth".parse::<IntegrationMethod>().unwrap_err();
        assert!(matches!(err, SimError::InvalidMethod { .. }));
        assert!(IntegrationMethod::from_code(3).is_err());
        assert!(IntegrationMethod::from_code(-1).is_err());
        assert!("-1".parse::<IntegrationMethod>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for method in IntegrationMethod::ALL {
            let parsed: IntegrationMethod = method.to_string().parse().unwrap();
            assert_eq!(parsed, method);
            assert_eq!(IntegrationMethod::from_code(method.code()).unwrap(), method);
        }
    }
}
