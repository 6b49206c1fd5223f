//! Fluid property errors.

use jl_core::JlError;
use thiserror::Error;

/// Result type for PVT operations.
pub type PvtResult<T> = Result<T, PvtError>;

/// Errors that can occur during black-oil property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PvtError {
    /// Non-physical values (negative density, pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl From<PvtError> for JlError {
    fn from(err: PvtError) -> Self {
        match err {
            PvtError::NonPhysical { what } => JlError::Invariant { what },
            PvtError::InvalidArg { what } => JlError::InvalidArg { what },
        }
    }
}

/// Non-fatal record of a correlation evaluated outside its stated
/// validity range. The input is clamped to the range edge and the
/// evaluation continues; callers can inspect these on the returned state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutOfRangeWarning {
    pub what: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl std::fmt::Display for OutOfRangeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} = {:.3} outside correlation range [{:.3}, {:.3}], extrapolated flat",
            self.what, self.value, self.min, self.max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PvtError::NonPhysical { what: "pressure" };
        assert!(err.to_string().contains("pressure"));
    }

    #[test]
    fn warning_display() {
        let w = OutOfRangeWarning {
            what: "temperature",
            value: 450.0,
            min: 60.0,
            max: 300.0,
        };
        let msg = w.to_string();
        assert!(msg.contains("temperature"));
        assert!(msg.contains("extrapolated"));
    }

    #[test]
    fn error_to_jl_error() {
        let err = PvtError::InvalidArg { what: "water cut" };
        let jl: JlError = err.into();
        assert!(matches!(jl, JlError::InvalidArg { .. }));
    }
}
