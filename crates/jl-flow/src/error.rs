//! Errors for multiphase gradient and traverse operations.

use jl_core::JlError;
use jl_pvt::PvtError;
use thiserror::Error;

pub type FlowResult<T> = Result<T, FlowError>;

/// Errors that can occur during gradient evaluation or a pressure traverse.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    /// The marching integration drove pressure to or below the floor.
    /// Propagated to the caller as a local convergence failure; never
    /// silently clamped.
    #[error("Pressure fell to {pressure:.1} psia at {md:.0} ft md during traverse")]
    PressureFloor { md: f64, pressure: f64 },

    #[error("Fluid property error: {0}")]
    Pvt(#[from] PvtError),
}

impl From<FlowError> for JlError {
    fn from(e: FlowError) -> Self {
        match e {
            FlowError::InvalidArg { what } => JlError::InvalidArg { what },
            FlowError::NonPhysical { what } => JlError::Invariant { what },
            FlowError::PressureFloor { .. } => JlError::Invariant {
                what: "traverse pressure floor",
            },
            FlowError::Pvt(p) => p.into(),
        }
    }
}
