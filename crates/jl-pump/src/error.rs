//! Errors for jet pump hydraulics.

use jl_core::JlError;
use jl_flow::FlowError;
use jl_pvt::PvtError;
use thiserror::Error;

pub type PumpResult<T> = Result<T, PumpError>;

/// Why no physical operating point exists for the given inputs.
///
/// These are legitimate physical outcomes, not numerical bugs, and are
/// terminal: retrying at finer resolution cannot change them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfeasibleReason {
    /// Nozzle inlet pressure at or below throat entry pressure
    CavitatingNozzle,
    /// Throat entry reached sonic velocity before the energy balance closed
    ChokedThroatEntry,
    /// Nozzle demands more power fluid than the supply can deliver
    PowerFluidStarved,
    /// No power fluid supplied at all
    NoLiftEnergy,
    /// Throat mixing drove the pressure non-physical
    ThroatCollapse,
}

impl std::fmt::Display for InfeasibleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CavitatingNozzle => "nozzle inlet pressure does not exceed throat entry",
            Self::ChokedThroatEntry => "throat entry is choked at sonic velocity",
            Self::PowerFluidStarved => "nozzle demand exceeds the power fluid supply",
            Self::NoLiftEnergy => "no power fluid supplied",
            Self::ThroatCollapse => "throat mixing pressure collapsed",
        };
        f.write_str(s)
    }
}

/// Errors that can occur inside the nozzle/throat/diffuser balance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PumpError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Physically no solution for these inputs; terminal, non-retryable.
    #[error("Infeasible operating point: {reason}")]
    Infeasible { reason: InfeasibleReason },

    /// A local iteration failed to converge; retryable once at finer
    /// resolution before escalating.
    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: &'static str },

    #[error("Fluid property error: {0}")]
    Pvt(#[from] PvtError),

    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),
}

impl PumpError {
    /// Whether a retry at finer discretization could change the outcome.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PumpError::ConvergenceFailed { .. } | PumpError::Flow(FlowError::PressureFloor { .. })
        )
    }
}

impl From<PumpError> for JlError {
    fn from(e: PumpError) -> Self {
        match e {
            PumpError::InvalidArg { what } => JlError::InvalidArg { what },
            PumpError::Infeasible { .. } => JlError::Invariant {
                what: "infeasible operating point",
            },
            PumpError::ConvergenceFailed { what } => JlError::Invariant { what },
            PumpError::Pvt(p) => p.into(),
            PumpError::Flow(f) => f.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infeasible_display_names_the_physics() {
        let e = PumpError::Infeasible {
            reason: InfeasibleReason::ChokedThroatEntry,
        };
        assert!(e.to_string().contains("sonic"));
    }

    #[test]
    fn retryable_classification() {
        assert!(PumpError::ConvergenceFailed { what: "x" }.is_retryable());
        assert!(!PumpError::Infeasible {
            reason: InfeasibleReason::CavitatingNozzle
        }
        .is_retryable());
    }
}
