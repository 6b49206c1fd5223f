//! Solve failure taxonomy.
//!
//! Only input validation and the terminal infeasible/diverged outcomes
//! are user-visible; intermediate convergence failures are retried
//! internally and surface here only once the retry is exhausted.

use jl_flow::FlowError;
use jl_pump::{InfeasibleReason, PumpError};
use jl_pvt::PvtError;
use thiserror::Error;

/// Terminal failure of an operating-point solve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveFailure {
    /// Bad inputs, rejected before any computation.
    #[error("Input validation: {what}")]
    InputValidation { what: &'static str },

    /// Physically no operating point exists for these inputs.
    #[error("Infeasible operating point in {component}: {reason}")]
    Infeasible {
        reason: String,
        /// Component that established infeasibility
        component: &'static str,
    },

    /// The iteration did not converge; carries the last best residual
    /// for diagnosis.
    #[error("Solver diverged in {component}: {what} (last residual {last_residual:?})")]
    Diverged {
        what: String,
        component: &'static str,
        last_residual: Option<f64>,
    },
}

impl SolveFailure {
    pub(crate) fn infeasible(reason: InfeasibleReason, component: &'static str) -> Self {
        Self::Infeasible {
            reason: reason.to_string(),
            component,
        }
    }
}

impl From<PumpError> for SolveFailure {
    fn from(e: PumpError) -> Self {
        match e {
            PumpError::InvalidArg { what } => Self::InputValidation { what },
            PumpError::Infeasible { reason } => Self::infeasible(reason, "pump"),
            PumpError::ConvergenceFailed { what } => Self::Diverged {
                what: what.to_string(),
                component: "pump",
                last_residual: None,
            },
            PumpError::Pvt(p) => p.into(),
            PumpError::Flow(f) => f.into(),
        }
    }
}

impl From<FlowError> for SolveFailure {
    fn from(e: FlowError) -> Self {
        match e {
            FlowError::InvalidArg { what } => Self::InputValidation { what },
            FlowError::Pvt(p) => p.into(),
            other => Self::Diverged {
                what: other.to_string(),
                component: "traverse",
                last_residual: None,
            },
        }
    }
}

impl From<PvtError> for SolveFailure {
    fn from(e: PvtError) -> Self {
        match e {
            PvtError::InvalidArg { what } => Self::InputValidation { what },
            PvtError::NonPhysical { what } => Self::Diverged {
                what: what.to_string(),
                component: "pvt",
                last_residual: None,
            },
        }
    }
}
