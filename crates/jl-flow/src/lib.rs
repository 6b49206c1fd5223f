//! jl-flow: multiphase flow engine for jetlift.
//!
//! Provides:
//! - Flow conduits and the deviated well path (`geometry`)
//! - Flow pattern classification with boundary blending (`pattern`)
//! - The multiphase pressure-gradient engine (`gradient`)
//! - The marching pressure-traverse integrator (`traverse`)
//!
//! Every entry point is a deterministic function of its inputs; the
//! gradient is continuous across pattern transitions so root-finders
//! layered on top see a smooth residual.

pub mod error;
pub mod geometry;
pub mod gradient;
pub mod pattern;
pub mod traverse;

// Re-exports
pub use error::{FlowError, FlowResult};
pub use geometry::{Conduit, PathStation, WellPath};
pub use gradient::{
    friction_factor, gradient, single_phase_gradient, Gradient, GradientInput,
    MultiphaseCorrelation,
};
pub use pattern::{classify, FlowPattern, PatternBlend};
pub use traverse::{traverse, Traverse, TraverseConfig, TraversePoint};
