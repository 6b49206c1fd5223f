//! jl-pvt: black-oil fluid property model for jetlift.
//!
//! Provides:
//! - Surface fluid description (`FluidRatios`) and correlation selection
//!   (`PvtConfig`)
//! - Closed-form black-oil correlations for oil, gas, and water
//! - Immutable property snapshots (`FluidState`) with in-situ rates,
//!   mixture density/viscosity, and acoustic velocity
//!
//! Every entry point is a pure function of its inputs: configuration is
//! threaded through explicitly and there is no process-wide state, so
//! scenario sweeps can evaluate fluids in parallel.
//!
//! # Example
//!
//! ```
//! use jl_pvt::{FluidRatios, PvtConfig, ReservoirFluid};
//! use jl_core::units::{degf, psi};
//!
//! let ratios = FluidRatios::new(0.5, 400.0, 35.0, 0.65, 2.0).unwrap();
//! let fluid = ReservoirFluid::new(ratios, PvtConfig::default());
//! let state = fluid.properties(psi(1_500.0), degf(180.0)).unwrap();
//! assert!(state.rho_mix() > 0.0);
//! ```

pub mod config;
pub mod error;
pub mod gas;
pub mod oil;
pub mod state;
pub mod water;

// Re-exports for ergonomics
pub use config::{CorrelationSet, PvtConfig};
pub use error::{OutOfRangeWarning, PvtError, PvtResult};
pub use state::{FluidRatios, FluidState, InsituRates, ReservoirFluid};
