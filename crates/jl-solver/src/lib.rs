//! jl-solver: operating-point solver for a jet-pumped well.
//!
//! Couples the inflow performance relation, the pump hydraulics, and the
//! outflow pressure traverse into one scalar root-find over suction
//! pressure. The public surface is [`solve`]: feed it the power fluid
//! supply, reservoir description, wellbore, pump geometry, and a
//! [`SolveConfig`]; get back an [`OperatingPoint`] or a terminal
//! [`SolveFailure`].
//!
//! # Example
//!
//! ```no_run
//! use jl_core::units::{ft, inch, sq_inch};
//! use jl_flow::{Conduit, WellPath};
//! use jl_pump::{JetPumpGeometry, PowerFluid, PumpLosses};
//! use jl_pvt::FluidRatios;
//! use jl_solver::{solve, IprModel, ReservoirSpec, SolveConfig, WellSpec};
//!
//! let power = PowerFluid::new(3_000.0, 1_000.0, 62.4).unwrap();
//! let reservoir = ReservoirSpec {
//!     ipr: IprModel::ProductivityIndex { pres: 2_500.0, j: 1.0 },
//!     temperature: 180.0,
//!     fluid: FluidRatios::new(0.5, 400.0, 35.0, 0.65, 2.0).unwrap(),
//! };
//! let tubing = Conduit::tubing(inch(2.441), inch(0.0018)).unwrap();
//! let well = WellSpec {
//!     path: WellPath::vertical(ft(8_000.0), 8_000.0, 8_000.0, 80.0, 180.0).unwrap(),
//!     discharge_tubing: tubing,
//!     suction_conduit: tubing,
//!     wellhead_pressure: 150.0,
//! };
//! let pump = JetPumpGeometry::new(sq_inch(0.01), sq_inch(0.04), PumpLosses::default()).unwrap();
//!
//! let point = solve(&power, &reservoir, &well, &pump, &SolveConfig::default()).unwrap();
//! println!("suction {:.0} psia, oil {:.0} stb/d", point.suction_pressure, point.oil_rate);
//! ```

pub mod error;
pub mod ipr;
pub mod operating;

// Re-exports
pub use error::SolveFailure;
pub use ipr::IprModel;
pub use operating::{solve, OperatingPoint, ReservoirSpec, SolveConfig, WellSpec};
