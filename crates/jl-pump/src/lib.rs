//! jl-pump: jet pump nozzle-throat-diffuser hydraulics for jetlift.
//!
//! The physical heart of the system. Provides:
//! - Pump geometry and loss coefficients (`geometry`)
//! - Throat entry energy march with Mach tracking and the minimum
//!   suction pressure search (`entry`)
//! - Bernoulli nozzle relations (`nozzle`)
//! - The throat mixing momentum balance, an inner scoped solve (`throat`)
//! - Diffuser pressure recovery (`diffuser`)
//! - The composed balance for one suction pressure (`balance`)
//!
//! Cavitation and choked entry are reported as
//! [`PumpError::Infeasible`] - legitimate physical outcomes, distinct
//! from retryable numerical convergence failures.

pub mod balance;
pub mod diffuser;
pub mod entry;
pub mod error;
pub mod geometry;
pub mod nozzle;
pub mod throat;

// Re-exports
pub use balance::{pump_balance, PowerFluid, PumpSolution};
pub use diffuser::{diffuser_discharge, DiffuserOut};
pub use entry::{minimum_suction, sonic_residual_energy, throat_entry, ThroatEntry};
pub use error::{InfeasibleReason, PumpError, PumpResult};
pub use geometry::{JetPumpGeometry, PumpLosses};
pub use nozzle::{nozzle_inlet_pressure, nozzle_rate, nozzle_velocity};
pub use throat::{throat_discharge, ThroatMix, ThroatStreams};
