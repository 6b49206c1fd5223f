//! Throat mixing: one-dimensional momentum balance between the power
//! fluid jet, the entrained produced stream, and the fully mixed stream.
//!
//! The mixed density depends on the throat exit pressure through gas
//! compressibility, so the balance is an inner fixed-point solve on that
//! pressure, scoped here with its own convergence criteria so failures
//! are attributable to this layer and not the outer solver.

use crate::error::{InfeasibleReason, PumpError, PumpResult};
use crate::geometry::JetPumpGeometry;
use jl_core::units::constants::{GC, SQIN_PER_SQFT};
use jl_flow::{friction_factor, gradient::reynolds};
use jl_pvt::ReservoirFluid;
use tracing::debug;

/// Inner loop limits; the fixed point usually settles within ten passes.
const PTM_TOL: f64 = 0.1;
const MAX_PASSES: usize = 30;

/// Converged throat mixing result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThroatMix {
    /// Throat exit (mixed stream) pressure, psia
    pub ptm: f64,
    /// Mixed stream velocity at throat exit, ft/s
    pub vtm: f64,
    /// Mixed stream density at throat exit, lbm/ft3
    pub rho_tm: f64,
    /// Dimensionless momentum imbalance at the converged pressure
    pub momentum_residual: f64,
}

/// Momentum flux of a stream, lbf.
fn momentum_flux(rho: f64, v: f64, area: f64) -> f64 {
    rho * v * v * area / GC
}

/// Mass flow of a stream, lbm/s.
fn mass_flow(rho: f64, v: f64, area: f64) -> f64 {
    rho * v * area
}

/// Inputs describing the two streams entering the throat.
#[derive(Debug, Clone, Copy)]
pub struct ThroatStreams {
    /// Nozzle jet velocity, ft/s
    pub vnz: f64,
    /// Power fluid density, lbm/ft3
    pub rho_nz: f64,
    /// Entry stream velocity, ft/s
    pub vte: f64,
    /// Entry stream density, lbm/ft3
    pub rho_te: f64,
}

/// Solve the throat momentum balance for the mixed-stream pressure.
///
/// `mixed` is the blended fluid (produced stream plus power fluid water)
/// and `qo_std` its stock-tank oil rate; `pte`/`tte` are the throat entry
/// conditions shared by both incoming streams.
pub fn throat_discharge(
    mixed: &ReservoirFluid,
    qo_std: f64,
    pte: f64,
    tte: f64,
    streams: ThroatStreams,
    geom: &JetPumpGeometry,
) -> PumpResult<ThroatMix> {
    let anz = geom.nozzle_area;
    let ate = geom.entry_area();
    let ath = geom.throat_area;

    let mom_nz = momentum_flux(streams.rho_nz, streams.vnz, anz);
    let mom_te = momentum_flux(streams.rho_te, streams.vte, ate);
    let m_total = mass_flow(streams.rho_nz, streams.vnz, anz)
        + mass_flow(streams.rho_te, streams.vte, ate);

    if m_total <= 0.0 {
        return Err(PumpError::Infeasible {
            reason: InfeasibleReason::NoLiftEnergy,
        });
    }

    // One momentum pass: mixed density at a trial pressure gives the
    // mixed velocity, friction, and a corrected throat exit pressure.
    let pass = |ptm: f64| -> PumpResult<(f64, f64, f64)> {
        let state = mixed.properties_raw(ptm, tte)?;
        let rho_tm = state.rho_mix();
        let vtm = m_total / (rho_tm * ath);
        let mom_tm = momentum_flux(rho_tm, vtm, ath);

        // Wall friction of the mixed stream: lumped coefficient plus the
        // Darcy friction factor over the mixing tube when its length is
        // modelled.
        let mut k_fric = geom.losses.kth;
        if geom.throat_length > 0.0 {
            let d = geom.throat_diameter();
            let re = reynolds(rho_tm, vtm, d, state.mu_mix());
            k_fric += friction_factor(re, 0.0) * geom.throat_length / d;
        }
        let mom_fr = 0.5 * k_fric * mom_tm;

        let dp = (mom_fr + mom_tm - mom_nz - mom_te) / (ath * SQIN_PER_SQFT);
        Ok((pte - dp, vtm, rho_tm))
    };

    let mut ptm = pte;
    for pass_count in 0..MAX_PASSES {
        let (ptm_next, vtm, rho_tm) = pass(ptm)?;
        if ptm_next <= 0.0 {
            return Err(PumpError::Infeasible {
                reason: InfeasibleReason::ThroatCollapse,
            });
        }
        if (ptm_next - ptm).abs() <= PTM_TOL {
            // Dimensionless imbalance of the full balance at the answer
            let residual =
                (ptm_next - ptm).abs() * ath * SQIN_PER_SQFT / (mom_nz + mom_te).max(1e-12);
            debug!(ptm = ptm_next, passes = pass_count + 1, "throat mixing converged");
            return Ok(ThroatMix {
                ptm: ptm_next,
                vtm,
                rho_tm,
                momentum_residual: residual,
            });
        }
        // Damp late passes so a gas-rich mixture cannot oscillate
        let relax = if pass_count < 10 { 1.0 } else { 0.5 };
        ptm += relax * (ptm_next - ptm);
    }

    Err(PumpError::ConvergenceFailed {
        what: "throat mixing pressure iteration",
    })
}
