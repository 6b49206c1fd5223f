//! Diffuser: decelerate the mixed stream into the discharge tubing and
//! recover pressure.
//!
//! The recovery is found by marching the diffuser energy equation upward
//! in pressure until the kinetic-energy deficit is paid back by the
//! accumulated expansion energy, then interpolating the crossing.

use crate::error::{PumpError, PumpResult};
use jl_core::inverse_lerp;
use jl_core::units::constants::{GC, SQIN_PER_SQFT};
use jl_pvt::ReservoirFluid;

/// Pressure march increment, psi, and step cap.
const P_INC: f64 = 50.0;
const MAX_STEPS: usize = 200;

/// Converged diffuser discharge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffuserOut {
    /// Discharge pressure at the diffuser exit, psia
    pub pdi: f64,
    /// Mixed stream velocity entering the diffuser, ft/s
    pub vtm: f64,
    /// Discharge velocity in the tubing, ft/s
    pub vdi: f64,
}

/// Kinetic energy change across the diffuser with its loss, ft2/s2.
fn diffuser_kinetic_energy(kdi: f64, vtm: f64, vdi: f64) -> f64 {
    (vdi * vdi - (1.0 - kdi) * vtm * vtm) / 2.0
}

/// Solve for the diffuser discharge pressure.
///
/// `mixed` and `qo_std` describe the mixed stream, `ptm`/`ttm` its state
/// at the throat exit, `ath` the throat area and `adi` the discharge
/// tubing area (must be larger for any recovery to happen).
pub fn diffuser_discharge(
    mixed: &ReservoirFluid,
    qo_std: f64,
    ptm: f64,
    ttm: f64,
    kdi: f64,
    ath: f64,
    adi: f64,
) -> PumpResult<DiffuserOut> {
    if adi <= ath {
        return Err(PumpError::InvalidArg {
            what: "discharge area must exceed throat area",
        });
    }
    if !(0.0..1.0).contains(&kdi) {
        return Err(PumpError::InvalidArg {
            what: "diffuser loss coefficient must be in [0, 1)",
        });
    }

    let state0 = mixed.properties_raw(ptm, ttm)?;
    let q0 = state0.insitu_rates(qo_std).total();
    let vtm = q0 / ath;

    let mut p_prev = ptm;
    let mut rho_prev = state0.rho_mix();
    let mut vdi_prev = q0 / adi;
    let mut dte_prev = diffuser_kinetic_energy(kdi, vtm, vdi_prev);

    // Already recovered at the throat pressure (slow stream)
    if dte_prev >= 0.0 {
        return Ok(DiffuserOut {
            pdi: ptm,
            vtm,
            vdi: vdi_prev,
        });
    }

    let mut ee = 0.0;
    for _ in 0..MAX_STEPS {
        let p = p_prev + P_INC;
        let state = mixed.properties_raw(p, ttm)?;
        let q = state.insitu_rates(qo_std).total();
        let vdi = q / adi;
        let rho = state.rho_mix();
        ee += SQIN_PER_SQFT * GC * P_INC * (1.0 / rho_prev + 1.0 / rho) / 2.0;
        let dte = diffuser_kinetic_energy(kdi, vtm, vdi) + ee;

        if dte >= 0.0 {
            let pdi = inverse_lerp(0.0, p_prev, dte_prev, p, dte);
            let f = (0.0 - dte_prev) / (dte - dte_prev);
            let vdi_out = vdi_prev + f * (vdi - vdi_prev);
            return Ok(DiffuserOut {
                pdi,
                vtm,
                vdi: vdi_out,
            });
        }

        p_prev = p;
        rho_prev = rho;
        vdi_prev = vdi;
        dte_prev = dte;
    }

    Err(PumpError::ConvergenceFailed {
        what: "diffuser recovery march",
    })
}
