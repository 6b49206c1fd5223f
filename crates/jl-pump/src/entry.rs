//! Throat entry: accelerate the produced stream from suction pressure
//! into the annular entry around the nozzle jet.
//!
//! The entry energy equation balances kinetic energy against the
//! expansion energy released as pressure falls, integrating dp/rho with
//! the trapezoid rule while tracking the Mach number of the gassy
//! mixture. The balance closes where the total crosses zero; reaching
//! Mach 1 first means the entry is choked.

use crate::error::{InfeasibleReason, PumpError, PumpResult};
use jl_core::inverse_lerp;
use jl_core::units::constants::{GC, SQIN_PER_SQFT};
use jl_pvt::ReservoirFluid;
use tracing::{debug, warn};

/// Hard cap on march steps; a normal entry resolves in tens of steps.
const MAX_MARCH_STEPS: usize = 400;

/// Converged throat entry conditions for one suction pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThroatEntry {
    /// Throat entry pressure, psia
    pub pte: f64,
    /// Entry velocity, ft/s
    pub vte: f64,
    /// Entry mixture density, lbm/ft3
    pub rho_te: f64,
    /// Mach number at the entry solution
    pub mach: f64,
}

/// Kinetic energy of the entry stream with its friction loss, ft2/s2.
fn entry_kinetic_energy(ken: f64, v: f64) -> f64 {
    (1.0 + ken) * v * v / 2.0
}

/// Trapezoid increment of expansion energy over a pressure step, ft2/s2.
fn expansion_increment(p0: f64, rho0: f64, p1: f64, rho1: f64) -> f64 {
    SQIN_PER_SQFT * GC * (p1 - p0) * (1.0 / rho0 + 1.0 / rho1) / 2.0
}

struct MarchPoint {
    p: f64,
    v: f64,
    rho: f64,
    mach: f64,
    tee: f64,
}

/// Solve the throat entry energy balance at suction pressure `psu`.
///
/// Returns `Err(Infeasible { ChokedThroatEntry })` when the stream goes
/// sonic before the balance closes.
pub fn throat_entry(
    fluid: &ReservoirFluid,
    psu: f64,
    tsu: f64,
    qo_std: f64,
    ken: f64,
    ate: f64,
    step: f64,
) -> PumpResult<ThroatEntry> {
    let outcome = entry_march(fluid, psu, tsu, qo_std, ken, ate, step)?;
    match outcome {
        MarchOutcome::Balanced(e) => Ok(e),
        MarchOutcome::Sonic { .. } => Err(PumpError::Infeasible {
            reason: InfeasibleReason::ChokedThroatEntry,
        }),
    }
}

/// Residual entry energy at the sonic point, ft2/s2.
///
/// Positive means the balance cannot close subsonic (choked); the root
/// over suction pressure is the minimum feasible suction pressure.
pub fn sonic_residual_energy(
    fluid: &ReservoirFluid,
    psu: f64,
    tsu: f64,
    qo_std: f64,
    ken: f64,
    ate: f64,
    step: f64,
) -> PumpResult<f64> {
    match entry_march_to_sonic(fluid, psu, tsu, qo_std, ken, ate, step)? {
        Some(tee) => Ok(tee),
        // Never went sonic before the pressure floor: energy left over
        None => Ok(0.0),
    }
}

enum MarchOutcome {
    Balanced(ThroatEntry),
    Sonic { residual_energy: f64 },
}

fn march_point(
    fluid: &ReservoirFluid,
    p: f64,
    tsu: f64,
    qo_std: f64,
    ate: f64,
) -> PumpResult<(f64, f64, f64)> {
    let state = fluid.properties_raw(p, tsu)?;
    let qtot = state.insitu_rates(qo_std).total();
    let v = qtot / ate;
    Ok((v, state.rho_mix(), state.sonic_velocity()))
}

fn entry_march(
    fluid: &ReservoirFluid,
    psu: f64,
    tsu: f64,
    qo_std: f64,
    ken: f64,
    ate: f64,
    step: f64,
) -> PumpResult<MarchOutcome> {
    validate_entry_args(psu, qo_std, ken, ate, step)?;

    let (v0, rho0, c0) = march_point(fluid, psu, tsu, qo_std, ate)?;
    let mut prev = MarchPoint {
        p: psu,
        v: v0,
        rho: rho0,
        mach: v0 / c0,
        tee: entry_kinetic_energy(ken, v0),
    };

    // Degenerate: nothing flowing in, the entry sits at suction pressure
    if prev.tee <= 0.0 {
        return Ok(MarchOutcome::Balanced(ThroatEntry {
            pte: psu,
            vte: prev.v,
            rho_te: prev.rho,
            mach: prev.mach,
        }));
    }

    // Already supersonic at suction conditions: hopelessly choked
    if prev.mach >= 1.0 {
        return Ok(MarchOutcome::Sonic {
            residual_energy: prev.tee,
        });
    }

    let mut ee = 0.0;
    for _ in 0..MAX_MARCH_STEPS {
        let p = prev.p - step;
        if p <= step {
            // Ran out of pressure before balancing: treat as choked
            return Ok(MarchOutcome::Sonic {
                residual_energy: prev.tee,
            });
        }
        let (v, rho, c) = march_point(fluid, p, tsu, qo_std, ate)?;
        ee += expansion_increment(prev.p, prev.rho, p, rho);
        let point = MarchPoint {
            p,
            v,
            rho,
            mach: v / c,
            tee: entry_kinetic_energy(ken, v) + ee,
        };

        if point.mach >= 1.0 {
            // Interpolate the leftover energy at exactly Mach 1
            let f = (1.0 - prev.mach) / (point.mach - prev.mach);
            let residual = prev.tee + f * (point.tee - prev.tee);
            debug!(psu, residual, "throat entry went sonic");
            return Ok(MarchOutcome::Sonic {
                residual_energy: residual,
            });
        }

        if point.tee <= 0.0 {
            let f = (0.0 - prev.tee) / (point.tee - prev.tee);
            let pte = inverse_lerp(0.0, prev.p, prev.tee, point.p, point.tee);
            let vte = prev.v + f * (point.v - prev.v);
            let rho_te = prev.rho + f * (point.rho - prev.rho);
            let mach = prev.mach + f * (point.mach - prev.mach);
            return Ok(MarchOutcome::Balanced(ThroatEntry {
                pte,
                vte,
                rho_te,
                mach,
            }));
        }

        prev = point;
    }

    Err(PumpError::ConvergenceFailed {
        what: "throat entry march exceeded the step cap",
    })
}

/// March until sonic (or the floor) regardless of the energy sign and
/// return the entry energy at Mach 1, or None if sonic was never reached.
fn entry_march_to_sonic(
    fluid: &ReservoirFluid,
    psu: f64,
    tsu: f64,
    qo_std: f64,
    ken: f64,
    ate: f64,
    step: f64,
) -> PumpResult<Option<f64>> {
    validate_entry_args(psu, qo_std, ken, ate, step)?;

    let (v0, rho0, c0) = march_point(fluid, psu, tsu, qo_std, ate)?;
    let mut prev = MarchPoint {
        p: psu,
        v: v0,
        rho: rho0,
        mach: v0 / c0,
        tee: entry_kinetic_energy(ken, v0),
    };
    if prev.mach >= 1.0 {
        return Ok(Some(prev.tee));
    }
    let mut ee = 0.0;

    for _ in 0..MAX_MARCH_STEPS {
        let p = prev.p - step;
        if p <= step {
            return Ok(None);
        }
        let (v, rho, c) = march_point(fluid, p, tsu, qo_std, ate)?;
        ee += expansion_increment(prev.p, prev.rho, p, rho);
        let point = MarchPoint {
            p,
            v,
            rho,
            mach: v / c,
            tee: entry_kinetic_energy(ken, v) + ee,
        };
        if point.mach >= 1.0 {
            let f = (1.0 - prev.mach) / (point.mach - prev.mach);
            return Ok(Some(prev.tee + f * (point.tee - prev.tee)));
        }
        prev = point;
    }
    Ok(None)
}

fn validate_entry_args(psu: f64, qo_std: f64, ken: f64, ate: f64, step: f64) -> PumpResult<()> {
    if !psu.is_finite() || psu <= 0.0 {
        return Err(PumpError::InvalidArg {
            what: "suction pressure must be positive",
        });
    }
    if qo_std < 0.0 {
        return Err(PumpError::InvalidArg {
            what: "oil rate must be non-negative",
        });
    }
    if ate <= 0.0 {
        return Err(PumpError::InvalidArg {
            what: "entry area must be positive",
        });
    }
    if !(0.0..1.0).contains(&ken) {
        return Err(PumpError::InvalidArg {
            what: "entry loss coefficient must be in [0, 1)",
        });
    }
    if step <= 0.0 {
        return Err(PumpError::InvalidArg {
            what: "entry march step must be positive",
        });
    }
    Ok(())
}

/// Minimum feasible suction pressure: the psu that puts the throat entry
/// exactly at Mach 1. Secant iteration on the sonic residual energy.
///
/// `rate_at` maps a candidate suction pressure to the stock-tank oil rate
/// the reservoir delivers there (the inflow relation, supplied by the
/// caller to keep this crate free of reservoir knowledge).
#[allow(clippy::too_many_arguments)]
pub fn minimum_suction(
    fluid: &ReservoirFluid,
    tsu: f64,
    ken: f64,
    ate: f64,
    step: f64,
    psu_start: f64,
    rate_at: impl Fn(f64) -> f64,
) -> PumpResult<f64> {
    const PSU_TOL: f64 = 5.0;
    const MAX_ITERS: usize = 12;

    let floor = 2.0 * step;
    let mut x0 = psu_start.max(floor + PSU_TOL);
    let mut x1 = (x0 - 100.0).max(floor);
    let mut f0 = sonic_residual_energy(fluid, x0, tsu, rate_at(x0), ken, ate, step)?;
    let mut f1 = sonic_residual_energy(fluid, x1, tsu, rate_at(x1), ken, ate, step)?;

    for _ in 0..MAX_ITERS {
        if (x0 - x1).abs() <= PSU_TOL {
            return Ok(x1);
        }
        if (f0 - f1).abs() < 1e-12 {
            break;
        }
        let x2 = (x1 - f1 * (x0 - x1) / (f0 - f1)).max(floor);
        let f2 = sonic_residual_energy(fluid, x2, tsu, rate_at(x2), ken, ate, step)?;
        x0 = x1;
        f0 = f1;
        x1 = x2;
        f1 = f2;
    }
    warn!(psu = x1, "minimum suction search did not fully converge");
    Ok(x1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jl_pvt::{FluidRatios, PvtConfig};

    fn fluid() -> ReservoirFluid {
        let ratios = FluidRatios::new(0.5, 400.0, 35.0, 0.65, 2.0).unwrap();
        ReservoirFluid::new(ratios, PvtConfig::default())
    }

    // 0.03 in2 annular entry
    const ATE: f64 = 0.03 / 144.0;

    #[test]
    fn entry_pressure_below_suction() {
        let e = throat_entry(&fluid(), 1_500.0, 180.0, 300.0, 0.03, ATE, 25.0).unwrap();
        assert!(e.pte < 1_500.0, "pte = {}", e.pte);
        assert!(e.vte > 0.0);
        assert!(e.rho_te > 0.0);
        assert!(e.mach < 1.0);
    }

    #[test]
    fn zero_rate_entry_is_trivial() {
        let e = throat_entry(&fluid(), 1_500.0, 180.0, 0.0, 0.03, ATE, 25.0).unwrap();
        assert_eq!(e.pte, 1_500.0);
        assert_eq!(e.vte, 0.0);
    }

    #[test]
    fn higher_rate_pulls_entry_pressure_down() {
        let lo = throat_entry(&fluid(), 1_500.0, 180.0, 150.0, 0.03, ATE, 25.0).unwrap();
        let hi = throat_entry(&fluid(), 1_500.0, 180.0, 450.0, 0.03, ATE, 25.0).unwrap();
        assert!(hi.pte < lo.pte);
        assert!(hi.vte > lo.vte);
    }

    #[test]
    fn low_suction_pressure_chokes() {
        // Starving suction pressure with a strong rate drives the gassy
        // mixture sonic before the balance can close.
        let r = throat_entry(&fluid(), 150.0, 180.0, 800.0, 0.03, ATE, 10.0);
        assert!(matches!(
            r,
            Err(PumpError::Infeasible {
                reason: InfeasibleReason::ChokedThroatEntry
            })
        ));
    }

    #[test]
    fn minimum_suction_separates_regimes() {
        let f = fluid();
        let pres = 2_500.0;
        let rate = |psu: f64| 1.0 * (pres - psu).max(0.0);
        let psu_min =
            minimum_suction(&f, 180.0, 0.03, ATE, 25.0, pres - 300.0, rate).unwrap();
        assert!(psu_min > 50.0 && psu_min < pres, "psu_min = {psu_min}");

        // Above the minimum the entry balances; well below it chokes
        let above = throat_entry(&f, psu_min + 150.0, 180.0, rate(psu_min + 150.0), 0.03, ATE, 25.0);
        assert!(above.is_ok(), "{above:?}");
    }

    #[test]
    fn rejects_bad_args() {
        assert!(throat_entry(&fluid(), -5.0, 180.0, 100.0, 0.03, ATE, 25.0).is_err());
        assert!(throat_entry(&fluid(), 1_000.0, 180.0, -1.0, 0.03, ATE, 25.0).is_err());
        assert!(throat_entry(&fluid(), 1_000.0, 180.0, 100.0, 0.03, -ATE, 25.0).is_err());
    }
}
