//! Power fluid acceleration through the nozzle.

use crate::error::{InfeasibleReason, PumpError, PumpResult};
use jl_core::units::constants::{GC, SQIN_PER_SQFT};
use jl_core::units::ft3s_to_bpd;

/// Nozzle exit velocity from the Bernoulli/orifice relation, ft/s.
///
/// `pni` and `pte` psia, `rho_nz` lbm/ft3, `knz` dimensionless loss.
/// A nozzle inlet pressure at or below the throat entry pressure cannot
/// drive flow: that is cavitation territory and reported as infeasible.
pub fn nozzle_velocity(pni: f64, pte: f64, knz: f64, rho_nz: f64) -> PumpResult<f64> {
    if rho_nz <= 0.0 {
        return Err(PumpError::InvalidArg {
            what: "power fluid density must be positive",
        });
    }
    if pni <= pte {
        return Err(PumpError::Infeasible {
            reason: InfeasibleReason::CavitatingNozzle,
        });
    }
    Ok((2.0 * GC * SQIN_PER_SQFT * (pni - pte) / (rho_nz * (1.0 + knz))).sqrt())
}

/// Nozzle volumetric rate: (ft3/s, bbl/d).
pub fn nozzle_rate(vnz: f64, anz: f64) -> (f64, f64) {
    let q = vnz * anz;
    (q, ft3s_to_bpd(q))
}

/// Static power fluid column from surface to the pump, psia.
pub fn nozzle_inlet_pressure(surface_pressure: f64, rho_pf: f64, pump_tvd: f64) -> f64 {
    surface_pressure + rho_pf * pump_tvd / SQIN_PER_SQFT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_grows_with_drawdown() {
        let v1 = nozzle_velocity(3_000.0, 1_000.0, 0.03, 62.4).unwrap();
        let v2 = nozzle_velocity(4_000.0, 1_000.0, 0.03, 62.4).unwrap();
        assert!(v2 > v1);
        // 2000 psi across a water nozzle is a few hundred ft/s
        assert!(v1 > 300.0 && v1 < 700.0, "v1 = {v1}");
    }

    #[test]
    fn reversed_pressures_cavitate() {
        let r = nozzle_velocity(900.0, 1_000.0, 0.03, 62.4);
        assert!(matches!(
            r,
            Err(PumpError::Infeasible {
                reason: InfeasibleReason::CavitatingNozzle
            })
        ));
    }

    #[test]
    fn rate_follows_area() {
        let (q_ft3s, q_bpd) = nozzle_rate(500.0, 0.01 / 144.0);
        assert!((q_ft3s - 500.0 * 0.01 / 144.0).abs() < 1e-12);
        assert!(q_bpd > 0.0);
    }

    #[test]
    fn static_column_adds_head() {
        // Fresh water adds ~0.433 psi/ft
        let pni = nozzle_inlet_pressure(3_000.0, 62.4, 6_000.0);
        assert!((pni - 3_000.0 - 2_600.0).abs() < 50.0, "pni = {pni}");
    }
}
