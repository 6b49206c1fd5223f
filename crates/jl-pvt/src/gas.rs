//! Real-gas correlations: Sutton pseudo-criticals, Papay z-factor,
//! Lee-Gonzalez-Eakin viscosity. Oilfield units throughout.

use jl_core::units::constants::{F_TO_R, M_AIR, R_GAS};

/// Sutton pseudo-critical temperature (deg R) and pressure (psia)
/// for a sweet natural gas of the given specific gravity (air = 1).
pub fn pseudo_critical(gas_sg: f64) -> (f64, f64) {
    let tpc = 169.2 + 349.5 * gas_sg - 74.0 * gas_sg * gas_sg;
    let ppc = 756.8 - 131.0 * gas_sg - 3.6 * gas_sg * gas_sg;
    (tpc, ppc)
}

/// Papay explicit z-factor from pseudo-reduced pressure and temperature.
///
/// Adequate for ppr up to ~8 and tpr 1.1-3.0; inputs are clamped to that
/// window by the caller (flat extrapolation policy).
pub fn z_factor(ppr: f64, tpr: f64) -> f64 {
    let z = 1.0 - 3.53 * ppr / 10f64.powf(0.9813 * tpr)
        + 0.274 * ppr * ppr / 10f64.powf(0.8157 * tpr);
    z.max(0.1)
}

/// Gas formation volume factor, ft3/scf.
pub fn gas_fvf(z: f64, t: f64, p: f64) -> f64 {
    0.028_27 * z * (t + F_TO_R) / p
}

/// In-situ gas density, lbm/ft3, from the real-gas law.
pub fn gas_density(gas_sg: f64, p: f64, t: f64, z: f64) -> f64 {
    let m = M_AIR * gas_sg;
    p * m / (z * R_GAS * (t + F_TO_R))
}

/// Gas viscosity, cP (Lee-Gonzalez-Eakin).
pub fn gas_viscosity(gas_sg: f64, rho_gas: f64, t: f64) -> f64 {
    let tr = t + F_TO_R;
    let m = M_AIR * gas_sg;
    let k = (9.379 + 0.016_07 * m) * tr.powf(1.5) / (209.2 + 19.26 * m + tr);
    let x = 3.448 + 986.4 / tr + 0.010_09 * m;
    let y = 2.447 - 0.2224 * x;
    let rho_gcc = rho_gas * 0.016_018_5;
    1e-4 * k * (x * rho_gcc.powf(y)).exp()
}

/// Isothermal gas compressibility, 1/psi. The ideal-gas 1/p form is
/// sufficient for the acoustic-velocity mixing rule.
pub fn gas_compressibility(p: f64) -> f64 {
    1.0 / p.max(1.0)
}
