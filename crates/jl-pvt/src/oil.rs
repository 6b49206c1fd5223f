//! Saturated and undersaturated oil correlations.
//!
//! Standing and Vazquez-Beggs closed forms for bubble point, solution GOR
//! and formation volume factor; Beggs-Robinson viscosity. All functions are
//! pure and work in oilfield units: psia, deg F, scf/stb, lbm/ft3, cP.

use crate::config::CorrelationSet;

/// Oil specific gravity (water = 1) from API gravity.
pub fn oil_specific_gravity(api: f64) -> f64 {
    141.5 / (131.5 + api)
}

/// Bubble-point pressure, psia, at which the total producing GOR is
/// fully dissolved.
pub fn bubble_point(set: CorrelationSet, api: f64, gas_sg: f64, gor: f64, t: f64) -> f64 {
    match set {
        CorrelationSet::Standing => {
            let yg = 0.00091 * t - 0.0125 * api;
            18.2 * ((gor / gas_sg).powf(0.83) * 10f64.powf(yg) - 1.4)
        }
        CorrelationSet::VazquezBeggs => {
            let (c1, c2, c3) = vb_rs_coefficients(api);
            (gor / (c1 * gas_sg * (c3 * api / (t + 459.67)).exp())).powf(1.0 / c2)
        }
    }
    .max(14.7)
}

/// Solution gas-oil ratio, scf/stb, capped at the total producing GOR.
pub fn solution_gor(
    set: CorrelationSet,
    api: f64,
    gas_sg: f64,
    gor: f64,
    p: f64,
    t: f64,
) -> f64 {
    let rs = match set {
        CorrelationSet::Standing => {
            let yg = 0.0125 * api - 0.00091 * t;
            gas_sg * ((p / 18.2 + 1.4) * 10f64.powf(yg)).powf(1.2048)
        }
        CorrelationSet::VazquezBeggs => {
            let (c1, c2, c3) = vb_rs_coefficients(api);
            c1 * gas_sg * p.powf(c2) * (c3 * api / (t + 459.67)).exp()
        }
    };
    rs.clamp(0.0, gor)
}

fn vb_rs_coefficients(api: f64) -> (f64, f64, f64) {
    if api <= 30.0 {
        (0.0362, 1.0937, 25.724)
    } else {
        (0.0178, 1.187, 23.931)
    }
}

/// Saturated oil formation volume factor, rb/stb.
pub fn saturated_oil_fvf(set: CorrelationSet, api: f64, gas_sg: f64, rs: f64, t: f64) -> f64 {
    let go = oil_specific_gravity(api);
    match set {
        CorrelationSet::Standing => {
            let term = rs * (gas_sg / go).sqrt() + 1.25 * t;
            0.9759 + 0.000_12 * term.powf(1.2)
        }
        CorrelationSet::VazquezBeggs => {
            let (a1, a2, a3) = if api <= 30.0 {
                (4.677e-4, 1.751e-5, -1.811e-8)
            } else {
                (4.670e-4, 1.100e-5, 1.337e-9)
            };
            1.0 + a1 * rs + a2 * (t - 60.0) * (api / gas_sg)
                + a3 * rs * (t - 60.0) * (api / gas_sg)
        }
    }
}

/// Undersaturated oil compressibility, 1/psi (Vazquez-Beggs).
pub fn oil_compressibility(api: f64, gas_sg: f64, rs: f64, t: f64, p: f64) -> f64 {
    let co = (-1_433.0 + 5.0 * rs + 17.2 * t - 1_180.0 * gas_sg + 12.61 * api) / (1e5 * p);
    co.max(1e-7)
}

/// Oil formation volume factor, rb/stb, valid above and below bubble point.
pub fn oil_fvf(
    set: CorrelationSet,
    api: f64,
    gas_sg: f64,
    rs: f64,
    pb: f64,
    p: f64,
    t: f64,
) -> f64 {
    let bob = saturated_oil_fvf(set, api, gas_sg, rs, t);
    if p <= pb {
        bob
    } else {
        // Undersaturated: compress Bo(pb) with constant co
        let co = oil_compressibility(api, gas_sg, rs, t, p);
        bob * (co * (pb - p)).exp()
    }
}

/// Dead oil viscosity, cP (Beggs-Robinson).
pub fn dead_oil_viscosity(api: f64, t: f64) -> f64 {
    let z = 3.0324 - 0.020_23 * api;
    let y = 10f64.powf(z);
    let x = y * t.powf(-1.163);
    10f64.powf(x) - 1.0
}

/// Live (gas-saturated) oil viscosity, cP (Beggs-Robinson).
pub fn live_oil_viscosity(mu_dead: f64, rs: f64) -> f64 {
    let a = 10.715 * (rs + 100.0).powf(-0.515);
    let b = 5.44 * (rs + 150.0).powf(-0.338);
    a * mu_dead.powf(b)
}

/// In-situ oil density, lbm/ft3, from dissolved gas mass and Bo.
pub fn oil_density(api: f64, gas_sg: f64, rs: f64, bo: f64) -> f64 {
    let go = oil_specific_gravity(api);
    (62.4 * go + 0.013_6 * rs * gas_sg) / bo
}

#[cfg(test)]
mod tests {
    use super::*;

    const API: f64 = 35.0;
    const GAS_SG: f64 = 0.65;
    const GOR: f64 = 375.0;
    const T: f64 = 180.0;

    #[test]
    fn bubble_point_rs_consistency() {
        // Rs evaluated at the bubble point must return the full GOR.
        for set in [CorrelationSet::Standing, CorrelationSet::VazquezBeggs] {
            let pb = bubble_point(set, API, GAS_SG, GOR, T);
            assert!(pb > 500.0 && pb < 4_000.0, "pb = {pb}");
            let rs = solution_gor(set, API, GAS_SG, GOR, pb * 0.999, T);
            assert!(
                (rs - GOR).abs() / GOR < 0.02,
                "Rs(pb) = {rs} should recover GOR {GOR}"
            );
        }
    }

    #[test]
    fn solution_gor_monotonic_in_pressure() {
        let mut last = -1.0;
        for p in [100.0, 500.0, 1_000.0, 1_500.0, 2_000.0] {
            let rs = solution_gor(CorrelationSet::Standing, API, GAS_SG, GOR, p, T);
            assert!(rs >= last);
            last = rs;
        }
    }

    #[test]
    fn fvf_above_one_and_shrinks_when_undersaturated() {
        let pb = bubble_point(CorrelationSet::Standing, API, GAS_SG, GOR, T);
        let bob = oil_fvf(CorrelationSet::Standing, API, GAS_SG, GOR, pb, pb, T);
        let bo_hi = oil_fvf(CorrelationSet::Standing, API, GAS_SG, GOR, pb, pb + 1_500.0, T);
        assert!(bob > 1.0 && bob < 2.0, "Bob = {bob}");
        assert!(bo_hi < bob, "undersaturated Bo must shrink with pressure");
    }

    #[test]
    fn viscosity_decreases_with_dissolved_gas() {
        let mu_dead = dead_oil_viscosity(API, T);
        let mu_live = live_oil_viscosity(mu_dead, 300.0);
        assert!(mu_dead > 0.0);
        assert!(mu_live < mu_dead);
    }

    #[test]
    fn density_plausible() {
        let bo = saturated_oil_fvf(CorrelationSet::Standing, API, GAS_SG, 300.0, T);
        let rho = oil_density(API, GAS_SG, 300.0, bo);
        assert!(rho > 35.0 && rho < 62.4, "rho_oil = {rho}");
    }
}
