//! Formation water correlations (McCain). Salinity in weight percent
//! NaCl; units psia, deg F, lbm/ft3, cP.

/// Water density at standard conditions, lbm/ft3.
pub fn water_density_sc(salinity: f64) -> f64 {
    62.368 + 0.438_603 * salinity + 1.600_74e-3 * salinity * salinity
}

/// Water formation volume factor, rb/stb.
pub fn water_fvf(p: f64, t: f64) -> f64 {
    let dv_t = -1.000_1e-2 + 1.333_91e-4 * t + 5.506_54e-7 * t * t;
    let dv_p = -1.953_01e-9 * p * t - 1.728_34e-13 * p * p * t
        - 3.589_22e-7 * p
        - 2.253_41e-10 * p * p;
    (1.0 + dv_t) * (1.0 + dv_p)
}

/// In-situ water density, lbm/ft3.
pub fn water_density(salinity: f64, p: f64, t: f64) -> f64 {
    water_density_sc(salinity) / water_fvf(p, t)
}

/// Water viscosity at atmospheric pressure, cP (McCain fit).
pub fn water_viscosity(salinity: f64, t: f64) -> f64 {
    let s = salinity;
    let a = 109.574 - 8.405_64 * s + 0.313_314 * s * s + 8.722_13e-3 * s * s * s;
    let b = -1.121_66 + 2.639_51e-2 * s - 6.794_61e-4 * s * s
        - 5.471_19e-5 * s * s * s
        + 1.555_86e-6 * s * s * s * s;
    a * t.powf(b)
}

/// Isothermal water compressibility, 1/psi. A constant is adequate for
/// the acoustic-velocity mixing rule.
pub const WATER_COMPRESSIBILITY: f64 = 3.0e-6;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_water_density_near_62_4() {
        let rho = water_density_sc(0.0);
        assert!((rho - 62.4).abs() < 0.1, "rho = {rho}");
    }

    #[test]
    fn brine_is_denser() {
        assert!(water_density_sc(10.0) > water_density_sc(0.0));
    }

    #[test]
    fn fvf_near_unity() {
        let bw = water_fvf(2_000.0, 150.0);
        assert!(bw > 0.98 && bw < 1.10, "Bw = {bw}");
    }

    #[test]
    fn viscosity_thins_with_temperature() {
        let mu_cool = water_viscosity(1.0, 100.0);
        let mu_hot = water_viscosity(1.0, 200.0);
        assert!(mu_cool > mu_hot);
        assert!(mu_hot > 0.1 && mu_cool < 2.0, "{mu_cool} {mu_hot}");
    }
}
