//! Multiphase pressure gradient for one flow segment.
//!
//! Gravity term from the slip (holdup-weighted) mixture density, friction
//! from Darcy-Weisbach with a Swamee-Jain friction factor. Pattern
//! classification and per-pattern holdup come from [`crate::pattern`];
//! gradients of neighbouring patterns are cross-faded inside the blending
//! bands so the result is continuous in the inputs.

use crate::error::{FlowError, FlowResult};
use crate::geometry::Conduit;
use crate::pattern::{self, FlowPattern, PatternBlend};
use jl_core::units::constants::{GC, SQIN_PER_SQFT};
use jl_pvt::FluidState;
use serde::{Deserialize, Serialize};

/// Surface tension defaults, dyn/cm, blended by the water share of liquid.
const SIGMA_OIL_DYN: f64 = 30.0;
const SIGMA_WATER_DYN: f64 = 70.0;
const DYN_CM_TO_LBF_FT: f64 = 6.852e-5;

/// Which holdup treatment the engine applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MultiphaseCorrelation {
    /// Pattern-classified drift-flux holdup (default)
    #[default]
    DriftFlux,
    /// No-slip homogeneous mixture
    Homogeneous,
}

/// Inputs for one gradient evaluation.
#[derive(Debug, Clone, Copy)]
pub struct GradientInput<'a> {
    /// Property snapshot at the segment-average pressure and temperature
    pub state: &'a FluidState,
    /// Stock-tank oil rate through the segment, stb/d
    pub qo_std: f64,
    /// Flow cross-section
    pub conduit: Conduit,
    /// Cosine of inclination from vertical (1 = vertical)
    pub cos_incl: f64,
}

/// Result of a gradient evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    /// Pressure gradient along measured depth, psi/ft (positive downward)
    pub dp_dmd: f64,
    /// Liquid holdup, fraction of the cross-section
    pub holdup: f64,
    /// Dominant flow pattern
    pub pattern: FlowPattern,
}

/// Darcy friction factor: laminar below Re 2300, Swamee-Jain above.
pub fn friction_factor(reynolds: f64, relative_roughness: f64) -> f64 {
    if reynolds <= 0.0 {
        return 0.0;
    }
    if reynolds < 2_300.0 {
        64.0 / reynolds
    } else {
        let a = relative_roughness / 3.7;
        let b = 5.74 / reynolds.powf(0.9);
        let f = 0.25 / (a + b).log10().powi(2);
        f.max(1e-4)
    }
}

/// Single-phase Darcy-Weisbach gradient, psi/ft.
///
/// `rho` lbm/ft3, `mu` cP, `v` ft/s.
pub fn single_phase_gradient(
    rho: f64,
    mu: f64,
    v: f64,
    conduit: Conduit,
    cos_incl: f64,
) -> f64 {
    let d = conduit.hydraulic_diameter;
    let re = reynolds(rho, v, d, mu);
    let f = friction_factor(re, conduit.roughness / d);
    let fric = f * rho * v * v / (2.0 * GC * d) / SQIN_PER_SQFT;
    let grav = rho * cos_incl / SQIN_PER_SQFT;
    grav + fric
}

/// Reynolds number with viscosity in cP (1 cP = 6.7197e-4 lbm/ft/s).
pub fn reynolds(rho: f64, v: f64, d: f64, mu_cp: f64) -> f64 {
    if mu_cp <= 0.0 {
        return 0.0;
    }
    rho * v * d / (mu_cp * 6.7197e-4)
}

/// Evaluate the multiphase pressure gradient for one segment.
pub fn gradient(
    correlation: MultiphaseCorrelation,
    input: GradientInput<'_>,
) -> FlowResult<Gradient> {
    let GradientInput {
        state,
        qo_std,
        conduit,
        cos_incl,
    } = input;

    if qo_std < 0.0 {
        return Err(FlowError::InvalidArg {
            what: "oil rate must be non-negative",
        });
    }
    if !(0.0..=1.0).contains(&cos_incl) {
        return Err(FlowError::InvalidArg {
            what: "inclination cosine must be in [0, 1]",
        });
    }

    let rates = state.insitu_rates(qo_std);
    let vsl = rates.liquid() / conduit.area;
    let vsg = rates.gas / conduit.area;
    let vm = vsl + vsg;

    // Zero rate: static column of the no-slip mixture
    if vm <= 1e-9 {
        let rho = state.rho_mix();
        return Ok(Gradient {
            dp_dmd: rho * cos_incl / SQIN_PER_SQFT,
            holdup: 1.0 - state.gas_fraction(),
            pattern: FlowPattern::SinglePhase,
        });
    }

    // Liquid-phase mixture properties (oil and water move together here)
    let (fo, fw, _) = state.volume_fractions();
    let f_liq = fo + fw;
    let (rho_liq, mu_liq, water_share) = if f_liq > 0.0 {
        (
            (fo * state.rho_oil + fw * state.rho_water) / f_liq,
            (fo * state.mu_oil + fw * state.mu_water) / f_liq,
            fw / f_liq,
        )
    } else {
        (state.rho_water, state.mu_water, 1.0)
    };

    // Single phase: either no free gas or no liquid
    if vsg <= 1e-9 {
        let v = vm;
        return Ok(Gradient {
            dp_dmd: single_phase_gradient(rho_liq, mu_liq, v, conduit, cos_incl),
            holdup: 1.0,
            pattern: FlowPattern::SinglePhase,
        });
    }
    if vsl <= 1e-9 {
        return Ok(Gradient {
            dp_dmd: single_phase_gradient(state.rho_gas, state.mu_gas, vm, conduit, cos_incl),
            holdup: 0.0,
            pattern: FlowPattern::SinglePhase,
        });
    }

    let sigma =
        ((1.0 - water_share) * SIGMA_OIL_DYN + water_share * SIGMA_WATER_DYN) * DYN_CM_TO_LBF_FT;

    let lambda_l = vsl / vm;
    let rho_ns = rho_liq * lambda_l + state.rho_gas * (1.0 - lambda_l);
    let mu_ns = mu_liq * lambda_l + state.mu_gas * (1.0 - lambda_l);

    let blend = match correlation {
        MultiphaseCorrelation::Homogeneous => PatternBlend::pure(FlowPattern::SinglePhase),
        MultiphaseCorrelation::DriftFlux => pattern::classify(
            vsl,
            vsg,
            rho_liq,
            state.rho_gas,
            sigma,
            conduit.hydraulic_diameter,
        ),
    };

    let eval = |p: FlowPattern| -> (f64, f64) {
        let holdup = match p {
            // Homogeneous / annular core: no slip between phases
            FlowPattern::SinglePhase | FlowPattern::Annular => lambda_l,
            _ => {
                let alpha = pattern::void_fraction(
                    p,
                    vsl,
                    vsg,
                    rho_liq,
                    state.rho_gas,
                    sigma,
                    conduit.hydraulic_diameter,
                );
                // Slip can only hold liquid back, never less than no-slip
                (1.0 - alpha).max(lambda_l)
            }
        };
        let rho_slip = rho_liq * holdup + state.rho_gas * (1.0 - holdup);
        let d = conduit.hydraulic_diameter;
        let re = reynolds(rho_ns, vm, d, mu_ns);
        let f = friction_factor(re, conduit.roughness / d);
        let fric = f * rho_ns * vm * vm / (2.0 * GC * d) / SQIN_PER_SQFT;
        let grav = rho_slip * cos_incl / SQIN_PER_SQFT;
        (grav + fric, holdup)
    };

    let (g1, h1) = eval(blend.primary);
    let (dp_dmd, holdup) = match blend.secondary {
        Some(second) if blend.weight > 0.0 => {
            let (g2, h2) = eval(second);
            let w = blend.weight;
            ((1.0 - w) * g1 + w * g2, (1.0 - w) * h1 + w * h2)
        }
        _ => (g1, h1),
    };

    Ok(Gradient {
        dp_dmd,
        holdup,
        pattern: blend.primary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Conduit;
    use jl_core::units::inch;
    use jl_pvt::{FluidRatios, PvtConfig, ReservoirFluid};

    fn tubing() -> Conduit {
        Conduit::tubing(inch(2.441), inch(0.0018)).unwrap()
    }

    fn gassy_fluid() -> ReservoirFluid {
        let ratios = FluidRatios::new(0.5, 600.0, 35.0, 0.65, 2.0).unwrap();
        ReservoirFluid::new(ratios, PvtConfig::default())
    }

    fn dead_oil() -> ReservoirFluid {
        let ratios = FluidRatios::new(0.0, 0.0, 35.0, 0.65, 0.0).unwrap();
        ReservoirFluid::new(ratios, PvtConfig::default())
    }

    #[test]
    fn zero_rate_is_static_column() {
        let state = gassy_fluid().properties_raw(1_000.0, 150.0).unwrap();
        let g = gradient(
            MultiphaseCorrelation::DriftFlux,
            GradientInput {
                state: &state,
                qo_std: 0.0,
                conduit: tubing(),
                cos_incl: 1.0,
            },
        )
        .unwrap();
        let expected = state.rho_mix() / 144.0;
        assert!((g.dp_dmd - expected).abs() < 1e-12);
        assert_eq!(g.pattern, FlowPattern::SinglePhase);
    }

    #[test]
    fn single_phase_matches_darcy_weisbach_closed_form() {
        // Dead oil, no water, no gas: the engine must reduce to the
        // closed-form single-phase gradient within 1%.
        let state = dead_oil().properties_raw(2_000.0, 150.0).unwrap();
        let c = tubing();
        let qo = 800.0; // stb/d
        let g = gradient(
            MultiphaseCorrelation::DriftFlux,
            GradientInput {
                state: &state,
                qo_std: qo,
                conduit: c,
                cos_incl: 1.0,
            },
        )
        .unwrap();

        let v = state.insitu_rates(qo).total() / c.area;
        let expected = single_phase_gradient(state.rho_oil, state.mu_oil, v, c, 1.0);
        assert!(
            (g.dp_dmd - expected).abs() / expected < 0.01,
            "engine {} vs closed form {}",
            g.dp_dmd,
            expected
        );
        assert_eq!(g.holdup, 1.0);
    }

    #[test]
    fn gradient_is_continuous_in_rate() {
        // The solver needs a continuous residual; sweep the rate across
        // pattern transitions and bound the jump between adjacent points.
        let state = gassy_fluid().properties_raw(600.0, 150.0).unwrap();
        let c = tubing();
        let mut prev: Option<f64> = None;
        let mut q = 10.0;
        while q < 3_000.0 {
            let g = gradient(
                MultiphaseCorrelation::DriftFlux,
                GradientInput {
                    state: &state,
                    qo_std: q,
                    conduit: c,
                    cos_incl: 1.0,
                },
            )
            .unwrap();
            if let Some(p) = prev {
                let jump = (g.dp_dmd - p).abs() / p.max(1e-9);
                assert!(jump < 0.08, "gradient jumped {jump:.3} at q = {q}");
            }
            prev = Some(g.dp_dmd);
            q *= 1.015;
        }
    }

    #[test]
    fn holdup_never_below_no_slip() {
        let state = gassy_fluid().properties_raw(400.0, 150.0).unwrap();
        let c = tubing();
        for q in [50.0, 200.0, 800.0] {
            let rates = state.insitu_rates(q);
            let lambda_l = rates.liquid() / rates.total();
            let g = gradient(
                MultiphaseCorrelation::DriftFlux,
                GradientInput {
                    state: &state,
                    qo_std: q,
                    conduit: c,
                    cos_incl: 1.0,
                },
            )
            .unwrap();
            assert!(g.holdup >= lambda_l - 1e-9);
        }
    }

    #[test]
    fn homogeneous_uses_no_slip_holdup() {
        let state = gassy_fluid().properties_raw(600.0, 150.0).unwrap();
        let c = tubing();
        let rates = state.insitu_rates(500.0);
        let lambda_l = rates.liquid() / rates.total();
        let g = gradient(
            MultiphaseCorrelation::Homogeneous,
            GradientInput {
                state: &state,
                qo_std: 500.0,
                conduit: c,
                cos_incl: 1.0,
            },
        )
        .unwrap();
        assert!((g.holdup - lambda_l).abs() < 1e-9);
    }

    #[test]
    fn slip_raises_the_gravity_term() {
        // Drift-flux holdup is above no-slip, so its gradient carries a
        // heavier column than the homogeneous model at the same inputs.
        let state = gassy_fluid().properties_raw(600.0, 150.0).unwrap();
        let c = tubing();
        let input = GradientInput {
            state: &state,
            qo_std: 400.0,
            conduit: c,
            cos_incl: 1.0,
        };
        let slip = gradient(MultiphaseCorrelation::DriftFlux, input).unwrap();
        let ns = gradient(MultiphaseCorrelation::Homogeneous, input).unwrap();
        assert!(slip.dp_dmd >= ns.dp_dmd - 1e-12);
    }

    #[test]
    fn rejects_negative_rate() {
        let state = gassy_fluid().properties_raw(600.0, 150.0).unwrap();
        let r = gradient(
            MultiphaseCorrelation::DriftFlux,
            GradientInput {
                state: &state,
                qo_std: -1.0,
                conduit: tubing(),
                cos_incl: 1.0,
            },
        );
        assert!(r.is_err());
    }
}
