//! Flow pattern classification for upward multiphase flow.
//!
//! Patterns are a tagged variant with a dedicated gradient formula each;
//! classification happens on drift-flux void fraction thresholds plus a
//! Kutateladze criterion for the annular transition. Every boundary is
//! crossed through a finite blending band so the gradient seen by the
//! outer solver stays continuous.

use jl_core::units::constants::GC;
use serde::{Deserialize, Serialize};

/// Gravity, ft/s2.
const G: f64 = 32.174;

/// Void fraction at the bubble-to-slug transition.
const BUBBLE_SLUG_VOID: f64 = 0.25;

/// Void fraction at the slug-to-churn transition.
const SLUG_CHURN_VOID: f64 = 0.52;

/// Relative half-width of each blending band.
const BLEND_BAND: f64 = 0.2;

/// Flow pattern of a pipe segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowPattern {
    /// No free gas (or no liquid): ordinary single-phase friction
    SinglePhase,
    /// Dispersed gas bubbles in a continuous liquid
    Bubble,
    /// Taylor bubbles separated by liquid slugs
    Slug,
    /// Chaotic oscillatory flow past slug breakdown
    Churn,
    /// Gas core with a liquid film and entrained droplets
    Annular,
}

/// A classification result: the dominant pattern plus, inside a blending
/// band, the neighbouring pattern and its weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternBlend {
    pub primary: FlowPattern,
    pub secondary: Option<FlowPattern>,
    /// Weight of the secondary pattern, in [0, 1)
    pub weight: f64,
}

impl PatternBlend {
    pub fn pure(pattern: FlowPattern) -> Self {
        Self {
            primary: pattern,
            secondary: None,
            weight: 0.0,
        }
    }
}

/// Drift-flux profile coefficient and drift velocity (ft/s) per pattern.
pub fn drift_flux_params(
    pattern: FlowPattern,
    rho_liq: f64,
    rho_gas: f64,
    sigma: f64,
    diameter: f64,
) -> (f64, f64) {
    let drho = (rho_liq - rho_gas).max(0.0);
    match pattern {
        FlowPattern::Bubble => {
            // Harmathy bubble-rise velocity
            let vd = 1.53 * (G * sigma * GC * drho / (rho_liq * rho_liq)).powf(0.25);
            (1.2, vd)
        }
        FlowPattern::Slug => {
            // Taylor bubble rise
            let vd = 0.35 * (G * diameter * drho / rho_liq).sqrt();
            (1.2, vd)
        }
        FlowPattern::Churn => {
            let vd = 0.35 * (G * diameter * drho / rho_liq).sqrt();
            (1.15, vd)
        }
        FlowPattern::Annular | FlowPattern::SinglePhase => (1.0, 0.0),
    }
}

/// Void fraction from the drift-flux relation for a given pattern.
pub fn void_fraction(
    pattern: FlowPattern,
    vsl: f64,
    vsg: f64,
    rho_liq: f64,
    rho_gas: f64,
    sigma: f64,
    diameter: f64,
) -> f64 {
    let vm = vsl + vsg;
    if vsg <= 0.0 {
        return 0.0;
    }
    let (c0, vd) = drift_flux_params(pattern, rho_liq, rho_gas, sigma, diameter);
    (vsg / (c0 * vm + vd)).clamp(0.0, 0.995)
}

/// Critical superficial gas velocity for the annular transition
/// (Kutateladze number of 3.1), ft/s.
pub fn annular_transition_vsg(rho_liq: f64, rho_gas: f64, sigma: f64) -> f64 {
    let drho = (rho_liq - rho_gas).max(0.0);
    3.1 * (G * sigma * GC * drho / (rho_gas * rho_gas)).powf(0.25)
}

/// Blend weight for crossing a boundary at `b`: 0 below the band, 1 above.
fn band_weight(x: f64, b: f64) -> f64 {
    if b <= 0.0 {
        return 1.0;
    }
    let lo = b * (1.0 - BLEND_BAND);
    let hi = b * (1.0 + BLEND_BAND);
    ((x - lo) / (hi - lo)).clamp(0.0, 1.0)
}

/// Classify the flow pattern from superficial velocities, with blending
/// weights inside each transition band.
pub fn classify(
    vsl: f64,
    vsg: f64,
    rho_liq: f64,
    rho_gas: f64,
    sigma: f64,
    diameter: f64,
) -> PatternBlend {
    if vsg <= 1e-9 || vsl <= 1e-9 {
        return PatternBlend::pure(FlowPattern::SinglePhase);
    }

    // Base pattern from drift-flux void thresholds
    let alpha_b = void_fraction(FlowPattern::Bubble, vsl, vsg, rho_liq, rho_gas, sigma, diameter);
    let alpha_s = void_fraction(FlowPattern::Slug, vsl, vsg, rho_liq, rho_gas, sigma, diameter);

    let w_bs = band_weight(alpha_b, BUBBLE_SLUG_VOID);
    let w_sc = band_weight(alpha_s, SLUG_CHURN_VOID);

    let base = if w_bs < 1.0 {
        PatternBlend {
            primary: FlowPattern::Bubble,
            secondary: (w_bs > 0.0).then_some(FlowPattern::Slug),
            weight: w_bs,
        }
    } else if w_sc < 1.0 {
        PatternBlend {
            primary: FlowPattern::Slug,
            secondary: (w_sc > 0.0).then_some(FlowPattern::Churn),
            weight: w_sc,
        }
    } else {
        PatternBlend::pure(FlowPattern::Churn)
    };

    // Annular transition overrides on high gas rates
    let w_ann = band_weight(vsg, annular_transition_vsg(rho_liq, rho_gas, sigma));
    if w_ann >= 1.0 {
        PatternBlend::pure(FlowPattern::Annular)
    } else if w_ann > 0.0 {
        PatternBlend {
            primary: base.primary,
            secondary: Some(FlowPattern::Annular),
            weight: w_ann,
        }
    } else {
        base
    }
}
