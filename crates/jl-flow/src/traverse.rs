//! Pressure traverse: march the gradient engine along a well path.
//!
//! The path is discretized into segments no longer than the configured
//! step. Each segment is integrated with a midpoint predictor-corrector:
//! evaluate the gradient at the known end, predict the far pressure,
//! re-evaluate at the segment-average pressure and temperature, correct.

use crate::error::{FlowError, FlowResult};
use crate::geometry::{Conduit, WellPath};
use crate::gradient::{gradient, GradientInput, MultiphaseCorrelation};
use jl_pvt::ReservoirFluid;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Traverse discretization settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraverseConfig {
    /// Maximum segment length, ft
    pub step: f64,
    /// Lowest pressure the march may reach, psia
    pub pressure_floor: f64,
}

impl Default for TraverseConfig {
    fn default() -> Self {
        Self {
            step: 100.0,
            pressure_floor: 14.7,
        }
    }
}

/// One integration point of a completed traverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraversePoint {
    /// Measured depth, ft
    pub md: f64,
    /// Pressure, psia
    pub pressure: f64,
    /// Liquid holdup of the segment ending here
    pub holdup: f64,
}

/// A completed pressure traverse between two measured depths.
#[derive(Debug, Clone, PartialEq)]
pub struct Traverse {
    pub points: Vec<TraversePoint>,
    /// Pressure at the far end, psia
    pub end_pressure: f64,
}

/// March from `start_md` (where the pressure is known) to `end_md`.
///
/// Marching toward greater depth adds the gradient; marching toward
/// surface subtracts it. Fails with [`FlowError::PressureFloor`] when the
/// predicted pressure drops to the floor; the caller decides whether that
/// is retryable.
#[allow(clippy::too_many_arguments)]
pub fn traverse(
    fluid: &ReservoirFluid,
    correlation: MultiphaseCorrelation,
    qo_std: f64,
    path: &WellPath,
    conduit: Conduit,
    start_md: f64,
    end_md: f64,
    known_pressure: f64,
    config: TraverseConfig,
) -> FlowResult<Traverse> {
    if qo_std < 0.0 {
        return Err(FlowError::InvalidArg {
            what: "oil rate must be non-negative",
        });
    }
    if known_pressure <= 0.0 || !known_pressure.is_finite() {
        return Err(FlowError::InvalidArg {
            what: "known pressure must be positive and finite",
        });
    }
    if config.step <= 0.0 {
        return Err(FlowError::InvalidArg {
            what: "traverse step must be positive",
        });
    }
    let span = end_md - start_md;
    if span == 0.0 {
        return Ok(Traverse {
            points: vec![TraversePoint {
                md: start_md,
                pressure: known_pressure,
                holdup: 1.0,
            }],
            end_pressure: known_pressure,
        });
    }

    // Marching down (+1) gains hydrostatic pressure, up (-1) loses it
    let sign = span.signum();
    let n_segments = (span.abs() / config.step).ceil() as usize;
    let h = span.abs() / n_segments as f64;

    let mut p = known_pressure;
    let mut md = start_md;
    let mut points = Vec::with_capacity(n_segments + 1);
    points.push(TraversePoint {
        md,
        pressure: p,
        holdup: 1.0,
    });

    for _ in 0..n_segments {
        let md_next = md + sign * h;
        let t_mid = path.temperature_at(0.5 * (md + md_next));
        let cos_incl = path.inclination_cos(md, md_next);

        // Predictor at the known end
        let state = fluid.properties_raw(p, t_mid)?;
        let g1 = gradient(
            correlation,
            GradientInput {
                state: &state,
                qo_std,
                conduit,
                cos_incl,
            },
        )?;
        let p_pred = p + sign * g1.dp_dmd * h;
        if p_pred <= config.pressure_floor {
            return Err(FlowError::PressureFloor {
                md: md_next,
                pressure: p_pred,
            });
        }

        // Corrector at the segment-average pressure
        let state_mid = fluid.properties_raw(0.5 * (p + p_pred), t_mid)?;
        let g2 = gradient(
            correlation,
            GradientInput {
                state: &state_mid,
                qo_std,
                conduit,
                cos_incl,
            },
        )?;
        let p_next = p + sign * g2.dp_dmd * h;
        if p_next <= config.pressure_floor {
            return Err(FlowError::PressureFloor {
                md: md_next,
                pressure: p_next,
            });
        }

        p = p_next;
        md = md_next;
        points.push(TraversePoint {
            md,
            pressure: p,
            holdup: g2.holdup,
        });
    }

    debug!(
        start_md,
        end_md,
        known_pressure,
        end_pressure = p,
        segments = n_segments,
        "traverse complete"
    );

    Ok(Traverse {
        points,
        end_pressure: p,
    })
}
