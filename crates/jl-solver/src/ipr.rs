//! Inflow performance: reservoir deliverability versus bottom-hole
//! flowing pressure.
//!
//! All variants are monotonically non-increasing in pressure by
//! construction; the operating-point solver relies on that for
//! bracketing. Rates in stb/d of oil, pressures in psia.

use crate::error::SolveFailure;
use serde::{Deserialize, Serialize};

/// Inflow performance relation, selectable per reservoir.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum IprModel {
    /// Straight-line productivity index: q = j (pres - pwf)
    ProductivityIndex { pres: f64, j: f64 },
    /// Vogel's quadratic for solution-gas drive below bubble point
    Vogel { pres: f64, qmax: f64 },
    /// PI above the bubble point, Vogel curvature below it
    Composite { pres: f64, pb: f64, j: f64 },
}

impl IprModel {
    pub fn validate(&self) -> Result<(), SolveFailure> {
        let ok = match *self {
            IprModel::ProductivityIndex { pres, j } => pres > 0.0 && j > 0.0,
            IprModel::Vogel { pres, qmax } => pres > 0.0 && qmax > 0.0,
            IprModel::Composite { pres, pb, j } => pres > 0.0 && j > 0.0 && (0.0..=pres).contains(&pb),
        };
        if ok {
            Ok(())
        } else {
            Err(SolveFailure::InputValidation {
                what: "inflow model parameters must be positive and ordered",
            })
        }
    }

    /// Static reservoir pressure, psia.
    pub fn reservoir_pressure(&self) -> f64 {
        match *self {
            IprModel::ProductivityIndex { pres, .. }
            | IprModel::Vogel { pres, .. }
            | IprModel::Composite { pres, .. } => pres,
        }
    }

    /// Produced oil rate at a bottom-hole flowing pressure, stb/d.
    pub fn rate(&self, pwf: f64) -> f64 {
        let pwf = pwf.max(0.0);
        match *self {
            IprModel::ProductivityIndex { pres, j } => (j * (pres - pwf)).max(0.0),
            IprModel::Vogel { pres, qmax } => {
                if pwf >= pres {
                    return 0.0;
                }
                let r = pwf / pres;
                (qmax * (1.0 - 0.2 * r - 0.8 * r * r)).max(0.0)
            }
            IprModel::Composite { pres, pb, j } => {
                if pwf >= pres {
                    return 0.0;
                }
                if pwf >= pb {
                    j * (pres - pwf)
                } else {
                    let qb = j * (pres - pb);
                    let qv_max = j * pb / 1.8;
                    let r = pwf / pb.max(1e-9);
                    qb + qv_max * (1.0 - 0.2 * r - 0.8 * r * r)
                }
            }
        }
    }

    /// Inverse relation: bottom-hole pressure delivering a rate, psia.
    ///
    /// Rates beyond the model's maximum clamp to zero pressure.
    pub fn pressure(&self, rate: f64) -> f64 {
        let rate = rate.max(0.0);
        match *self {
            IprModel::ProductivityIndex { pres, j } => (pres - rate / j).max(0.0),
            IprModel::Vogel { pres, qmax } => {
                if rate >= qmax {
                    return 0.0;
                }
                // Root of 0.8 r^2 + 0.2 r - (1 - q/qmax) = 0
                let r = 0.125 * ((81.0 - 80.0 * rate / qmax).sqrt() - 1.0);
                (pres * r).clamp(0.0, pres)
            }
            IprModel::Composite { pres, pb, j } => {
                let qb = j * (pres - pb);
                if rate <= qb {
                    return pres - rate / j;
                }
                let qv_max = j * pb / 1.8;
                let qv = rate - qb;
                if qv >= qv_max {
                    return 0.0;
                }
                let r = 0.125 * ((81.0 - 80.0 * qv / qv_max).sqrt() - 1.0);
                (pb * r).clamp(0.0, pb)
            }
        }
    }
}
