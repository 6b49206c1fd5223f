//! Jet pump geometry: nozzle, throat, and loss coefficients.

use crate::error::{PumpError, PumpResult};
use jl_core::units::{to_sq_ft, Area};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Friction loss coefficients for the four pump sections, dimensionless.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PumpLosses {
    /// Nozzle discharge loss
    pub knz: f64,
    /// Throat entry loss
    pub ken: f64,
    /// Throat mixing loss
    pub kth: f64,
    /// Diffuser loss (1 - diffuser efficiency)
    pub kdi: f64,
}

impl Default for PumpLosses {
    fn default() -> Self {
        Self {
            knz: 0.03,
            ken: 0.03,
            kth: 0.30,
            kdi: 0.10,
        }
    }
}

/// Fixed geometry of one jet pump. Owned by the caller, read-only here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JetPumpGeometry {
    /// Nozzle exit area, ft2
    pub nozzle_area: f64,
    /// Throat area, ft2
    pub throat_area: f64,
    /// Mixing-tube length for wall friction, ft (0 folds the wall loss
    /// into the lumped kth coefficient)
    pub throat_length: f64,
    pub losses: PumpLosses,
}

impl JetPumpGeometry {
    pub fn new(nozzle_area: Area, throat_area: Area, losses: PumpLosses) -> PumpResult<Self> {
        let anz = to_sq_ft(nozzle_area);
        let ath = to_sq_ft(throat_area);
        if !anz.is_finite() || anz <= 0.0 {
            return Err(PumpError::InvalidArg {
                what: "nozzle area must be positive",
            });
        }
        if !ath.is_finite() || ath <= anz {
            return Err(PumpError::InvalidArg {
                what: "throat area must exceed nozzle area",
            });
        }
        for k in [losses.knz, losses.ken, losses.kth, losses.kdi] {
            if !(0.0..1.0).contains(&k) {
                return Err(PumpError::InvalidArg {
                    what: "loss coefficients must be in [0, 1)",
                });
            }
        }
        Ok(Self {
            nozzle_area: anz,
            throat_area: ath,
            throat_length: 0.0,
            losses,
        })
    }

    pub fn with_throat_length(mut self, length_ft: f64) -> Self {
        self.throat_length = length_ft.max(0.0);
        self
    }

    /// Annular entry area around the nozzle jet, ft2.
    pub fn entry_area(&self) -> f64 {
        self.throat_area - self.nozzle_area
    }

    /// Throat diameter, ft.
    pub fn throat_diameter(&self) -> f64 {
        (4.0 * self.throat_area / PI).sqrt()
    }

    /// Nozzle-to-throat area ratio, the classic sizing parameter.
    pub fn area_ratio(&self) -> f64 {
        self.nozzle_area / self.throat_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jl_core::units::sq_inch;

    #[test]
    fn derived_areas() {
        let g = JetPumpGeometry::new(sq_inch(0.01), sq_inch(0.04), PumpLosses::default()).unwrap();
        assert!((g.area_ratio() - 0.25).abs() < 1e-12);
        assert!((g.entry_area() - g.throat_area * 0.75).abs() < 1e-15);
        assert!(g.throat_diameter() > 0.0);
    }

    #[test]
    fn rejects_throat_smaller_than_nozzle() {
        let r = JetPumpGeometry::new(sq_inch(0.05), sq_inch(0.04), PumpLosses::default());
        assert!(r.is_err());
    }

    #[test]
    fn rejects_negative_area() {
        let r = JetPumpGeometry::new(sq_inch(-0.01), sq_inch(0.04), PumpLosses::default());
        assert!(r.is_err());
    }
}
