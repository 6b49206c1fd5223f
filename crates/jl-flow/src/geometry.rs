//! Flow conduits and the well path.
//!
//! Geometry is owned by the caller and read-only to the core. Internal
//! fields are plain f64 in ft / ft2; constructors accept uom quantities.

use crate::error::{FlowError, FlowResult};
use jl_core::units::{to_ft, Length};
use std::f64::consts::PI;

/// A flow cross-section: circular tubing or a casing/tubing annulus.
///
/// Stored as the derived flow area and hydraulic diameter, which is all
/// the gradient engine needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conduit {
    /// Flow area, ft2
    pub area: f64,
    /// Hydraulic diameter, ft
    pub hydraulic_diameter: f64,
    /// Absolute roughness, ft
    pub roughness: f64,
}

impl Conduit {
    /// Circular tubing of the given inner diameter.
    pub fn tubing(inner_diameter: Length, roughness: Length) -> FlowResult<Self> {
        let d = to_ft(inner_diameter);
        let e = to_ft(roughness);
        if d <= 0.0 || !d.is_finite() {
            return Err(FlowError::InvalidArg {
                what: "tubing inner diameter must be positive",
            });
        }
        if e < 0.0 || e >= d {
            return Err(FlowError::InvalidArg {
                what: "roughness must be non-negative and below the diameter",
            });
        }
        Ok(Self {
            area: PI * d * d / 4.0,
            hydraulic_diameter: d,
            roughness: e,
        })
    }

    /// Annulus between a casing inner diameter and a tubing outer diameter.
    pub fn annulus(
        casing_inner: Length,
        tubing_outer: Length,
        roughness: Length,
    ) -> FlowResult<Self> {
        let dc = to_ft(casing_inner);
        let dt = to_ft(tubing_outer);
        let e = to_ft(roughness);
        if dc <= 0.0 || dt < 0.0 || dc <= dt {
            return Err(FlowError::InvalidArg {
                what: "annulus requires casing inner diameter above tubing outer",
            });
        }
        if e < 0.0 {
            return Err(FlowError::InvalidArg {
                what: "roughness must be non-negative",
            });
        }
        Ok(Self {
            area: PI * (dc * dc - dt * dt) / 4.0,
            // Hydraulic diameter of an annulus reduces to the gap
            hydraulic_diameter: dc - dt,
            roughness: e,
        })
    }
}

/// One surveyed station of the well path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStation {
    /// Measured depth, ft
    pub md: f64,
    /// True vertical depth, ft
    pub tvd: f64,
}

/// Deviated well path from surface to perforations, with the pump
/// setting depth and the linear temperature profile endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct WellPath {
    stations: Vec<PathStation>,
    /// Pump setting depth, ft md
    pub pump_md: f64,
    /// Perforation depth, ft md
    pub perf_md: f64,
    /// Surface temperature, deg F
    pub surface_temp: f64,
    /// Bottom-hole temperature, deg F
    pub bottom_temp: f64,
}

impl WellPath {
    pub fn new(
        stations: Vec<PathStation>,
        pump_md: f64,
        perf_md: f64,
        surface_temp: f64,
        bottom_temp: f64,
    ) -> FlowResult<Self> {
        if stations.len() < 2 {
            return Err(FlowError::InvalidArg {
                what: "well path needs at least two stations",
            });
        }
        for pair in stations.windows(2) {
            if pair[1].md <= pair[0].md {
                return Err(FlowError::InvalidArg {
                    what: "station measured depths must increase",
                });
            }
            if pair[1].tvd < pair[0].tvd {
                return Err(FlowError::InvalidArg {
                    what: "station vertical depths must not decrease",
                });
            }
            if pair[1].tvd - pair[0].tvd > pair[1].md - pair[0].md + 1e-9 {
                return Err(FlowError::InvalidArg {
                    what: "vertical depth cannot outrun measured depth",
                });
            }
        }
        let end = stations[stations.len() - 1].md;
        if !(0.0..=end).contains(&pump_md) || !(pump_md..=end).contains(&perf_md) {
            return Err(FlowError::InvalidArg {
                what: "need 0 <= pump depth <= perforation depth <= path end",
            });
        }
        Ok(Self {
            stations,
            pump_md,
            perf_md,
            surface_temp,
            bottom_temp,
        })
    }

    /// A straight vertical well, the common test configuration.
    pub fn vertical(depth: Length, pump_md: f64, perf_md: f64, st: f64, bt: f64) -> FlowResult<Self> {
        let d = to_ft(depth);
        Self::new(
            vec![
                PathStation { md: 0.0, tvd: 0.0 },
                PathStation { md: d, tvd: d },
            ],
            pump_md,
            perf_md,
            st,
            bt,
        )
    }

    pub fn end_md(&self) -> f64 {
        self.stations[self.stations.len() - 1].md
    }

    /// True vertical depth at a measured depth, linear between stations.
    pub fn tvd_at(&self, md: f64) -> f64 {
        let s = &self.stations;
        if md <= s[0].md {
            return s[0].tvd;
        }
        for pair in s.windows(2) {
            if md <= pair[1].md {
                return jl_core::lerp(md, pair[0].md, pair[0].tvd, pair[1].md, pair[1].tvd);
            }
        }
        s[s.len() - 1].tvd
    }

    /// Pump setting depth, ft tvd.
    pub fn pump_tvd(&self) -> f64 {
        self.tvd_at(self.pump_md)
    }

    /// Cosine of the local inclination from vertical over [md1, md2].
    pub fn inclination_cos(&self, md1: f64, md2: f64) -> f64 {
        let dmd = (md2 - md1).abs();
        if dmd <= 0.0 {
            return 1.0;
        }
        let dtvd = (self.tvd_at(md2) - self.tvd_at(md1)).abs();
        (dtvd / dmd).clamp(0.0, 1.0)
    }

    /// Temperature at a measured depth from the linear gradient profile.
    pub fn temperature_at(&self, md: f64) -> f64 {
        let end = self.end_md();
        jl_core::lerp(md.clamp(0.0, end), 0.0, self.surface_temp, end, self.bottom_temp)
    }
}
