//! Reservoir fluid description and the immutable property snapshot.

use crate::config::PvtConfig;
use crate::error::{OutOfRangeWarning, PvtError, PvtResult};
use crate::{gas, oil, water};
use jl_core::units::constants::{F_TO_R, FT3_PER_BBL, GC, SQIN_PER_SQFT};
use jl_core::units::{to_degf, to_psi, Pressure, Temperature};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Stated validity window for the black-oil correlation sets.
/// Inputs outside are clamped (flat extrapolation) with a warning.
const T_RANGE: (f64, f64) = (60.0, 300.0);
const P_RANGE: (f64, f64) = (14.7, 10_000.0);

/// Surface ratios that define a produced reservoir fluid.
///
/// Immutable value object; validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluidRatios {
    /// Water cut, fraction of liquid that is water at stock-tank conditions
    pub water_cut: f64,
    /// Producing gas-oil ratio, scf/stb
    pub gor: f64,
    /// Stock-tank oil gravity, deg API
    pub oil_api: f64,
    /// Gas specific gravity (air = 1)
    pub gas_sg: f64,
    /// Water salinity, weight percent NaCl
    pub salinity: f64,
}

impl FluidRatios {
    pub fn new(
        water_cut: f64,
        gor: f64,
        oil_api: f64,
        gas_sg: f64,
        salinity: f64,
    ) -> PvtResult<Self> {
        if !(0.0..=0.99).contains(&water_cut) {
            return Err(PvtError::InvalidArg {
                what: "water cut must be in [0, 0.99]",
            });
        }
        if gor < 0.0 || !gor.is_finite() {
            return Err(PvtError::InvalidArg {
                what: "GOR must be non-negative",
            });
        }
        if !(5.0..=70.0).contains(&oil_api) {
            return Err(PvtError::InvalidArg {
                what: "oil gravity must be in [5, 70] deg API",
            });
        }
        if !(0.55..=1.8).contains(&gas_sg) {
            return Err(PvtError::InvalidArg {
                what: "gas specific gravity must be in [0.55, 1.8]",
            });
        }
        if !(0.0..=30.0).contains(&salinity) {
            return Err(PvtError::InvalidArg {
                what: "salinity must be in [0, 30] weight percent",
            });
        }
        Ok(Self {
            water_cut,
            gor,
            oil_api,
            gas_sg,
            salinity,
        })
    }

    /// Water rate, stb/d, accompanying a stock-tank oil rate.
    pub fn water_rate(&self, qo_std: f64) -> f64 {
        qo_std * self.water_cut / (1.0 - self.water_cut)
    }

    /// Ratios after blending in extra surface water (the power fluid
    /// joining the produced stream in the pump throat). Oil and gas
    /// totals are unchanged, so the GOR per stock-tank barrel of oil
    /// carries over; only the water cut moves.
    pub fn with_added_water(&self, qo_std: f64, q_added_water: f64) -> PvtResult<Self> {
        if q_added_water < 0.0 {
            return Err(PvtError::InvalidArg {
                what: "added water rate must be non-negative",
            });
        }
        if qo_std <= 0.0 {
            // No oil basis: stream stays effectively all water
            return Self::new(0.99, self.gor, self.oil_api, self.gas_sg, self.salinity);
        }
        let qw_total = self.water_rate(qo_std) + q_added_water;
        let wc = (qw_total / (qw_total + qo_std)).min(0.99);
        Self::new(wc, self.gor, self.oil_api, self.gas_sg, self.salinity)
    }
}

/// In-situ volumetric flow rates for one stock-tank oil rate, ft3/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsituRates {
    pub oil: f64,
    pub water: f64,
    pub gas: f64,
}

impl InsituRates {
    pub fn total(&self) -> f64 {
        self.oil + self.water + self.gas
    }

    pub fn liquid(&self) -> f64 {
        self.oil + self.water
    }
}

/// Immutable snapshot of fluid properties at one (pressure, temperature).
///
/// Produced on demand by [`ReservoirFluid::properties`]; never mutated.
/// A new snapshot is computed whenever pressure or temperature changes.
#[derive(Debug, Clone, PartialEq)]
pub struct FluidState {
    /// Evaluation pressure, psia
    pub pressure: f64,
    /// Evaluation temperature, deg F
    pub temperature: f64,
    /// Bubble-point pressure, psia
    pub bubble_point: f64,
    /// Solution GOR at this pressure, scf/stb
    pub rs: f64,
    /// Free (undissolved) gas, scf/stb
    pub free_gor: f64,
    /// Oil formation volume factor, rb/stb
    pub bo: f64,
    /// Gas formation volume factor, ft3/scf
    pub bg: f64,
    /// Water formation volume factor, rb/stb
    pub bw: f64,
    /// Phase densities, lbm/ft3
    pub rho_oil: f64,
    pub rho_water: f64,
    pub rho_gas: f64,
    /// Phase viscosities, cP
    pub mu_oil: f64,
    pub mu_water: f64,
    pub mu_gas: f64,
    /// Surface ratios this snapshot was computed from
    pub ratios: FluidRatios,
    /// Out-of-range extrapolation records (non-fatal)
    pub warnings: Vec<OutOfRangeWarning>,
}

impl FluidState {
    /// In-situ volumetric rates for a stock-tank oil rate, ft3/s.
    pub fn insitu_rates(&self, qo_std: f64) -> InsituRates {
        let day = 86_400.0;
        let oil = qo_std * self.bo * FT3_PER_BBL / day;
        let water = self.ratios.water_rate(qo_std) * self.bw * FT3_PER_BBL / day;
        let gas = qo_std * self.free_gor * self.bg / day;
        InsituRates { oil, water, gas }
    }

    /// In-situ volume fractions (oil, water, gas). Independent of the
    /// stock-tank rate because every phase scales with it.
    pub fn volume_fractions(&self) -> (f64, f64, f64) {
        let r = self.insitu_rates(1.0);
        let total = r.total();
        if total <= 0.0 {
            return (0.0, 1.0, 0.0);
        }
        (r.oil / total, r.water / total, r.gas / total)
    }

    /// No-slip in-situ gas fraction.
    pub fn gas_fraction(&self) -> f64 {
        self.volume_fractions().2
    }

    /// Volume-weighted no-slip mixture density, lbm/ft3.
    pub fn rho_mix(&self) -> f64 {
        let (fo, fw, fg) = self.volume_fractions();
        fo * self.rho_oil + fw * self.rho_water + fg * self.rho_gas
    }

    /// Volume-weighted mixture viscosity, cP.
    pub fn mu_mix(&self) -> f64 {
        let (fo, fw, fg) = self.volume_fractions();
        fo * self.mu_oil + fw * self.mu_water + fg * self.mu_gas
    }

    /// Mixture acoustic velocity, ft/s, from Wood's compressibility
    /// mixing rule. Gas compressibility dominates as soon as any free
    /// gas is present, which is what makes throat-entry flow go sonic.
    pub fn sonic_velocity(&self) -> f64 {
        let (fo, fw, fg) = self.volume_fractions();
        let beta = fo * 5.0e-6 + fw * water::WATER_COMPRESSIBILITY
            + fg * gas::gas_compressibility(self.pressure);
        let rho = self.rho_mix();
        (SQIN_PER_SQFT * GC / (rho * beta)).sqrt()
    }
}

/// A produced reservoir fluid: surface ratios plus the correlation
/// configuration. The sole factory for [`FluidState`] snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReservoirFluid {
    pub ratios: FluidRatios,
    pub config: PvtConfig,
}

impl ReservoirFluid {
    pub fn new(ratios: FluidRatios, config: PvtConfig) -> Self {
        Self { ratios, config }
    }

    /// Evaluate the black-oil property set at (p, t).
    ///
    /// Pure function of its inputs. Out-of-range inputs are clamped to
    /// the correlation window and recorded as warnings on the snapshot.
    pub fn properties(&self, p: Pressure, t: Temperature) -> PvtResult<FluidState> {
        self.properties_raw(to_psi(p), to_degf(t))
    }

    /// Same as [`Self::properties`] but in raw oilfield units
    /// (psia, deg F) for the inner integration loops.
    pub fn properties_raw(&self, p_psia: f64, t_degf: f64) -> PvtResult<FluidState> {
        if !p_psia.is_finite() || p_psia <= 0.0 {
            return Err(PvtError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        if !t_degf.is_finite() {
            return Err(PvtError::NonPhysical {
                what: "temperature must be finite",
            });
        }

        let mut warnings = Vec::new();
        let p = clamp_with_warning(p_psia, P_RANGE, "pressure", &mut warnings);
        let t = clamp_with_warning(t_degf, T_RANGE, "temperature", &mut warnings);

        let r = self.ratios;
        let set = self.config.correlation_set;

        let pb = oil::bubble_point(set, r.oil_api, r.gas_sg, r.gor, t);
        let rs = oil::solution_gor(set, r.oil_api, r.gas_sg, r.gor, p, t);
        let free_gor = (r.gor - rs).max(0.0);
        let bo = oil::oil_fvf(set, r.oil_api, r.gas_sg, rs, pb, p, t);

        let (tpc, ppc) = gas::pseudo_critical(r.gas_sg);
        let tpr = (t + F_TO_R) / tpc;
        let ppr = p / ppc;
        let z = gas::z_factor(ppr.min(8.0), tpr.clamp(1.05, 3.0));
        let bg = gas::gas_fvf(z, t, p);
        let rho_gas = gas::gas_density(r.gas_sg, p, t, z);

        let bw = water::water_fvf(p, t);
        let rho_water = water::water_density(r.salinity, p, t);

        let rho_oil = oil::oil_density(r.oil_api, r.gas_sg, rs, bo);
        let mu_oil = oil::live_oil_viscosity(oil::dead_oil_viscosity(r.oil_api, t), rs);
        let mu_water = water::water_viscosity(r.salinity, t);
        let mu_gas = gas::gas_viscosity(r.gas_sg, rho_gas, t);

        Ok(FluidState {
            pressure: p_psia,
            temperature: t_degf,
            bubble_point: pb,
            rs,
            free_gor,
            bo,
            bg,
            bw,
            rho_oil,
            rho_water,
            rho_gas,
            mu_oil,
            mu_water,
            mu_gas,
            ratios: r,
            warnings,
        })
    }
}

fn clamp_with_warning(
    value: f64,
    (min, max): (f64, f64),
    what: &'static str,
    warnings: &mut Vec<OutOfRangeWarning>,
) -> f64 {
    if value < min || value > max {
        let w = OutOfRangeWarning {
            what,
            value,
            min,
            max,
        };
        warn!("{w}");
        warnings.push(w);
        value.clamp(min, max)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jl_core::units::{degf, psi};

    fn test_fluid() -> ReservoirFluid {
        let ratios = FluidRatios::new(0.5, 400.0, 35.0, 0.65, 2.0).unwrap();
        ReservoirFluid::new(ratios, PvtConfig::default())
    }

    #[test]
    fn ratios_validation() {
        assert!(FluidRatios::new(1.5, 400.0, 35.0, 0.65, 2.0).is_err());
        assert!(FluidRatios::new(0.5, -1.0, 35.0, 0.65, 2.0).is_err());
        assert!(FluidRatios::new(0.5, 400.0, 2.0, 0.65, 2.0).is_err());
        assert!(FluidRatios::new(0.5, 400.0, 35.0, 0.3, 2.0).is_err());
    }

    #[test]
    fn snapshot_is_self_consistent() {
        let state = test_fluid().properties(psi(1_200.0), degf(180.0)).unwrap();
        assert_eq!(state.rs + state.free_gor, state.ratios.gor);
        assert!(state.bo > 1.0);
        assert!(state.rho_oil > 0.0 && state.rho_water > 0.0 && state.rho_gas > 0.0);
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn rejects_nonpositive_pressure() {
        assert!(test_fluid().properties_raw(-10.0, 180.0).is_err());
        assert!(test_fluid().properties_raw(0.0, 180.0).is_err());
    }

    #[test]
    fn out_of_range_temperature_warns_not_fails() {
        let state = test_fluid().properties_raw(1_200.0, 500.0).unwrap();
        assert_eq!(state.warnings.len(), 1);
        assert_eq!(state.warnings[0].what, "temperature");
        // Flat extrapolation: properties evaluated at the range edge
        let edge = test_fluid().properties_raw(1_200.0, 300.0).unwrap();
        assert_eq!(state.bo, edge.bo);
    }

    #[test]
    fn free_gas_vanishes_above_bubble_point() {
        let f = test_fluid();
        let deep = f.properties_raw(9_000.0, 180.0).unwrap();
        assert_eq!(deep.free_gor, 0.0);
        assert_eq!(deep.gas_fraction(), 0.0);
        let shallow = f.properties_raw(150.0, 180.0).unwrap();
        assert!(shallow.free_gor > 0.0);
        assert!(shallow.gas_fraction() > 0.3);
    }

    #[test]
    fn mixture_density_between_phase_extremes() {
        let state = test_fluid().properties_raw(2_000.0, 180.0).unwrap();
        let rho = state.rho_mix();
        assert!(rho > state.rho_gas && rho <= state.rho_water + 1.0, "rho = {rho}");
    }

    #[test]
    fn sonic_velocity_drops_with_free_gas() {
        let f = test_fluid();
        let liquid = f.properties_raw(9_000.0, 180.0).unwrap();
        let gassy = f.properties_raw(300.0, 180.0).unwrap();
        assert!(liquid.sonic_velocity() > 3_000.0);
        assert!(gassy.sonic_velocity() < liquid.sonic_velocity());
    }

    #[test]
    fn added_water_raises_water_cut_only() {
        let ratios = test_fluid().ratios;
        let mixed = ratios.with_added_water(200.0, 600.0).unwrap();
        assert!(mixed.water_cut > ratios.water_cut);
        assert_eq!(mixed.gor, ratios.gor);
        // qw = 200 (produced) + 600 (power fluid) = 800; wc = 800/1000
        assert!((mixed.water_cut - 0.8).abs() < 1e-9);
    }

    #[test]
    fn insitu_rates_scale_linearly() {
        let state = test_fluid().properties_raw(1_000.0, 180.0).unwrap();
        let r1 = state.insitu_rates(100.0);
        let r2 = state.insitu_rates(200.0);
        assert!((r2.total() / r1.total() - 2.0).abs() < 1e-9);
    }
}
