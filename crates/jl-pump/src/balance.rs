//! Full nozzle-throat-diffuser balance for one candidate suction pressure.

use crate::diffuser::{diffuser_discharge, DiffuserOut};
use crate::entry::{throat_entry, ThroatEntry};
use crate::error::{InfeasibleReason, PumpError, PumpResult};
use crate::geometry::JetPumpGeometry;
use crate::nozzle::{nozzle_rate, nozzle_velocity};
use crate::throat::{throat_discharge, ThroatMix, ThroatStreams};
use jl_pvt::{FluidRatios, ReservoirFluid};
use tracing::debug;

/// Power fluid supply boundary condition.
///
/// The nozzle is pressure-driven: the achieved rate follows from the
/// momentum balance and `rate` acts as the supply capacity ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerFluid {
    /// Surface injection pressure, psia
    pub surface_pressure: f64,
    /// Available supply rate, bbl/d
    pub rate: f64,
    /// Power fluid density, lbm/ft3 (typically water)
    pub density: f64,
}

impl PowerFluid {
    pub fn new(surface_pressure: f64, rate: f64, density: f64) -> PumpResult<Self> {
        if !surface_pressure.is_finite() || surface_pressure <= 0.0 {
            return Err(PumpError::InvalidArg {
                what: "power fluid surface pressure must be positive",
            });
        }
        if !rate.is_finite() || rate < 0.0 {
            return Err(PumpError::InvalidArg {
                what: "power fluid rate must be non-negative",
            });
        }
        if !density.is_finite() || density <= 0.0 {
            return Err(PumpError::InvalidArg {
                what: "power fluid density must be positive",
            });
        }
        Ok(Self {
            surface_pressure,
            rate,
            density,
        })
    }
}

/// Everything the balance determines at one suction pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PumpSolution {
    /// Throat entry conditions of the produced stream
    pub entry: ThroatEntry,
    /// Nozzle exit velocity, ft/s
    pub vnz: f64,
    /// Achieved power fluid rate through the nozzle, bbl/d
    pub qnz_bpd: f64,
    /// Throat mixing result
    pub mix: ThroatMix,
    /// Diffuser recovery result
    pub diffuser: DiffuserOut,
    /// Ratios of the mixed discharge stream
    pub mixed_ratios: FluidRatios,
    /// Nozzle inlet pressure used, psia
    pub pni: f64,
}

impl PumpSolution {
    /// Pump discharge pressure, psia.
    pub fn discharge_pressure(&self) -> f64 {
        self.diffuser.pdi
    }

    /// Dimensionless throat momentum imbalance at the solution.
    pub fn momentum_residual(&self) -> f64 {
        self.mix.momentum_residual
    }
}

/// Apply the momentum and energy balance across the pump.
///
/// `fluid`/`qo_std` describe the produced stream arriving at suction
/// pressure `psu` and temperature `tsu`; `pni` is the nozzle inlet
/// pressure (surface pressure plus power fluid column); `discharge_area`
/// is the tubing area above the pump; `entry_step` the pressure step of
/// the entry energy march.
#[allow(clippy::too_many_arguments)]
pub fn pump_balance(
    fluid: &ReservoirFluid,
    psu: f64,
    tsu: f64,
    qo_std: f64,
    pni: f64,
    power: &PowerFluid,
    geom: &JetPumpGeometry,
    discharge_area: f64,
    entry_step: f64,
) -> PumpResult<PumpSolution> {
    if power.rate <= 0.0 {
        return Err(PumpError::Infeasible {
            reason: InfeasibleReason::NoLiftEnergy,
        });
    }

    // 1. Produced stream into the throat entry
    let entry = throat_entry(fluid, psu, tsu, qo_std, geom.losses.ken, geom.entry_area(), entry_step)?;

    // 2. Power fluid through the nozzle against the entry pressure
    let vnz = nozzle_velocity(pni, entry.pte, geom.losses.knz, power.density)?;
    let (_, qnz_bpd) = nozzle_rate(vnz, geom.nozzle_area);
    if qnz_bpd > power.rate {
        return Err(PumpError::Infeasible {
            reason: InfeasibleReason::PowerFluidStarved,
        });
    }

    // 3. Momentum balance in the mixing tube, on the blended stream
    let mixed_ratios = fluid.ratios.with_added_water(qo_std, qnz_bpd)?;
    let mixed = ReservoirFluid::new(mixed_ratios, fluid.config);
    let streams = ThroatStreams {
        vnz,
        rho_nz: power.density,
        vte: entry.vte,
        rho_te: entry.rho_te,
    };
    let mix = throat_discharge(&mixed, qo_std, entry.pte, tsu, streams, geom)?;

    // 4. Pressure recovery in the diffuser
    let diffuser = diffuser_discharge(
        &mixed,
        qo_std,
        mix.ptm,
        tsu,
        geom.losses.kdi,
        geom.throat_area,
        discharge_area,
    )?;

    debug!(
        psu,
        pte = entry.pte,
        ptm = mix.ptm,
        pdi = diffuser.pdi,
        qnz_bpd,
        "pump balance complete"
    );

    Ok(PumpSolution {
        entry,
        vnz,
        qnz_bpd,
        mix,
        diffuser,
        mixed_ratios,
        pni,
    })
}
