//! The operating-point solver: one scalar unknown (suction pressure),
//! bracketed secant iteration with bisection fallback.
//!
//! The residual at a candidate suction pressure is the pump's delivered
//! discharge pressure minus the discharge pressure the outflow tubing
//! requires at the matched inflow rate. Physically the residual rises
//! with suction pressure (less load on the pump, lighter outflow), so a
//! sign change brackets the operating point; a residual that is positive
//! all the way down to the sonic entry limit means the well operates at
//! the choke limit instead.

use crate::error::SolveFailure;
use crate::ipr::IprModel;
use jl_flow::{traverse, Conduit, MultiphaseCorrelation, TraverseConfig, WellPath};
use jl_pump::{
    minimum_suction, nozzle_inlet_pressure, pump_balance, InfeasibleReason, JetPumpGeometry,
    PowerFluid, PumpError, PumpSolution,
};
use jl_pvt::{FluidRatios, PvtConfig, ReservoirFluid};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reservoir boundary condition: deliverability, temperature, fluid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReservoirSpec {
    pub ipr: IprModel,
    /// Suction / formation temperature, deg F
    pub temperature: f64,
    pub fluid: FluidRatios,
}

/// Wellbore description around the pump.
#[derive(Debug, Clone, PartialEq)]
pub struct WellSpec {
    pub path: WellPath,
    /// Discharge string above the pump
    pub discharge_tubing: Conduit,
    /// Conduit between perforations and pump suction
    pub suction_conduit: Conduit,
    /// Flowing wellhead pressure, psia
    pub wellhead_pressure: f64,
}

/// Everything configurable about a solve, serde-round-trippable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolveConfig {
    pub pvt: PvtConfig,
    pub multiphase: MultiphaseCorrelation,
    pub traverse: TraverseConfig,
    /// Pressure step of the throat entry energy march, psi
    pub entry_step: f64,
    /// Convergence tolerance on the discharge residual, psi
    pub tolerance: f64,
    /// Acceptable dimensionless throat momentum imbalance at convergence
    pub momentum_tolerance: f64,
    pub max_iterations: usize,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            pvt: PvtConfig::default(),
            multiphase: MultiphaseCorrelation::default(),
            traverse: TraverseConfig::default(),
            entry_step: 25.0,
            tolerance: 1.0,
            momentum_tolerance: 1e-2,
            max_iterations: 40,
        }
    }
}

/// The solved operating point. Built once per solve, immutable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    /// Pump suction pressure, psia
    pub suction_pressure: f64,
    /// Pump discharge pressure, psia
    pub discharge_pressure: f64,
    /// Discharge pressure the outflow string requires, psia
    pub required_discharge_pressure: f64,
    /// Power fluid rate through the nozzle, bbl/d
    pub power_fluid_rate: f64,
    /// Produced oil rate, stb/d
    pub oil_rate: f64,
    /// Bottom-hole flowing pressure at the perforations, psia
    pub bottomhole_pressure: f64,
    /// Discharge-to-suction pressure ratio
    pub pressure_ratio: f64,
    /// Dimensionless throat momentum imbalance
    pub momentum_residual: f64,
    /// Discharge residual at the answer, psi
    pub residual: f64,
    pub iterations: usize,
    /// True when the throat entry pins the well at its sonic limit
    pub choked: bool,
}

struct Evaluation {
    residual: f64,
    pump: PumpSolution,
    required: f64,
    oil_rate: f64,
    bottomhole_pressure: f64,
}

struct System<'a> {
    fluid: ReservoirFluid,
    reservoir: &'a ReservoirSpec,
    well: &'a WellSpec,
    pump: &'a JetPumpGeometry,
    power: &'a PowerFluid,
    pni: f64,
    correlation: MultiphaseCorrelation,
}

impl System<'_> {
    /// Match the inflow rate to a candidate suction pressure through the
    /// suction-side traverse (pump depth down to perforations).
    fn inflow_match(
        &self,
        psu: f64,
        t_cfg: TraverseConfig,
    ) -> Result<(f64, f64), PumpError> {
        let path = &self.well.path;
        if (path.perf_md - path.pump_md).abs() < 1e-9 {
            return Ok((self.reservoir.ipr.rate(psu), psu));
        }
        let mut pwf = psu;
        let mut q = self.reservoir.ipr.rate(pwf);
        for _ in 0..6 {
            let down = traverse(
                &self.fluid,
                self.correlation,
                q,
                path,
                self.well.suction_conduit,
                path.pump_md,
                path.perf_md,
                psu,
                t_cfg,
            )?;
            let q_next = self.reservoir.ipr.rate(down.end_pressure);
            let settled = (down.end_pressure - pwf).abs() < 0.5;
            pwf = down.end_pressure;
            q = q_next;
            if settled {
                break;
            }
        }
        Ok((q, pwf))
    }

    /// Full system residual at one candidate suction pressure.
    fn evaluate(&self, psu: f64, t_cfg: TraverseConfig, entry_step: f64) -> Result<Evaluation, PumpError> {
        let (q, pwf) = self.inflow_match(psu, t_cfg)?;

        let pump = pump_balance(
            &self.fluid,
            psu,
            self.reservoir.temperature,
            q,
            self.pni,
            self.power,
            self.pump,
            self.well.discharge_tubing.area,
            entry_step,
        )?;

        // Outflow side: the mixed stream up the discharge string sets the
        // pressure the pump has to beat.
        let mixed = ReservoirFluid::new(pump.mixed_ratios, self.fluid.config);
        let outflow = traverse(
            &mixed,
            self.correlation,
            q,
            &self.well.path,
            self.well.discharge_tubing,
            0.0,
            self.well.path.pump_md,
            self.well.wellhead_pressure,
            t_cfg,
        )?;

        Ok(Evaluation {
            residual: pump.discharge_pressure() - outflow.end_pressure,
            pump,
            required: outflow.end_pressure,
            oil_rate: q,
            bottomhole_pressure: pwf,
        })
    }

    /// Evaluate with the single configured retry at finer discretization.
    fn evaluate_with_retry(
        &self,
        psu: f64,
        config: &SolveConfig,
    ) -> Result<Evaluation, PumpError> {
        match self.evaluate(psu, config.traverse, config.entry_step) {
            Err(e) if e.is_retryable() => {
                debug!(psu, error = %e, "retrying at finer discretization");
                let fine = TraverseConfig {
                    step: config.traverse.step / 2.0,
                    ..config.traverse
                };
                self.evaluate(psu, fine, config.entry_step / 2.0)
            }
            other => other,
        }
    }
}

/// Solve for the operating point of a jet-pumped well.
pub fn solve(
    power: &PowerFluid,
    reservoir: &ReservoirSpec,
    well: &WellSpec,
    pump: &JetPumpGeometry,
    config: &SolveConfig,
) -> Result<OperatingPoint, SolveFailure> {
    // Fail fast on invalid inputs, before any computation
    reservoir.ipr.validate()?;
    if well.wellhead_pressure <= 0.0 || !well.wellhead_pressure.is_finite() {
        return Err(SolveFailure::InputValidation {
            what: "wellhead pressure must be positive",
        });
    }
    if config.tolerance <= 0.0 || config.max_iterations == 0 {
        return Err(SolveFailure::InputValidation {
            what: "tolerance and iteration cap must be positive",
        });
    }
    if power.rate <= 0.0 {
        // No lift energy supplied: terminal physical outcome
        return Err(SolveFailure::infeasible(
            InfeasibleReason::NoLiftEnergy,
            "power fluid",
        ));
    }

    let fluid = ReservoirFluid::new(reservoir.fluid, config.pvt);
    let pres = reservoir.ipr.reservoir_pressure();
    let pni = nozzle_inlet_pressure(
        power.surface_pressure,
        power.density,
        well.path.pump_tvd(),
    );
    let system = System {
        fluid,
        reservoir,
        well,
        pump,
        power,
        pni,
        correlation: config.multiphase,
    };

    // Physical bracket: sonic entry limit below, static reservoir above
    let ipr = reservoir.ipr;
    let psu_floor = minimum_suction(
        &fluid,
        reservoir.temperature,
        pump.losses.ken,
        pump.entry_area(),
        config.entry_step,
        pres - 300.0,
        |p| ipr.rate(p),
    )
    .map_err(SolveFailure::from)?;
    let hi = pres - (2.0 * config.tolerance).max(25.0);
    let mut lo = (psu_floor + (2.0 * config.entry_step).max(0.02 * psu_floor)).min(hi * 0.98);

    // Upper end: lightest possible load. If even that cannot beat the
    // outflow, no operating point exists.
    let eval_hi = system
        .evaluate_with_retry(hi, config)
        .map_err(SolveFailure::from)?;
    if eval_hi.residual < 0.0 {
        return Err(SolveFailure::Infeasible {
            reason: format!(
                "pump discharge falls {:.0} psi short of the outflow requirement even at minimal load",
                -eval_hi.residual
            ),
            component: "operating point",
        });
    }

    // Lower end: walk up off the choke limit if the first points are
    // still infeasible there.
    let mut eval_lo = None;
    for _ in 0..5 {
        match system.evaluate_with_retry(lo, config) {
            Ok(e) => {
                eval_lo = Some(e);
                break;
            }
            Err(PumpError::Infeasible {
                reason: InfeasibleReason::ChokedThroatEntry | InfeasibleReason::PowerFluidStarved,
            }) => {
                lo += 0.05 * (hi - lo);
            }
            Err(e) => return Err(e.into()),
        }
    }
    let Some(eval_lo) = eval_lo else {
        return Err(SolveFailure::infeasible(
            InfeasibleReason::ChokedThroatEntry,
            "throat entry",
        ));
    };

    // Residual positive across the whole feasible range: the well runs
    // at the sonic throat-entry limit and the pump has margin to spare.
    if eval_lo.residual >= 0.0 {
        debug!(lo, residual = eval_lo.residual, "choke-limited operating point");
        return Ok(build_point(lo, &eval_lo, 0, true));
    }

    // Bracketed secant with bisection fallback on [lo, hi]
    let mut a = lo;
    let mut ra = eval_lo.residual;
    let mut b = hi;
    let mut rb = eval_hi.residual;
    let mut last_residual = rb;

    for iter in 0..config.max_iterations {
        // Secant proposal from the bracket endpoints, clamped inside;
        // fall back to bisection when it degenerates.
        let mut x = b - rb * (a - b) / (ra - rb);
        let width = b - a;
        if !x.is_finite() || x <= a + 0.05 * width || x >= b - 0.05 * width {
            x = 0.5 * (a + b);
        }

        let eval = match system.evaluate_with_retry(x, config) {
            Ok(e) => e,
            Err(PumpError::Infeasible {
                reason: InfeasibleReason::ChokedThroatEntry | InfeasibleReason::PowerFluidStarved,
            }) => {
                // Infeasible below: tighten the lower end and keep going
                a = x;
                ra = f64::NEG_INFINITY;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        debug!(iter, psu = x, residual = eval.residual, "outer iteration");
        last_residual = eval.residual;

        if eval.residual >= 0.0 {
            b = x;
            rb = eval.residual;
        } else {
            a = x;
            ra = eval.residual;
        }

        if eval.residual.abs() <= config.tolerance || (b - a) <= config.tolerance {
            let point = build_point(x, &eval, iter + 1, false);
            if point.momentum_residual > config.momentum_tolerance {
                return Err(SolveFailure::Diverged {
                    what: "momentum residual above tolerance at convergence".into(),
                    component: "pump",
                    last_residual: Some(point.momentum_residual),
                });
            }
            return Ok(point);
        }
    }

    Err(SolveFailure::Diverged {
        what: "iteration cap reached without convergence".into(),
        component: "operating point",
        last_residual: Some(last_residual),
    })
}

fn build_point(psu: f64, eval: &Evaluation, iterations: usize, choked: bool) -> OperatingPoint {
    OperatingPoint {
        suction_pressure: psu,
        discharge_pressure: eval.pump.discharge_pressure(),
        required_discharge_pressure: eval.required,
        power_fluid_rate: eval.pump.qnz_bpd,
        oil_rate: eval.oil_rate,
        bottomhole_pressure: eval.bottomhole_pressure,
        pressure_ratio: eval.pump.discharge_pressure() / psu.max(1e-9),
        momentum_residual: eval.pump.momentum_residual(),
        residual: eval.residual,
        iterations,
        choked,
    }
}
