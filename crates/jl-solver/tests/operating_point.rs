//! End-to-end operating point solves on a representative well.

use jl_core::units::{ft, inch, sq_inch};
use jl_flow::{Conduit, WellPath};
use jl_pump::{JetPumpGeometry, PowerFluid, PumpLosses};
use jl_pvt::FluidRatios;
use jl_solver::{solve, IprModel, OperatingPoint, ReservoirSpec, SolveConfig, SolveFailure, WellSpec};

const PRES: f64 = 2_500.0;

fn reservoir() -> ReservoirSpec {
    ReservoirSpec {
        ipr: IprModel::ProductivityIndex { pres: PRES, j: 1.0 },
        temperature: 180.0,
        fluid: FluidRatios::new(0.5, 400.0, 35.0, 0.65, 2.0).unwrap(),
    }
}

fn well() -> WellSpec {
    let tubing = Conduit::tubing(inch(2.441), inch(0.0018)).unwrap();
    WellSpec {
        path: WellPath::vertical(ft(8_000.0), 8_000.0, 8_000.0, 80.0, 180.0).unwrap(),
        discharge_tubing: tubing,
        suction_conduit: tubing,
        wellhead_pressure: 150.0,
    }
}

fn pump() -> JetPumpGeometry {
    JetPumpGeometry::new(sq_inch(0.01), sq_inch(0.04), PumpLosses::default()).unwrap()
}

fn power() -> PowerFluid {
    PowerFluid::new(3_000.0, 1_000.0, 62.4).unwrap()
}

fn solve_reference() -> OperatingPoint {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    solve(&power(), &reservoir(), &well(), &pump(), &SolveConfig::default()).unwrap()
}

#[test]
fn reference_well_finds_an_operating_point() {
    let point = solve_reference();

    // Suction must sit below static reservoir pressure with real inflow
    assert!(point.suction_pressure < PRES, "psu = {}", point.suction_pressure);
    assert!(point.suction_pressure > 100.0);
    assert!(point.oil_rate > 0.0);

    // Discharge above suction (the pump adds energy), below the nozzle
    // inlet pressure that drives it
    let pni = 3_000.0 + 62.4 * 8_000.0 / 144.0;
    assert!(point.discharge_pressure > point.suction_pressure);
    assert!(point.discharge_pressure < pni, "pdi = {}", point.discharge_pressure);
    assert!(point.pressure_ratio > 1.0);

    // Power fluid stays within the declared supply
    assert!(point.power_fluid_rate > 0.0);
    assert!(point.power_fluid_rate <= 1_000.0);
}

#[test]
fn momentum_residual_within_tolerance() {
    let config = SolveConfig::default();
    let point = solve_reference();
    assert!(
        point.momentum_residual <= config.momentum_tolerance,
        "momentum residual {} above {}",
        point.momentum_residual,
        config.momentum_tolerance
    );
}

#[test]
fn mass_conservation_with_the_inflow_model() {
    // The rate the solver reports must be what the reservoir delivers at
    // the solved bottom-hole pressure.
    let point = solve_reference();
    let expected = reservoir().ipr.rate(point.bottomhole_pressure);
    approx::assert_relative_eq!(point.oil_rate, expected, max_relative = 1e-6);
}

#[test]
fn zero_power_fluid_is_infeasible() {
    let starved = PowerFluid::new(3_000.0, 0.0, 62.4);
    // Zero rate is a valid description of the supply, but no operating
    // point can exist on it.
    let starved = starved.unwrap();
    let r = solve(&starved, &reservoir(), &well(), &pump(), &SolveConfig::default());
    assert!(matches!(r, Err(SolveFailure::Infeasible { .. })), "{r:?}");
}

#[test]
fn weak_drive_against_heavy_outflow_is_infeasible() {
    let weak = PowerFluid::new(200.0, 1_000.0, 62.4).unwrap();
    let mut heavy = well();
    heavy.wellhead_pressure = 1_500.0;
    let r = solve(&weak, &reservoir(), &heavy, &pump(), &SolveConfig::default());
    assert!(matches!(r, Err(SolveFailure::Infeasible { .. })), "{r:?}");
}

#[test]
fn invalid_inputs_fail_before_computation() {
    let mut bad_well = well();
    bad_well.wellhead_pressure = -10.0;
    let r = solve(&power(), &reservoir(), &bad_well, &pump(), &SolveConfig::default());
    assert!(matches!(r, Err(SolveFailure::InputValidation { .. })));

    let mut bad_res = reservoir();
    bad_res.ipr = IprModel::ProductivityIndex { pres: PRES, j: -1.0 };
    let r = solve(&power(), &bad_res, &well(), &pump(), &SolveConfig::default());
    assert!(matches!(r, Err(SolveFailure::InputValidation { .. })));
}

#[test]
fn config_round_trips_through_serde() {
    let config = SolveConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let back: SolveConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, back);
}

#[test]
fn solution_is_insensitive_to_discretization() {
    // Halving the traverse step should barely move the answer: the
    // predictor-corrector march is second order.
    let coarse = solve_reference();
    let mut config = SolveConfig::default();
    config.traverse.step = 50.0;
    let fine = solve(&power(), &reservoir(), &well(), &pump(), &config).unwrap();
    let shift = (fine.suction_pressure - coarse.suction_pressure).abs();
    assert!(
        shift < 0.05 * coarse.suction_pressure + 2.0 * config.tolerance,
        "psu moved {shift} psi between discretizations"
    );
}
