//! Cross-correlation consistency checks for the black-oil model.

use jl_pvt::{CorrelationSet, FluidRatios, PvtConfig, ReservoirFluid};
use proptest::prelude::*;

fn fluid(set: CorrelationSet) -> ReservoirFluid {
    let ratios = FluidRatios::new(0.4, 500.0, 32.0, 0.7, 1.5).unwrap();
    ReservoirFluid::new(
        ratios,
        PvtConfig {
            correlation_set: set,
        },
    )
}

#[test]
fn both_sets_agree_on_the_physics_direction() {
    for set in [CorrelationSet::Standing, CorrelationSet::VazquezBeggs] {
        let f = fluid(set);
        let lo = f.properties_raw(500.0, 180.0).unwrap();
        let hi = f.properties_raw(1_500.0, 180.0).unwrap();
        // More pressure dissolves more gas and shrinks the free fraction
        assert!(hi.rs > lo.rs, "{set:?}");
        assert!(hi.gas_fraction() < lo.gas_fraction(), "{set:?}");
        assert!(hi.rho_mix() > lo.rho_mix(), "{set:?}");
    }
}

proptest! {
    #[test]
    fn rs_is_monotonic_in_pressure(
        p1 in 100.0_f64..5_000.0,
        p2 in 100.0_f64..5_000.0,
    ) {
        let f = fluid(CorrelationSet::Standing);
        let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
        let s_lo = f.properties_raw(lo, 180.0).unwrap();
        let s_hi = f.properties_raw(hi, 180.0).unwrap();
        prop_assert!(s_hi.rs >= s_lo.rs - 1e-9);
    }

    #[test]
    fn mixture_properties_stay_physical(
        p in 50.0_f64..8_000.0,
        t in 80.0_f64..280.0,
    ) {
        let f = fluid(CorrelationSet::VazquezBeggs);
        let s = f.properties_raw(p, t).unwrap();
        prop_assert!(s.rho_mix() > 0.0 && s.rho_mix() < 75.0);
        prop_assert!(s.mu_mix() > 0.0);
        prop_assert!(s.sonic_velocity() > 0.0);
        let (fo, fw, fg) = s.volume_fractions();
        prop_assert!((fo + fw + fg - 1.0).abs() < 1e-9);
    }
}
