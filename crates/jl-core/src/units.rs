// jl-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, Length as UomLength, MassDensity as UomMassDensity,
    Pressure as UomPressure, Ratio as UomRatio,
    ThermodynamicTemperature as UomThermodynamicTemperature, Velocity as UomVelocity,
    VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn psi(v: f64) -> Pressure {
    use uom::si::pressure::pound_force_per_square_inch;
    Pressure::new::<pound_force_per_square_inch>(v)
}

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn degf(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_fahrenheit;
    Temperature::new::<degree_fahrenheit>(v)
}

#[inline]
pub fn ft(v: f64) -> Length {
    use uom::si::length::foot;
    Length::new::<foot>(v)
}

#[inline]
pub fn inch(v: f64) -> Length {
    use uom::si::length::inch;
    Length::new::<inch>(v)
}

#[inline]
pub fn sq_inch(v: f64) -> Area {
    use uom::si::area::square_inch;
    Area::new::<square_inch>(v)
}

#[inline]
pub fn sq_ft(v: f64) -> Area {
    use uom::si::area::square_foot;
    Area::new::<square_foot>(v)
}

/// Stock-tank barrels per day, the customary oilfield liquid rate.
#[inline]
pub fn bpd(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v * constants::BBL_TO_M3 / constants::DAY_TO_S)
}

// f64 accessors in the oilfield units the correlations are written in.

#[inline]
pub fn to_psi(p: Pressure) -> f64 {
    use uom::si::pressure::pound_force_per_square_inch;
    p.get::<pound_force_per_square_inch>()
}

#[inline]
pub fn to_degf(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_fahrenheit;
    t.get::<degree_fahrenheit>()
}

#[inline]
pub fn to_ft(l: Length) -> f64 {
    use uom::si::length::foot;
    l.get::<foot>()
}

#[inline]
pub fn to_sq_ft(a: Area) -> f64 {
    use uom::si::area::square_foot;
    a.get::<square_foot>()
}

#[inline]
pub fn to_bpd(q: VolumeRate) -> f64 {
    use uom::si::volume_rate::cubic_meter_per_second;
    q.get::<cubic_meter_per_second>() * constants::DAY_TO_S / constants::BBL_TO_M3
}

pub mod constants {
    /// Standard gravity, ft/s2
    pub const G_FTPS2: f64 = 32.174;

    /// Mass-force conversion, lbm·ft/(lbf·s2)
    pub const GC: f64 = 32.174;

    /// Square inches per square foot
    pub const SQIN_PER_SQFT: f64 = 144.0;

    /// Cubic feet per barrel
    pub const FT3_PER_BBL: f64 = 5.614_583;

    /// Seconds per day
    pub const DAY_TO_S: f64 = 86_400.0;

    /// Cubic meters per barrel
    pub const BBL_TO_M3: f64 = 0.158_987_3;

    /// Density of fresh water at standard conditions, lbm/ft3
    pub const RHO_WATER_SC: f64 = 62.4;

    /// Density of air at standard conditions, lbm/ft3
    pub const RHO_AIR_SC: f64 = 0.076_4;

    /// Rankine offset from Fahrenheit
    pub const F_TO_R: f64 = 459.67;

    /// Universal gas constant, psia·ft3/(lb-mol·°R)
    pub const R_GAS: f64 = 10.731_6;

    /// Molar mass of air, lbm/lb-mol
    pub const M_AIR: f64 = 28.966;
}

/// Barrels per day to cubic feet per second.
#[inline]
pub fn bpd_to_ft3s(q_bpd: f64) -> f64 {
    q_bpd * constants::FT3_PER_BBL / constants::DAY_TO_S
}

/// Cubic feet per second to barrels per day.
#[inline]
pub fn ft3s_to_bpd(q_ft3s: f64) -> f64 {
    q_ft3s * constants::DAY_TO_S / constants::FT3_PER_BBL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = psi(3_000.0);
        let _t = degf(150.0);
        let _l = ft(6_000.0);
        let _a = sq_inch(0.01);
        let _q = bpd(1_000.0);
    }

    #[test]
    fn psi_roundtrip() {
        let p = psi(2_500.0);
        assert!((to_psi(p) - 2_500.0).abs() < 1e-9);
        // 1 psi = 6894.757 Pa
        assert!((p.value - 2_500.0 * 6_894.757).abs() < 1.0);
    }

    #[test]
    fn degf_roundtrip() {
        let t = degf(180.0);
        assert!((to_degf(t) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn bpd_conversion() {
        // 1000 bpd through the uom constructor and back
        let q = bpd(1_000.0);
        assert!((to_bpd(q) - 1_000.0).abs() < 1e-6);
        // and the raw f64 helper: 1000 bpd ~ 0.06498 ft3/s
        let ft3s = bpd_to_ft3s(1_000.0);
        assert!((ft3s - 0.064_98).abs() < 1e-4);
        assert!((ft3s_to_bpd(ft3s) - 1_000.0).abs() < 1e-9);
    }
}
