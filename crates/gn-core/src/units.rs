// gn-core/src/units.rs

use uom::si::f64::{
    DynamicViscosity as UomDynamicViscosity, Length as UomLength, MassDensity as UomMassDensity,
    Power as UomPower, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature, VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type DynVisc = UomDynamicViscosity;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn kpa(v: f64) -> Pressure {
    use uom::si::pressure::kilopascal;
    Pressure::new::<kilopascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

/// Volumetric flow in m³/min (flows are reported at reference density).
#[inline]
pub fn m3pmin(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_minute;
    VolumeRate::new::<cubic_meter_per_minute>(v)
}

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

/// Dynamic viscosity in μPa·s, the unit gas viscosity tables are quoted in.
#[inline]
pub fn upas(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v * 1e-6)
}

/// Plain-number accessors used by numeric kernels.
pub mod raw {
    use super::*;

    #[inline]
    pub fn pa(p: Pressure) -> f64 {
        p.get::<uom::si::pressure::pascal>()
    }

    #[inline]
    pub fn kelvin(t: Temperature) -> f64 {
        t.get::<uom::si::thermodynamic_temperature::kelvin>()
    }

    #[inline]
    pub fn meters(l: Length) -> f64 {
        l.get::<uom::si::length::meter>()
    }

    #[inline]
    pub fn kgpm3(rho: Density) -> f64 {
        rho.get::<uom::si::mass_density::kilogram_per_cubic_meter>()
    }

    #[inline]
    pub fn m3pmin(q: VolumeRate) -> f64 {
        q.get::<uom::si::volume_rate::cubic_meter_per_minute>()
    }

    #[inline]
    pub fn upas(mu: DynVisc) -> f64 {
        mu.get::<uom::si::dynamic_viscosity::pascal_second>() * 1e6
    }

    #[inline]
    pub fn kw(p: Power) -> f64 {
        p.get::<uom::si::power::kilowatt>()
    }
}

pub mod constants {
    /// Standard atmosphere, the exergy reference pressure (Pa).
    pub const P_REF_PA: f64 = 101_325.0;

    /// Normal temperature used by the density scaling law (K).
    pub const T_NORMAL_K: f64 = 273.15;

    /// Seconds per minute, for m³/min ↔ kg/s conversion.
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
}
