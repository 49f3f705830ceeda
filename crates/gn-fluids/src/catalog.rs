//! Catalogue of gases a network can carry.

use gn_core::units::constants::T_NORMAL_K;
use serde::{Deserialize, Serialize};

use crate::error::{FluidError, FluidResult};

/// Viscosity law in μPa·s as a function of absolute temperature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViscosityLaw {
    /// μ₀·(T/T₀)^1.5·(T₀+S)/(T+S)
    Sutherland { mu0: f64, s: f64 },
    /// μ₀·(T/T₀)^n
    PowerLaw { mu0: f64, n: f64 },
}

impl ViscosityLaw {
    /// Dynamic viscosity in μPa·s at `t_k` kelvin.
    pub fn micro_pascal_seconds(&self, t_k: f64) -> f64 {
        let ratio = t_k / T_NORMAL_K;
        match *self {
            ViscosityLaw::Sutherland { mu0, s } => {
                mu0 * ratio.powf(1.5) * (T_NORMAL_K + s) / (t_k + s)
            }
            ViscosityLaw::PowerLaw { mu0, n } => mu0 * ratio.powf(n),
        }
    }
}

/// Gas carried by a network, keyed by its numeric code (1..=8).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Fluid {
    CompressedAir,
    Nitrogen,
    Oxygen,
    Argon,
    NaturalGas,
    CokeOvenGas,
    BlastFurnaceGas,
    ConverterGas,
}

impl Fluid {
    pub const ALL: [Fluid; 8] = [
        Fluid::CompressedAir,
        Fluid::Nitrogen,
        Fluid::Oxygen,
        Fluid::Argon,
        Fluid::NaturalGas,
        Fluid::CokeOvenGas,
        Fluid::BlastFurnaceGas,
        Fluid::ConverterGas,
    ];

    pub fn from_code(code: u32) -> FluidResult<Self> {
        match code {
            1..=8 => Ok(Self::ALL[(code - 1) as usize]),
            _ => Err(FluidError::UnknownFluid { code }),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Fluid::CompressedAir => 1,
            Fluid::Nitrogen => 2,
            Fluid::Oxygen => 3,
            Fluid::Argon => 4,
            Fluid::NaturalGas => 5,
            Fluid::CokeOvenGas => 6,
            Fluid::BlastFurnaceGas => 7,
            Fluid::ConverterGas => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Fluid::CompressedAir => "compressed air",
            Fluid::Nitrogen => "nitrogen",
            Fluid::Oxygen => "oxygen",
            Fluid::Argon => "argon",
            Fluid::NaturalGas => "natural gas",
            Fluid::CokeOvenGas => "coke-oven gas",
            Fluid::BlastFurnaceGas => "blast-furnace gas",
            Fluid::ConverterGas => "converter gas",
        }
    }

    /// Density at 0 °C and 1 atm, kg/m³.
    pub fn reference_density(self) -> f64 {
        match self {
            Fluid::CompressedAir => 1.293,
            Fluid::Nitrogen => 1.250,
            Fluid::Oxygen => 1.429,
            Fluid::Argon => 1.784,
            Fluid::NaturalGas => 0.75,
            Fluid::CokeOvenGas => 0.46,
            Fluid::BlastFurnaceGas => 1.35,
            Fluid::ConverterGas => 1.20,
        }
    }

    pub fn viscosity_law(self) -> ViscosityLaw {
        use ViscosityLaw::*;
        match self {
            Fluid::CompressedAir => Sutherland { mu0: 17.20, s: 110.4 },
            Fluid::Nitrogen => Sutherland { mu0: 17.50, s: 107.0 },
            Fluid::Oxygen => Sutherland { mu0: 19.20, s: 125.0 },
            Fluid::Argon => PowerLaw { mu0: 21.0, n: 0.71 },
            Fluid::NaturalGas => Sutherland { mu0: 13.75, s: 198.0 },
            Fluid::CokeOvenGas => PowerLaw { mu0: 11.6, n: 0.70 },
            Fluid::BlastFurnaceGas => PowerLaw { mu0: 15.79, n: 0.80 },
            Fluid::ConverterGas => PowerLaw { mu0: 18.0, n: 0.75 },
        }
    }
}

impl TryFrom<u32> for Fluid {
    type Error = FluidError;

    fn try_from(code: u32) -> FluidResult<Self> {
        Fluid::from_code(code)
    }
}

impl From<Fluid> for u32 {
    fn from(fluid: Fluid) -> u32 {
        fluid.code()
    }
}

impl std::fmt::Display for Fluid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for fluid in Fluid::ALL {
            assert_eq!(Fluid::from_code(fluid.code()).unwrap(), fluid);
        }
    }

    #[test]
    fn unknown_codes_rejected() {
        assert_eq!(
            Fluid::from_code(0),
            Err(FluidError::UnknownFluid { code: 0 })
        );
        assert!(Fluid::from_code(9).is_err());
    }

    #[test]
    fn viscosity_equals_reference_at_normal_temperature() {
        for fluid in Fluid::ALL {
            let law = fluid.viscosity_law();
            let mu0 = match law {
                ViscosityLaw::Sutherland { mu0, .. } | ViscosityLaw::PowerLaw { mu0, .. } => mu0,
            };
            assert!((law.micro_pascal_seconds(T_NORMAL_K) - mu0).abs() < 1e-9);
        }
    }

    #[test]
    fn serde_uses_numeric_code() {
        assert_eq!(serde_json::to_string(&Fluid::Oxygen).unwrap(), "3");
        let fluid: Fluid = serde_json::from_str("7").unwrap();
        assert_eq!(fluid, Fluid::BlastFurnaceGas);
        assert!(serde_json::from_str::<Fluid>("12").is_err());
    }
}
