//! Fluid property model trait.

use gn_core::units::{Density, DynVisc, Temperature, kgpm3, raw, upas};

use crate::catalog::Fluid;
use crate::error::{FluidError, FluidResult};

/// Per-request fluid properties consumed by the solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FluidProperties {
    pub reference_density: Density,
    pub viscosity: DynVisc,
}

impl FluidProperties {
    pub fn new(reference_density: Density, viscosity: DynVisc) -> Self {
        Self {
            reference_density,
            viscosity,
        }
    }

    /// Reference density, kg/m³.
    pub fn rho0(&self) -> f64 {
        raw::kgpm3(self.reference_density)
    }

    /// Dynamic viscosity, μPa·s.
    pub fn mu(&self) -> f64 {
        raw::upas(self.viscosity)
    }
}

/// Fluid-property function keyed by fluid and temperature.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait FluidModel: Send + Sync {
    fn properties(&self, fluid: Fluid, t: Temperature) -> FluidResult<FluidProperties>;
}

/// Property model backed by the built-in catalogue.
#[derive(Clone, Copy, Debug, Default)]
pub struct CatalogModel;

impl FluidModel for CatalogModel {
    fn properties(&self, fluid: Fluid, t: Temperature) -> FluidResult<FluidProperties> {
        let t_k = raw::kelvin(t);
        if !t_k.is_finite() || t_k <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature",
            });
        }
        let mu = fluid.viscosity_law().micro_pascal_seconds(t_k);
        Ok(FluidProperties::new(
            kgpm3(fluid.reference_density()),
            upas(mu),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gn_core::units::{celsius, k};

    #[test]
    fn air_at_twenty_degrees() {
        let props = CatalogModel
            .properties(Fluid::CompressedAir, celsius(20.0))
            .unwrap();
        // Sutherland: 17.2 * (293.15/273.15)^1.5 * 383.55/403.55
        let expected = 17.2 * (293.15_f64 / 273.15).powf(1.5) * 383.55 / 403.55;
        assert!((props.mu() - expected).abs() < 1e-9);
        assert!((props.rho0() - 1.293).abs() < 1e-12);
    }

    #[test]
    fn non_positive_temperature_rejected() {
        let err = CatalogModel.properties(Fluid::Nitrogen, k(0.0)).unwrap_err();
        assert_eq!(
            err,
            FluidError::NonPhysical {
                what: "temperature"
            }
        );
    }

    #[test]
    fn power_law_fluid() {
        let props = CatalogModel
            .properties(Fluid::Argon, k(2.0 * 273.15))
            .unwrap();
        assert!((props.mu() - 21.0 * 2.0_f64.powf(0.71)).abs() < 1e-9);
    }
}
