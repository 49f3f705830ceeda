//! Fittings that add resistance to the edge they are attached to.

use std::f64::consts::PI;

use gn_core::units::{Length, raw};

use crate::common::check_positive;
use crate::error::{ComponentError, ComponentResult};
use crate::traits::{EdgeState, ResistanceTerm};

/// Loss coefficient of a fully open gate valve.
const GATE_VALVE_K: f64 = 0.2;

/// Plain (gate) valve.
#[derive(Debug, Clone, PartialEq)]
pub struct GateValve {
    name: String,
    pub diameter: Length,
}

impl GateValve {
    pub fn new(name: impl Into<String>, diameter: Length) -> ComponentResult<Self> {
        check_positive(raw::meters(diameter), "valve diameter")?;
        Ok(Self {
            name: name.into(),
            diameter,
        })
    }
}

impl ResistanceTerm for GateValve {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "valve"
    }

    /// `8K/(π² D⁴ ρ)`
    fn resistance(&self, state: &EdgeState) -> f64 {
        let d = raw::meters(self.diameter);
        8.0 * GATE_VALVE_K / (PI * PI * d.powi(4) * state.density)
    }
}

/// Conical reducer between two bores.
///
/// `inlet_diameter` sits on the edge's `from` side.
#[derive(Debug, Clone, PartialEq)]
pub struct Reducer {
    name: String,
    pub inlet_diameter: Length,
    pub outlet_diameter: Length,
    pub angle_deg: f64,
}

impl Reducer {
    pub fn new(
        name: impl Into<String>,
        inlet_diameter: Length,
        outlet_diameter: Length,
        angle_deg: f64,
    ) -> ComponentResult<Self> {
        check_positive(raw::meters(inlet_diameter), "reducer inlet diameter")?;
        check_positive(raw::meters(outlet_diameter), "reducer outlet diameter")?;
        if !angle_deg.is_finite() || angle_deg <= 0.0 || angle_deg >= 90.0 {
            return Err(ComponentError::NonPhysical {
                what: "reducer angle",
            });
        }
        Ok(Self {
            name: name.into(),
            inlet_diameter,
            outlet_diameter,
            angle_deg,
        })
    }

    /// Loss coefficient for the given flow sign.
    ///
    /// Flow from the larger into the smaller bore uses the contraction
    /// coefficient, the other way the expansion coefficient.
    pub fn loss_coefficient(&self, mass_flow: f64) -> f64 {
        let d0 = raw::meters(self.inlet_diameter);
        let d1 = raw::meters(self.outlet_diameter);
        let y = (d1 / d0).powi(2);
        let tan = self.angle_deg.to_radians().tan().powf(0.75);
        let expansion = 20.0 * y.powf(0.33) / tan;
        let contraction = 19.0 / (y.sqrt() * tan);

        let narrowing_downstream = if mass_flow > 0.0 { d0 > d1 } else { d0 <= d1 };
        if narrowing_downstream {
            contraction
        } else {
            expansion
        }
    }
}

impl ResistanceTerm for Reducer {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "reducer"
    }

    /// `8K/(π² D₁⁴ ρ Re)`, zero when undefined.
    fn resistance(&self, state: &EdgeState) -> f64 {
        let d1 = raw::meters(self.outlet_diameter);
        let k = self.loss_coefficient(state.mass_flow);
        let r = 8.0 * k / (PI * PI * d1.powi(4) * state.density * state.reynolds);
        if r.is_nan() { 0.0 } else { r }
    }
}
