//! Special valves that override an edge's resistance each iteration.

use crate::common::{check_positive, volumetric_to_mass};
use crate::error::{ComponentError, ComponentResult};

/// Regulating rule of a special valve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpecialValveKind {
    /// Caps the downstream absolute pressure at `set_pressure` Pa.
    LimitPressure { set_pressure: f64 },
    /// Drives the edge flow to `set_flow` m³/min.
    LimitFlow { set_flow: f64 },
    /// Adds a constant pressure drop of `set_drop` Pa.
    LimitDrop { set_drop: f64 },
}

impl SpecialValveKind {
    /// Evaluation rank within one iteration; lower runs first.
    pub fn rank(&self) -> u8 {
        match self {
            SpecialValveKind::LimitPressure { .. } => 0,
            SpecialValveKind::LimitFlow { .. } => 1,
            SpecialValveKind::LimitDrop { .. } => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpecialValveKind::LimitPressure { .. } => "limit-pressure",
            SpecialValveKind::LimitFlow { .. } => "limit-flow",
            SpecialValveKind::LimitDrop { .. } => "limit-drop",
        }
    }
}

/// Quantities a special valve reads when overriding resistance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverrideInputs {
    /// Absolute pressure difference between the edge's endpoints, Pa.
    pub drop_across: f64,
    /// Last computed mass flow on the edge, kg/s.
    pub mass_flow: f64,
    /// Absolute pressure on the upstream side of the current flow, Pa.
    pub upstream_pressure: f64,
    /// Reference density, kg/m³.
    pub rho0: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpecialValve {
    name: String,
    pub kind: SpecialValveKind,
}

impl SpecialValve {
    pub fn new(name: impl Into<String>, kind: SpecialValveKind) -> ComponentResult<Self> {
        match kind {
            SpecialValveKind::LimitPressure { set_pressure } => {
                check_positive(set_pressure, "limit-pressure setpoint")?;
            }
            SpecialValveKind::LimitFlow { set_flow } => {
                check_positive(set_flow, "limit-flow setpoint")?;
            }
            SpecialValveKind::LimitDrop { set_drop } => {
                if !set_drop.is_finite() || set_drop < 0.0 {
                    return Err(ComponentError::NonPhysical {
                        what: "limit-drop setpoint",
                    });
                }
            }
        }
        Ok(Self {
            name: name.into(),
            kind,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resistance after this valve acts on an edge currently at `resistance`.
    pub fn apply(&self, resistance: f64, inputs: &OverrideInputs) -> f64 {
        let q2 = inputs.mass_flow * inputs.mass_flow;
        match self.kind {
            SpecialValveKind::LimitPressure { set_pressure } => {
                let margin = inputs.upstream_pressure - set_pressure;
                if q2 > 0.0 && margin > 0.0 {
                    margin / q2
                } else {
                    resistance
                }
            }
            SpecialValveKind::LimitFlow { set_flow } => {
                let target = volumetric_to_mass(set_flow, inputs.rho0);
                inputs.drop_across.abs() / (target * target)
            }
            SpecialValveKind::LimitDrop { set_drop } => {
                if q2 > 0.0 {
                    resistance + set_drop / q2
                } else {
                    resistance
                }
            }
        }
    }
}
