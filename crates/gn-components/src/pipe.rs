//! Composite pipe: straight sections plus bends.

use std::f64::consts::PI;

use gn_core::units::{Length, raw};

use crate::common::check_positive;
use crate::error::{ComponentError, ComponentResult};
use crate::traits::{EdgeState, ResistanceTerm};

/// Straight run of constant bore.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StraightSection {
    pub length: Length,
    pub diameter: Length,
    /// Absolute roughness
    pub roughness: Length,
}

impl StraightSection {
    pub fn new(length: Length, diameter: Length, roughness: Length) -> Self {
        Self {
            length,
            diameter,
            roughness,
        }
    }

    /// `8f/π² · L/D⁵ / ρ`
    pub fn resistance(&self, friction: f64, density: f64) -> f64 {
        let d = raw::meters(self.diameter);
        8.0 * friction / (PI * PI) * raw::meters(self.length) / d.powi(5) / density
    }
}

/// A group of identical bends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BendSection {
    pub count: u32,
    pub angle_deg: f64,
    /// Bend radius over pipe diameter.
    pub radius_ratio: f64,
}

impl BendSection {
    pub const DEFAULT_RADIUS_RATIO: f64 = 1.5;

    pub fn new(count: u32, angle_deg: f64) -> Self {
        Self::with_radius_ratio(count, angle_deg, Self::DEFAULT_RADIUS_RATIO)
    }

    pub fn with_radius_ratio(count: u32, angle_deg: f64, radius_ratio: f64) -> Self {
        Self {
            count,
            angle_deg,
            radius_ratio,
        }
    }

    /// Equivalent straight length of one bend on a bore of `diameter` m.
    ///
    /// 14·D at 90°, scaled linearly in angle around that point.
    pub fn equivalent_length(&self, diameter: f64, friction: f64) -> f64 {
        let arc = 0.25 * PI * friction * self.radius_ratio;
        (self.angle_deg / 90.0 - 1.0) * (arc + 7.0 * diameter) + 14.0 * diameter
    }
}

/// Edge body: ordered straight sections and bend groups.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositePipe {
    name: String,
    sections: Vec<StraightSection>,
    bends: Vec<BendSection>,
}

impl CompositePipe {
    /// Build a pipe; at least one straight section is required.
    pub fn new(
        name: impl Into<String>,
        sections: Vec<StraightSection>,
        bends: Vec<BendSection>,
    ) -> ComponentResult<Self> {
        let name = name.into();
        if sections.is_empty() {
            return Err(ComponentError::MissingStraightSection { pipe: name });
        }
        for s in &sections {
            check_positive(raw::meters(s.diameter), "section diameter")?;
            let len = raw::meters(s.length);
            if !len.is_finite() || len < 0.0 {
                return Err(ComponentError::NonPhysical {
                    what: "section length",
                });
            }
            let eps = raw::meters(s.roughness);
            if !eps.is_finite() || eps < 0.0 {
                return Err(ComponentError::NonPhysical {
                    what: "section roughness",
                });
            }
        }
        for b in &bends {
            if !b.angle_deg.is_finite() || b.angle_deg <= 0.0 {
                return Err(ComponentError::NonPhysical { what: "bend angle" });
            }
            if !b.radius_ratio.is_finite() || b.radius_ratio <= 0.0 {
                return Err(ComponentError::NonPhysical {
                    what: "bend radius ratio",
                });
            }
        }
        Ok(Self {
            name,
            sections,
            bends,
        })
    }

    pub fn sections(&self) -> &[StraightSection] {
        &self.sections
    }

    pub fn bends(&self) -> &[BendSection] {
        &self.bends
    }

    /// Bore of the first straight section, m. Used for velocity, Re and friction.
    pub fn main_diameter(&self) -> f64 {
        raw::meters(self.sections[0].diameter)
    }

    /// Roughness of the first straight section, mm.
    pub fn roughness_mm(&self) -> f64 {
        raw::meters(self.sections[0].roughness) * 1000.0
    }

    pub fn total_length(&self) -> f64 {
        self.sections.iter().map(|s| raw::meters(s.length)).sum()
    }
}

impl ResistanceTerm for CompositePipe {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "pipe"
    }

    fn resistance(&self, state: &EdgeState) -> f64 {
        let f = state.friction;
        let rho = state.density;
        let straight: f64 = self.sections.iter().map(|s| s.resistance(f, rho)).sum();

        let d = self.main_diameter();
        let bends: f64 = self
            .bends
            .iter()
            .map(|b| {
                let leq = f64::from(b.count) * b.equivalent_length(d, f);
                8.0 * f / (PI * PI) * leq / d.powi(5) / rho
            })
            .sum();

        straight + bends
    }
}
