//! Core traits for resistance terms.

/// Per-iteration physical state of one edge.
///
/// Every resistance term on an edge reads the same state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeState {
    /// Signed mass flow estimate, kg/s (positive `from → to`).
    pub mass_flow: f64,
    /// Gas density at the edge's mean pressure, kg/m³.
    pub density: f64,
    pub reynolds: f64,
    /// Darcy friction factor.
    pub friction: f64,
}

/// An additive contribution to an edge's resistance `R` in `ΔP = R·ṁ²`.
///
/// Implementations must be deterministic and never return a negative value.
pub trait ResistanceTerm: Send + Sync {
    /// Name for logs and reports.
    fn name(&self) -> &str;

    /// Short kind label for reports.
    fn kind(&self) -> &'static str {
        "fitting"
    }

    /// Resistance in Pa·s²/kg².
    fn resistance(&self, state: &EdgeState) -> f64;
}
