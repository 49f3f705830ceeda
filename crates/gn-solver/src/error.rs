//! Error types for solver operations.

use gn_components::ComponentError;
use gn_core::error::GnError;
use gn_fluids::FluidError;
use thiserror::Error;

/// Errors that abort a solve before any iteration runs.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Graph error: {0}")]
    Graph(#[from] gn_graph::GraphError),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    pub(crate) fn setup(what: impl Into<String>) -> Self {
        SolverError::ProblemSetup { what: what.into() }
    }
}

impl From<SolverError> for GnError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::ProblemSetup { what: _ } => GnError::InvalidArg {
                what: "problem setup",
            },
            SolverError::Component(_) => GnError::InvalidArg { what: "component" },
            SolverError::Fluid(_) => GnError::InvalidArg { what: "fluid" },
            SolverError::Graph(_) => GnError::InvalidArg { what: "graph" },
        }
    }
}
