//! gn-results: engineering results projected from a solved network.
//!
//! [`project`] turns a [`gn_solver::HydraulicSolution`] into a
//! [`NetworkReport`]: station valve splits and power, pipe transport
//! efficiency, user delivery, fitting and junction states, plus the
//! system-level efficiency and power figures.

pub mod efficiency;
pub mod projector;
pub mod types;

pub use efficiency::{exergy, transport_efficiency};
pub use projector::project;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("{what}: expected {expected} values, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
