//! Optimizer errors.

use gn_results::ResultsError;
use gn_solver::SolverError;
use thiserror::Error;

pub type OptimizerResult<T> = Result<T, OptimizerError>;

/// Only bad configuration and malformed networks are errors; lack of
/// improvement or cancellation are verdicts.
#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("invalid optimizer config: {what}")]
    InvalidConfig { what: String },

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Results(#[from] ResultsError),
}
