//! Steady-state hydraulic solver for compressed-gas networks.
//!
//! The network is linearised per iteration as an Ohm's-law analogue: every
//! edge gets a conductance `G = 1/(R·|ṁ|)` from its current resistance and
//! flow estimate, the reduced nodal system `A·G·Aᵀ·d = q` is solved for the
//! pressure drops of non-source nodes, and the flow estimate is damped
//! towards the new flows until the relative change falls below tolerance.
//!
//! Non-convergence, degenerate flow and constraint violations are reported
//! through `HydraulicSolution::outcome` and `feasible`; only malformed input
//! is an `Err`.

pub mod boundary;
pub mod config;
pub mod error;
pub mod hydraulic;
pub mod network;
pub mod overrides;
pub mod solution;

pub use boundary::Boundary;
pub use config::SolverConfig;
pub use error::{SolverError, SolverResult};
pub use hydraulic::{HydraulicSolver, solve};
pub use network::{Network, Sink, Source};
pub use solution::{HydraulicSolution, SolveOutcome, Violation};
