//! gn-optimizer: search for cheaper station pressure setpoints.
//!
//! The optimizer treats solve + projection as a black-box cost function over
//! one pressure per compressor station. Runs are reproducible through an
//! explicit seed and can be cancelled between generations.

pub mod cancel;
pub mod config;
pub mod error;
pub mod optimizer;
pub mod search;

pub use cancel::CancelToken;
pub use config::OptimizerConfig;
pub use error::{OptimizerError, OptimizerResult};
pub use optimizer::{Optimization, PressureOptimizer, Verdict, fitness_of};
pub use search::Phase;
