//! gn-core: stable foundation for the gas network workspace.
//!
//! Contains:
//! - units (uom SI types + constructors, reference conditions)
//! - numeric (Real + float helpers)
//! - ids (compact node/edge identifiers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{GnError, GnResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
