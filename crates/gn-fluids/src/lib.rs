//! gn-fluids: fluid property function for gas networks.
//!
//! Provides:
//! - The catalogue of industrial gases carried by a network (`Fluid`)
//! - Viscosity laws (Sutherland and power law)
//! - `FluidModel` trait returning reference density and dynamic viscosity
//!
//! # Example
//!
//! ```
//! use gn_core::units::{celsius, raw};
//! use gn_fluids::{CatalogModel, Fluid, FluidModel};
//!
//! let props = CatalogModel.properties(Fluid::CompressedAir, celsius(0.0)).unwrap();
//! assert!((raw::kgpm3(props.reference_density) - 1.293).abs() < 1e-12);
//! assert!((raw::upas(props.viscosity) - 17.2).abs() < 1e-9);
//! ```

pub mod catalog;
pub mod error;
pub mod model;

// Re-exports for ergonomics
pub use catalog::{Fluid, ViscosityLaw};
pub use error::{FluidError, FluidResult};
pub use model::{CatalogModel, FluidModel, FluidProperties};
