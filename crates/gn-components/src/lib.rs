//! gn-components: per-edge physics and station models for gas networks.
//!
//! Provides:
//! - Composite pipes (straight and bend sections) with an implicit friction factor
//! - Gate valves and reducers adding resistance to the edge they sit on
//! - Special valves (limit-flow, limit-drop, limit-pressure) overriding resistance
//! - Compressor stations: valve split across identical units and power model
//! - Users (sinks) with a withdrawal and a minimum delivery pressure
//!
//! All resistance terms implement `ResistanceTerm` and are deterministic
//! functions of the per-iteration `EdgeState`.
//!
//! # Example
//!
//! ```
//! use gn_components::{CompositePipe, EdgeState, ResistanceTerm, StraightSection};
//! use gn_core::units::{m, mm};
//!
//! let pipe = CompositePipe::new(
//!     "P-1",
//!     vec![StraightSection::new(m(100.0), mm(100.0), mm(0.1))],
//!     vec![],
//! )
//! .unwrap();
//!
//! let state = EdgeState {
//!     mass_flow: 1.0,
//!     density: 6.0,
//!     reynolds: 1.0e6,
//!     friction: 0.02,
//! };
//! assert!(pipe.resistance(&state) > 0.0);
//! ```

pub mod common;
pub mod error;
pub mod fitting;
pub mod friction;
pub mod pipe;
pub mod special;
pub mod station;
pub mod traits;
pub mod user;

// Re-exports
pub use error::{ComponentError, ComponentResult};
pub use fitting::{GateValve, Reducer};
pub use friction::{FrictionConfig, friction_factor};
pub use pipe::{BendSection, CompositePipe, StraightSection};
pub use special::{OverrideInputs, SpecialValve, SpecialValveKind};
pub use station::{CompressorStation, PowerModel, ValveSplit, split_valves};
pub use traits::{EdgeState, ResistanceTerm};
pub use user::User;
