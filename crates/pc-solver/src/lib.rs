//! pc-solver: steady-state power-cycle solving.
//!
//! A [`Cycle`] pairs a validated `pc-graph` topology with the components
//! filling its slots. Solving runs the components in flow order and feeds
//! each outlet to the next inlet until the state at every point stops
//! changing, optionally starting the closing point from the saturated-liquid
//! line of the phase envelope.

pub mod cycle;
pub mod error;
mod seed;
pub mod solution;

pub use cycle::Cycle;
pub use error::{SolverError, SolverResult};
pub use solution::{CycleSolution, CycleStatus, PointSnapshot, SeedSource};
