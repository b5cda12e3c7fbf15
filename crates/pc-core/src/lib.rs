//! pc-core: stable foundation for the power-cycle workspace.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - root (bounded single-unknown root finder)
//! - config (solver defaults threaded through constructors)
//! - ids (stable compact IDs for graph objects)
//! - timing (scoped timer helper)
//! - error (shared error types)

pub mod config;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod root;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use config::{Defaults, TolAttr};
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use root::{Root, RootOptions, bisect, bisect_integer};
pub use timing::{ScopedTimer, timed};
pub use units::*;
