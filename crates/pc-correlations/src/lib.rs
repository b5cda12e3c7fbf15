//! pc-correlations: heat-transfer and friction correlations for plate heat exchangers.
//!
//! Correlations are selected through a [`MethodTable`] keyed by plate
//! geometry, transfer kind (heat or friction), side (working or secondary
//! fluid) and local flow regime. Inputs are plain SI numbers so the crate has
//! no dependency on a property backend.

pub mod error;
pub mod geometry;
pub mod methods;
pub mod props;
pub mod regime;
pub mod table;

pub use error::{CorrelationError, CorrelationResult};
pub use geometry::{Chevron, Geometry, OffsetFin, Smooth};
pub use methods::{Friction, Heat};
pub use props::{Bulk, FlowInput, FlowProps, TwoPhase};
pub use regime::{GeometryKind, Regime, Side, Transfer};
pub use table::{Method, MethodEntry, MethodKey, MethodTable};
