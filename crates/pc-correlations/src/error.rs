//! Correlation errors.

use thiserror::Error;

use crate::regime::{GeometryKind, Regime, Side, Transfer};

pub type CorrelationResult<T> = Result<T, CorrelationError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorrelationError {
    /// No method registered for this key.
    #[error("No {transfer} correlation for {geometry} {side} side in regime {regime}")]
    Missing {
        geometry: GeometryKind,
        transfer: Transfer,
        side: Side,
        regime: Regime,
    },

    /// A registered method cannot be used for this key.
    #[error("Correlation {method} does not apply to {geometry} {transfer} in regime {regime}")]
    Incompatible {
        method: &'static str,
        geometry: GeometryKind,
        transfer: Transfer,
        regime: Regime,
    },

    /// The geometry passed does not match the method.
    #[error("Correlation {method} requires {expected} geometry")]
    WrongGeometry {
        method: &'static str,
        expected: GeometryKind,
    },

    /// Flow properties do not match the regime (e.g. single-phase input to a boiling correlation).
    #[error("Correlation {method} requires {what}")]
    MissingInput {
        method: &'static str,
        what: &'static str,
    },

    #[error("Invalid geometry: {what}")]
    InvalidGeometry { what: &'static str },

    #[error("Non-finite result from {method}: {value}")]
    NonFinite { method: &'static str, value: f64 },
}
