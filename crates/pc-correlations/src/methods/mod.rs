//! Correlation functions grouped by plate geometry.

pub mod chevron;
pub mod offset_fin;
pub mod smooth;

use crate::error::{CorrelationError, CorrelationResult};
use crate::props::{Bulk, FlowInput, FlowProps, TwoPhase};

/// Heat transfer coefficient for one side of a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heat {
    /// Heat transfer coefficient [W/(m²·K)]
    pub h: f64,
    pub nu: f64,
    pub re: f64,
}

/// Fanning friction factor for one side of a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Friction {
    pub f: f64,
    pub re: f64,
}

pub(crate) fn single<'a>(method: &'static str, input: &'a FlowInput) -> CorrelationResult<&'a Bulk> {
    match &input.props {
        FlowProps::Single(bulk) => Ok(bulk),
        FlowProps::Two(_) => Err(CorrelationError::MissingInput {
            method,
            what: "single-phase properties",
        }),
    }
}

pub(crate) fn two<'a>(method: &'static str, input: &'a FlowInput) -> CorrelationResult<&'a TwoPhase> {
    match &input.props {
        FlowProps::Two(tp) => Ok(tp),
        FlowProps::Single(_) => Err(CorrelationError::MissingInput {
            method,
            what: "two-phase properties",
        }),
    }
}

pub(crate) fn heat(method: &'static str, nu: f64, k: f64, length: f64, re: f64) -> CorrelationResult<Heat> {
    let h = nu * k / length;
    if !h.is_finite() || h <= 0.0 {
        return Err(CorrelationError::NonFinite { method, value: h });
    }
    Ok(Heat { h, nu, re })
}

pub(crate) fn friction(method: &'static str, f: f64, re: f64) -> CorrelationResult<Friction> {
    if !f.is_finite() || f <= 0.0 {
        return Err(CorrelationError::NonFinite { method, value: f });
    }
    Ok(Friction { f, re })
}
