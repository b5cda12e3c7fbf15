//! Plate channel geometries.

use serde::{Deserialize, Serialize};

use crate::error::{CorrelationError, CorrelationResult};
use crate::regime::GeometryKind;

/// Chevron (herringbone) corrugated plate channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Chevron {
    /// Channel gap, twice the corrugation amplitude [m]
    pub b: f64,
    /// Chevron angle from the flow direction [deg]
    pub beta: f64,
    /// Corrugation pitch [m]
    pub pitch: f64,
    /// Surface enlargement factor (developed over projected area)
    pub phi: f64,
}

/// Offset strip fins brazed between flat plates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetFin {
    /// Fin spacing [m]
    pub s: f64,
    /// Fin height, equal to the channel gap [m]
    pub h: f64,
    /// Fin thickness [m]
    pub t: f64,
    /// Strip length in the flow direction [m]
    pub l: f64,
}

/// Smooth parallel-plate channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Smooth {
    /// Channel gap [m]
    pub b: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    Chevron(Chevron),
    OffsetFin(OffsetFin),
    Smooth(Smooth),
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Chevron(_) => GeometryKind::Chevron,
            Geometry::OffsetFin(_) => GeometryKind::OffsetFin,
            Geometry::Smooth(_) => GeometryKind::Smooth,
        }
    }

    /// Channel gap between plates [m].
    pub fn gap(&self) -> f64 {
        match self {
            Geometry::Chevron(g) => g.b,
            Geometry::OffsetFin(g) => g.h,
            Geometry::Smooth(g) => g.b,
        }
    }

    /// Hydraulic diameter [m].
    pub fn dh(&self) -> f64 {
        match self {
            Geometry::Chevron(g) => 2.0 * g.b / g.phi,
            Geometry::OffsetFin(g) => {
                4.0 * g.s * g.h * g.l / (2.0 * (g.s * g.l + g.h * g.l + g.t * g.h) + g.t * g.s)
            }
            Geometry::Smooth(g) => 2.0 * g.b,
        }
    }

    /// Fraction of the channel cross-section open to flow.
    pub fn open_fraction(&self) -> f64 {
        match self {
            Geometry::OffsetFin(g) => g.s / (g.s + g.t),
            _ => 1.0,
        }
    }

    /// Heat-transfer area per projected plate area.
    pub fn area_factor(&self) -> f64 {
        match self {
            Geometry::Chevron(g) => g.phi,
            _ => 1.0,
        }
    }

    pub fn validate(&self) -> CorrelationResult<()> {
        let positive = |v: f64, what: &'static str| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(CorrelationError::InvalidGeometry { what })
            }
        };
        match self {
            Geometry::Chevron(g) => {
                positive(g.b, "chevron gap must be positive")?;
                positive(g.pitch, "chevron pitch must be positive")?;
                if !(g.phi >= 1.0 && g.phi.is_finite()) {
                    return Err(CorrelationError::InvalidGeometry {
                        what: "enlargement factor must be >= 1",
                    });
                }
                if !(g.beta > 0.0 && g.beta < 90.0) {
                    return Err(CorrelationError::InvalidGeometry {
                        what: "chevron angle must lie in (0, 90) degrees",
                    });
                }
                Ok(())
            }
            Geometry::OffsetFin(g) => {
                positive(g.s, "fin spacing must be positive")?;
                positive(g.h, "fin height must be positive")?;
                positive(g.t, "fin thickness must be positive")?;
                positive(g.l, "strip length must be positive")
            }
            Geometry::Smooth(g) => positive(g.b, "channel gap must be positive"),
        }
    }
}
