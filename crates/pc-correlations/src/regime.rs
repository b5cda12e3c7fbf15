//! Keys of the correlation table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Plate surface class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryKind {
    Chevron,
    OffsetFin,
    Smooth,
}

/// Which quantity a correlation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transfer {
    Heat,
    Friction,
}

/// Working fluid or secondary fluid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Wf,
    Sf,
}

/// Local flow regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Regime {
    /// Single phase above the critical point.
    #[serde(rename = "sp")]
    Sp,
    #[serde(rename = "liq")]
    Liq,
    #[serde(rename = "vap")]
    Vap,
    #[serde(rename = "tpEvap")]
    TpEvap,
    #[serde(rename = "tpCond")]
    TpCond,
}

impl Regime {
    pub const ALL: [Regime; 5] = [
        Regime::Sp,
        Regime::Liq,
        Regime::Vap,
        Regime::TpEvap,
        Regime::TpCond,
    ];

    pub const SINGLE_PHASE: [Regime; 3] = [Regime::Sp, Regime::Liq, Regime::Vap];

    pub fn is_two_phase(self) -> bool {
        matches!(self, Regime::TpEvap | Regime::TpCond)
    }

    pub fn key(self) -> &'static str {
        match self {
            Regime::Sp => "sp",
            Regime::Liq => "liq",
            Regime::Vap => "vap",
            Regime::TpEvap => "tpEvap",
            Regime::TpCond => "tpCond",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GeometryKind::Chevron => "chevron",
            GeometryKind::OffsetFin => "offset-fin",
            GeometryKind::Smooth => "smooth",
        })
    }
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Transfer::Heat => "heat",
            Transfer::Friction => "friction",
        })
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Wf => "wf",
            Side::Sf => "sf",
        })
    }
}
