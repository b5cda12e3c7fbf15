//! Input pairs that fix a thermodynamic state.

use std::fmt;

use pc_core::units::{Pressure, Temperature};

use crate::error::{FluidError, FluidResult};

/// Specific enthalpy [J/kg].
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type SpecEnthalpy = f64;

/// Specific entropy [J/(kg·K)].
pub type SpecEntropy = f64;

/// Specific heat capacity [J/(kg·K)].
pub type SpecHeatCapacity = f64;

/// Two independent properties that fully determine a state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputPair {
    /// Pressure and temperature.
    PT { p: Pressure, t: Temperature },
    /// Pressure and specific enthalpy.
    PH { p: Pressure, h: SpecEnthalpy },
    /// Pressure and specific entropy.
    PS { p: Pressure, s: SpecEntropy },
    /// Pressure and vapour quality.
    PQ { p: Pressure, q: f64 },
    /// Temperature and vapour quality.
    TQ { t: Temperature, q: f64 },
    /// Specific enthalpy and specific entropy.
    HS { h: SpecEnthalpy, s: SpecEntropy },
    /// Density [kg/m³] and temperature.
    DT { rho: f64, t: Temperature },
}

impl InputPair {
    /// Short tag, e.g. `"PH"`.
    pub fn kind(&self) -> &'static str {
        match self {
            InputPair::PT { .. } => "PT",
            InputPair::PH { .. } => "PH",
            InputPair::PS { .. } => "PS",
            InputPair::PQ { .. } => "PQ",
            InputPair::TQ { .. } => "TQ",
            InputPair::HS { .. } => "HS",
            InputPair::DT { .. } => "DT",
        }
    }

    /// Reject inputs that are not physically meaningful before reaching a backend.
    pub fn validate(&self) -> FluidResult<()> {
        let positive = |v: f64, what: &'static str| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(FluidError::NonPhysical { what })
            }
        };
        let finite = |v: f64, what: &'static str| {
            if v.is_finite() {
                Ok(())
            } else {
                Err(FluidError::NonPhysical { what })
            }
        };
        let quality = |q: f64| {
            if (0.0..=1.0).contains(&q) {
                Ok(())
            } else {
                Err(FluidError::NonPhysical {
                    what: "quality must lie in [0, 1]",
                })
            }
        };

        match *self {
            InputPair::PT { p, t } => {
                positive(p.value, "pressure must be positive and finite")?;
                positive(t.value, "temperature must be positive and finite")
            }
            InputPair::PH { p, h } => {
                positive(p.value, "pressure must be positive and finite")?;
                finite(h, "enthalpy must be finite")
            }
            InputPair::PS { p, s } => {
                positive(p.value, "pressure must be positive and finite")?;
                finite(s, "entropy must be finite")
            }
            InputPair::PQ { p, q } => {
                positive(p.value, "pressure must be positive and finite")?;
                quality(q)
            }
            InputPair::TQ { t, q } => {
                positive(t.value, "temperature must be positive and finite")?;
                quality(q)
            }
            InputPair::HS { h, s } => {
                finite(h, "enthalpy must be finite")?;
                finite(s, "entropy must be finite")
            }
            InputPair::DT { rho, t } => {
                positive(rho, "density must be positive and finite")?;
                positive(t.value, "temperature must be positive and finite")
            }
        }
    }
}

impl fmt::Display for InputPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputPair::PT { p, t } => write!(f, "PT(p={} Pa, T={} K)", p.value, t.value),
            InputPair::PH { p, h } => write!(f, "PH(p={} Pa, h={h} J/kg)", p.value),
            InputPair::PS { p, s } => write!(f, "PS(p={} Pa, s={s} J/kg/K)", p.value),
            InputPair::PQ { p, q } => write!(f, "PQ(p={} Pa, q={q})", p.value),
            InputPair::TQ { t, q } => write!(f, "TQ(T={} K, q={q})", t.value),
            InputPair::HS { h, s } => write!(f, "HS(h={h} J/kg, s={s} J/kg/K)"),
            InputPair::DT { rho, t } => write!(f, "DT(rho={rho} kg/m3, T={} K)", t.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_core::units::{k, pa};

    #[test]
    fn validates_positive_pressure() {
        let bad = InputPair::PT {
            p: pa(-1.0),
            t: k(300.0),
        };
        assert!(bad.validate().is_err());

        let good = InputPair::PH {
            p: pa(1.0e5),
            h: -2.0e4,
        };
        assert!(good.validate().is_ok());
    }

    #[test]
    fn quality_outside_dome_rejected() {
        let bad = InputPair::PQ {
            p: pa(1.0e5),
            q: 1.2,
        };
        assert!(matches!(
            bad.validate(),
            Err(FluidError::NonPhysical { .. })
        ));
    }

    #[test]
    fn display_names_the_pair() {
        let pair = InputPair::TQ { t: k(300.0), q: 0.5 };
        assert_eq!(pair.kind(), "TQ");
        assert!(pair.to_string().starts_with("TQ("));
    }
}
