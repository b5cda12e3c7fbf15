//! Property backend trait and the property set it produces.

use pc_core::units::{Pressure, Temperature, k, pa};
use serde::Serialize;

use crate::error::{FluidError, FluidResult};
use crate::species::Species;
use crate::state::InputPair;

/// Phase of a single state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Liquid,
    Vapour,
    TwoPhase,
    /// Above the critical pressure or temperature.
    Supercritical,
}

impl Phase {
    pub fn is_two_phase(self) -> bool {
        matches!(self, Phase::TwoPhase)
    }

    /// Phase of a saturated state with vapour quality `q`. Qualities within
    /// `tol_x` of 0 or 1 count as saturated liquid or saturated vapour.
    pub fn from_quality(q: f64, tol_x: f64) -> Phase {
        if q <= tol_x {
            Phase::Liquid
        } else if q >= 1.0 - tol_x {
            Phase::Vapour
        } else {
            Phase::TwoPhase
        }
    }
}

/// Every property derived from one evaluated state, SI units throughout.
///
/// Transport properties are `None` where the backend cannot produce them
/// (CoolProp inside the dome, for example).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThermoProps {
    /// Pressure [Pa]
    pub p: f64,
    /// Temperature [K]
    pub t: f64,
    /// Specific enthalpy [J/kg]
    pub h: f64,
    /// Specific entropy [J/(kg·K)]
    pub s: f64,
    /// Density [kg/m³]
    pub rho: f64,
    /// Vapour quality, only inside the dome.
    pub quality: Option<f64>,
    pub phase: Phase,
    /// Isobaric specific heat [J/(kg·K)]
    pub cp: Option<f64>,
    /// Dynamic viscosity [Pa·s]
    pub mu: Option<f64>,
    /// Thermal conductivity [W/(m·K)]
    pub k: Option<f64>,
}

/// Transport properties required by single-phase correlations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transport {
    pub cp: f64,
    pub mu: f64,
    pub k: f64,
}

impl Transport {
    pub fn prandtl(&self) -> f64 {
        self.cp * self.mu / self.k
    }
}

impl ThermoProps {
    pub fn pressure(&self) -> Pressure {
        pa(self.p)
    }

    pub fn temperature(&self) -> Temperature {
        k(self.t)
    }

    pub fn prandtl(&self) -> Option<f64> {
        Some(self.cp? * self.mu? / self.k?)
    }

    /// Transport properties, or an error naming the first one missing.
    pub fn transport(&self, species: Species) -> FluidResult<Transport> {
        let missing = |what| FluidError::Unavailable {
            what,
            species,
            p: self.p,
            t: self.t,
        };
        Ok(Transport {
            cp: self.cp.ok_or_else(|| missing("cp"))?,
            mu: self.mu.ok_or_else(|| missing("viscosity"))?,
            k: self.k.ok_or_else(|| missing("conductivity"))?,
        })
    }
}

/// Saturated liquid and vapour at one pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Saturation {
    /// Pressure [Pa]
    pub p: f64,
    /// Saturation temperature [K]
    pub t_sat: f64,
    pub liquid: ThermoProps,
    pub vapour: ThermoProps,
    /// Surface tension [N/m]
    pub sigma: Option<f64>,
}

impl Saturation {
    /// Latent heat of vaporisation [J/kg].
    pub fn h_fg(&self) -> f64 {
        self.vapour.h - self.liquid.h
    }

    /// Quality of an enthalpy at this pressure, unclamped.
    pub fn quality_of(&self, h: f64) -> f64 {
        (h - self.liquid.h) / self.h_fg()
    }

    /// Whether `h` lies strictly inside the dome, more than `tol_x` in
    /// quality away from either saturation line.
    pub fn is_inside(&self, h: f64, tol_x: f64) -> bool {
        Phase::from_quality(self.quality_of(h), tol_x).is_two_phase()
    }
}

/// Equation-of-state backend.
///
/// Implementations must be thread-safe (Send + Sync). Every state the solver
/// touches goes through `props`; the backend validates its own range and
/// reports `FluidError::Infeasible` outside it.
pub trait PropertyBackend: Send + Sync {
    /// Backend name (for logging).
    fn name(&self) -> &str;

    fn supports(&self, species: Species) -> bool;

    /// Evaluate the full property set from an input pair.
    fn props(&self, species: Species, input: InputPair) -> FluidResult<ThermoProps>;

    /// Saturated states at pressure `p`.
    fn saturation(&self, species: Species, p: Pressure) -> FluidResult<Saturation>;
}

/// Validation helpers for property values.
pub mod validation {
    use super::*;

    pub fn validate_props(props: &ThermoProps) -> FluidResult<()> {
        if !props.p.is_finite() || props.p <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        if !props.t.is_finite() || props.t <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        if !props.rho.is_finite() || props.rho <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "density must be positive and finite",
            });
        }
        if !props.h.is_finite() || !props.s.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "enthalpy and entropy must be finite",
            });
        }
        Ok(())
    }

    /// Keep a transport value only if it is positive and finite.
    pub fn positive(value: Option<f64>) -> Option<f64> {
        value.filter(|v| v.is_finite() && *v > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ThermoProps {
        ThermoProps {
            p: 1.0e5,
            t: 300.0,
            h: 3.0e5,
            s: 1.0e3,
            rho: 1.2,
            quality: None,
            phase: Phase::Vapour,
            cp: Some(1000.0),
            mu: Some(2.0e-5),
            k: Some(0.025),
        }
    }

    #[test]
    fn prandtl_from_transport() {
        let props = sample();
        let pr = props.prandtl().unwrap();
        assert!((pr - 0.8).abs() < 1e-12);
        assert_eq!(props.transport(Species::Air).unwrap().prandtl(), pr);
    }

    #[test]
    fn missing_transport_is_reported() {
        let props = ThermoProps {
            mu: None,
            ..sample()
        };
        let err = props.transport(Species::Air).unwrap_err();
        assert!(err.to_string().contains("viscosity"));
    }

    #[test]
    fn validation_rejects_negative_density() {
        let props = ThermoProps {
            rho: -1.0,
            ..sample()
        };
        assert!(validation::validate_props(&props).is_err());
        assert!(validation::validate_props(&sample()).is_ok());
    }

    #[test]
    fn saturation_quality() {
        let liquid = ThermoProps {
            h: 1.0e5,
            phase: Phase::Liquid,
            ..sample()
        };
        let vapour = ThermoProps {
            h: 3.0e5,
            ..sample()
        };
        let sat = Saturation {
            p: 1.0e5,
            t_sat: 300.0,
            liquid,
            vapour,
            sigma: None,
        };
        assert_eq!(sat.h_fg(), 2.0e5);
        assert!((sat.quality_of(2.0e5) - 0.5).abs() < 1e-12);
        assert!(sat.is_inside(2.0e5, 1e-10));
        // 1e-6 in quality above saturated liquid
        assert!(sat.is_inside(1.0e5 + 0.2, 1e-10));
        assert!(!sat.is_inside(1.0e5 + 0.2, 1e-4));
        assert!(!sat.is_inside(3.0e5 - 0.2, 1e-4));
    }

    #[test]
    fn quality_tolerance_snaps_to_saturation_lines() {
        assert_eq!(Phase::from_quality(0.0, 1e-10), Phase::Liquid);
        assert_eq!(Phase::from_quality(1e-12, 1e-10), Phase::Liquid);
        assert_eq!(Phase::from_quality(1e-12, 0.0), Phase::TwoPhase);
        assert_eq!(Phase::from_quality(0.5, 1e-10), Phase::TwoPhase);
        assert_eq!(Phase::from_quality(1.0 - 1e-12, 1e-10), Phase::Vapour);
        assert_eq!(Phase::from_quality(1.0 - 1e-12, 0.0), Phase::TwoPhase);
        assert_eq!(Phase::from_quality(1.0, 0.0), Phase::Vapour);
    }
}
