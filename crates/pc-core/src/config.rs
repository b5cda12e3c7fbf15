//! Solver defaults.
//!
//! A single `Defaults` value is built at the composition root (from
//! `Defaults::default()` or a YAML document) and passed by reference to every
//! component and cycle constructor. There is no process-wide mutable copy.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::numeric::Tolerances;
use crate::root::RootOptions;

/// Property compared between cycle iterations to decide convergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TolAttr {
    /// Specific enthalpy.
    #[default]
    #[serde(rename = "h")]
    H,
    /// Pressure.
    #[serde(rename = "p")]
    P,
    /// Temperature.
    #[serde(rename = "T")]
    T,
    /// Specific entropy.
    #[serde(rename = "s")]
    S,
    /// Density.
    #[serde(rename = "rho")]
    Rho,
}

impl std::str::FromStr for TolAttr {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "h" => Ok(TolAttr::H),
            "p" => Ok(TolAttr::P),
            "T" => Ok(TolAttr::T),
            "s" => Ok(TolAttr::S),
            "rho" => Ok(TolAttr::Rho),
            other => Err(CoreError::InvalidConfig {
                what: format!("unknown convergence attribute '{other}'"),
            }),
        }
    }
}

/// Tolerances, iteration caps and discretisation settings shared by the solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Attribute compared between cycle iterations.
    pub tol_attr: TolAttr,
    pub tol_abs: f64,
    pub tol_rel: f64,
    /// Absolute tolerance on vapour quality when classifying saturated states.
    pub tol_abs_x: f64,
    /// Temperature step [K] for single-phase heat-exchanger segments.
    pub div_t: f64,
    /// Quality step for two-phase heat-exchanger segments.
    pub div_x: f64,
    pub max_iter_cycle: usize,
    pub max_iter_component: usize,
    /// Upper bound on heat-exchanger wall segments.
    pub max_walls: usize,
    pub try_build_phase_envelope: bool,
    /// Gravitational acceleration [m/s²] for static head terms.
    pub gravity: f64,
    pub dp_port_in_factor: f64,
    pub dp_port_out_factor: f64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            tol_attr: TolAttr::H,
            tol_abs: 1e-7,
            tol_rel: 1e-7,
            tol_abs_x: 1e-10,
            div_t: 5.0,
            div_x: 0.1,
            max_iter_cycle: 50,
            max_iter_component: 50,
            max_walls: 200,
            try_build_phase_envelope: true,
            gravity: 9.806_65,
            dp_port_in_factor: 1.0,
            dp_port_out_factor: 0.4,
        }
    }
}

impl Defaults {
    /// Parse defaults from YAML; keys not present keep their default values.
    pub fn from_yaml_str(content: &str) -> CoreResult<Self> {
        let defaults: Defaults = serde_yaml::from_str(content)?;
        defaults.validate()?;
        Ok(defaults)
    }

    pub fn to_yaml_string(&self) -> CoreResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject settings the solver cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        let invalid = |what: String| Err(CoreError::InvalidConfig { what });

        if self.max_iter_cycle == 0 {
            return invalid(format!("max_iter_cycle must be >0, {} is invalid", self.max_iter_cycle));
        }
        if self.max_iter_component == 0 {
            return invalid(format!(
                "max_iter_component must be >0, {} is invalid",
                self.max_iter_component
            ));
        }
        if self.max_walls <= 1 {
            return invalid(format!("max_walls must be >1, {} is invalid", self.max_walls));
        }
        for (name, value) in [
            ("tol_abs", self.tol_abs),
            ("tol_rel", self.tol_rel),
            ("tol_abs_x", self.tol_abs_x),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{name} must be finite and >=0, {value} is invalid"));
            }
        }
        for (name, value) in [("div_t", self.div_t), ("div_x", self.div_x)] {
            if !value.is_finite() || value <= 0.0 {
                return invalid(format!("{name} must be finite and >0, {value} is invalid"));
            }
        }
        if self.div_x > 1.0 {
            return invalid(format!("div_x must be <=1, {} is invalid", self.div_x));
        }
        for (name, value) in [
            ("gravity", self.gravity),
            ("dp_port_in_factor", self.dp_port_in_factor),
            ("dp_port_out_factor", self.dp_port_out_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{name} must be finite and >=0, {value} is invalid"));
            }
        }
        Ok(())
    }

    pub fn tolerances(&self) -> Tolerances {
        Tolerances {
            abs: self.tol_abs,
            rel: self.tol_rel,
        }
    }

    /// Root-finder settings for component sizing.
    pub fn component_root_options(&self) -> RootOptions {
        RootOptions {
            tol: self.tolerances(),
            max_iter: self.max_iter_component,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let d = Defaults::default();
        d.validate().unwrap();
        assert_eq!(d.tol_attr, TolAttr::H);
        assert_eq!(d.max_walls, 200);
        assert_eq!(d.max_iter_cycle, 50);
        assert!(d.try_build_phase_envelope);
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let d = Defaults::from_yaml_str("max_iter_cycle: 80\ndiv_t: 2.5\ntol_attr: T\n").unwrap();
        assert_eq!(d.max_iter_cycle, 80);
        assert_eq!(d.div_t, 2.5);
        assert_eq!(d.tol_attr, TolAttr::T);
        assert_eq!(d.max_walls, 200);
        assert_eq!(d.tol_rel, 1e-7);
    }

    #[test]
    fn yaml_round_trip_preserves_overrides() {
        let d = Defaults {
            max_walls: 12,
            try_build_phase_envelope: false,
            ..Defaults::default()
        };
        let text = d.to_yaml_string().unwrap();
        assert_eq!(Defaults::from_yaml_str(&text).unwrap(), d);
    }

    #[test]
    fn rejects_invalid_caps() {
        let err = Defaults::from_yaml_str("max_walls: 1\n").unwrap_err();
        assert!(err.to_string().contains("max_walls"));

        let d = Defaults {
            max_iter_component: 0,
            ..Defaults::default()
        };
        assert!(d.validate().is_err());
    }

    #[test]
    fn rejects_unknown_keys_type_mismatch() {
        assert!(Defaults::from_yaml_str("max_iter_cycle: lots\n").is_err());
    }

    #[test]
    fn tol_attr_from_str() {
        assert_eq!("rho".parse::<TolAttr>().unwrap(), TolAttr::Rho);
        assert!("x".parse::<TolAttr>().is_err());
    }
}
