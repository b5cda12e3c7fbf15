//! Read-only cycle results.

use pc_components::ComponentSnapshot;
use pc_core::units::{Power, w};
use pc_fluids::FlowState;
use serde::Serialize;

/// Progress of the outer loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CycleStatus {
    #[default]
    Unconverged,
    Iterating { iteration: usize },
    Converged { iterations: usize },
    MaxIterExceeded { iterations: usize, residual: f64 },
}

impl CycleStatus {
    pub fn is_converged(&self) -> bool {
        matches!(self, CycleStatus::Converged { .. })
    }
}

/// Where the closing state point's starting value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedSource {
    /// State supplied by the caller, or the previous converged state.
    Given,
    /// Saturated liquid from the phase envelope at the seed pressure.
    Envelope,
    /// Caller's state, after a failed attempt from the envelope seed.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSnapshot {
    pub name: String,
    /// [Pa]
    pub p: f64,
    /// [K]
    pub t: f64,
    /// [J/kg]
    pub h: f64,
    /// [J/(kg·K)]
    pub s: f64,
    pub quality: Option<f64>,
    /// [kg/s]
    pub m: Option<f64>,
}

impl PointSnapshot {
    pub fn new(name: &str, state: &FlowState) -> Self {
        Self {
            name: name.to_owned(),
            p: state.p(),
            t: state.t(),
            h: state.h(),
            s: state.s(),
            quality: state.quality(),
            m: state.mass_flow().value(),
        }
    }
}

/// Cycle totals and per-component results.
///
/// `net_power` is shaft power delivered by the working fluid; `heat_in` and
/// `heat_rejected` are both non-negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleSolution {
    pub status: CycleStatus,
    pub seed: SeedSource,
    pub iterations: usize,
    pub residual: f64,
    /// Pressure leaving the closing component minus the seed pressure [Pa].
    /// Zero for open chains and for loops whose pressure changes cancel.
    pub pressure_closure: f64,
    pub net_power: f64,
    pub heat_in: f64,
    pub heat_rejected: f64,
    /// `net_power / heat_in`, absent when no heat enters the cycle.
    pub efficiency: Option<f64>,
    pub components: Vec<ComponentSnapshot>,
    pub points: Vec<PointSnapshot>,
    pub elapsed_s: f64,
}

impl CycleSolution {
    pub fn net_power(&self) -> Power {
        w(self.net_power)
    }

    pub fn component(&self, name: &str) -> Option<&ComponentSnapshot> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn point(&self, name: &str) -> Option<&PointSnapshot> {
        self.points.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Totals {
    pub net_power: f64,
    pub heat_in: f64,
    pub heat_rejected: f64,
    pub components: Vec<ComponentSnapshot>,
}

impl Totals {
    pub fn from_snapshots(components: Vec<ComponentSnapshot>) -> Self {
        let mut totals = Self::default();
        for comp in &components {
            totals.net_power -= comp.power;
            if comp.duty > 0.0 {
                totals.heat_in += comp.duty;
            } else {
                totals.heat_rejected -= comp.duty;
            }
        }
        totals.components = components;
        totals
    }

    pub fn efficiency(&self) -> Option<f64> {
        (self.heat_in > 0.0).then(|| self.net_power / self.heat_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_components::ComponentKind;

    fn snap(name: &str, kind: ComponentKind, duty: f64, power: f64) -> ComponentSnapshot {
        ComponentSnapshot {
            name: name.into(),
            kind,
            duty,
            power,
            dp: 0.0,
            values: Vec::new(),
        }
    }

    #[test]
    fn totals_follow_sign_convention() {
        let totals = Totals::from_snapshots(vec![
            snap("comp", ComponentKind::Compressor, 0.0, 40.0),
            snap("htr", ComponentKind::Heater, 100.0, 0.0),
            snap("exp", ComponentKind::Expander, 0.0, -70.0),
            snap("clr", ComponentKind::Cooler, -70.0, 0.0),
        ]);
        assert_eq!(totals.net_power, 30.0);
        assert_eq!(totals.heat_in, 100.0);
        assert_eq!(totals.heat_rejected, 70.0);
        assert_eq!(totals.efficiency(), Some(0.3));
    }

    #[test]
    fn no_heat_no_efficiency() {
        let totals = Totals::from_snapshots(vec![snap("comp", ComponentKind::Compressor, 0.0, 5.0)]);
        assert_eq!(totals.efficiency(), None);
        assert_eq!(totals.net_power, -5.0);
    }

    #[test]
    fn status_serializes_with_tag() {
        let json = serde_json::to_string(&CycleStatus::Converged { iterations: 3 }).unwrap();
        assert_eq!(json, r#"{"state":"converged","iterations":3}"#);
    }
}
