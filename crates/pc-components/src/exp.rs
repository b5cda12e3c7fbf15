//! Basic expander defined by a pressure ratio and isentropic efficiency.

use pc_core::Defaults;
use pc_core::units::{Power, w};
use pc_fluids::{FlowState, PropertyBackend};

use crate::error::ComponentResult;
use crate::machine::{Direction, Machine};
use crate::traits::{Component, ComponentKind, SizeAttr, SizeSetup, unsupported};

/// Adiabatic expander (turbine).
///
/// `p_ratio = p_in / p_out`, and `h_out = h_in - eff_isentropic * (h_in - h_s)`.
/// `power()` is negative since the fluid does work on the shaft; sizing `m`
/// takes the produced power as a positive magnitude.
#[derive(Debug, Clone)]
pub struct ExpBasic {
    inner: Machine,
}

impl ExpBasic {
    pub fn new(
        name: impl Into<String>,
        p_ratio: f64,
        eff_isentropic: f64,
        defaults: &Defaults,
    ) -> ComponentResult<Self> {
        Ok(Self {
            inner: Machine::new(name.into(), Direction::Expand, p_ratio, eff_isentropic, defaults)?,
        })
    }

    pub fn with_inlet(mut self, inlet: FlowState) -> Self {
        self.inner.inlet = Some(inlet);
        self
    }

    pub fn with_outlet(mut self, outlet: FlowState) -> Self {
        self.inner.outlet = Some(outlet);
        self
    }

    pub fn p_ratio(&self) -> f64 {
        self.inner.p_ratio
    }

    pub fn eff_isentropic(&self) -> f64 {
        self.inner.eff_isentropic
    }
}

impl Component for ExpBasic {
    fn name(&self) -> &str {
        &self.inner.name
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Expander
    }

    fn inlet(&self) -> Option<&FlowState> {
        self.inner.inlet.as_ref()
    }

    fn outlet(&self) -> Option<&FlowState> {
        self.inner.outlet.as_ref()
    }

    fn set_inlet(&mut self, state: FlowState) {
        self.inner.inlet = Some(state);
    }

    fn set_outlet(&mut self, state: FlowState) {
        self.inner.outlet = Some(state);
    }

    fn run(&mut self, backend: &dyn PropertyBackend) -> ComponentResult<FlowState> {
        self.inner.run(backend)
    }

    fn size(&mut self, backend: &dyn PropertyBackend, setup: &SizeSetup) -> ComponentResult<f64> {
        match setup.attr {
            SizeAttr::Machine(attr) => self.inner.size(backend, attr, setup.bounds, setup.m),
            other => Err(unsupported(&self.inner.name, &other)),
        }
    }

    fn power(&self) -> Power {
        w(self.inner.power.unwrap_or(0.0))
    }

    fn values(&self) -> Vec<(String, f64)> {
        self.inner.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MachineAttr;
    use pc_core::units::{k, pa};
    use pc_fluids::{InputPair, MassFlow, PerfectGasModel, Species};

    fn hot_inlet(model: &PerfectGasModel) -> FlowState {
        FlowState::new(
            model,
            Species::He,
            InputPair::PT {
                p: pa(6.0e6),
                t: k(1100.0),
            },
            MassFlow::Known(1.0),
        )
        .unwrap()
    }

    #[test]
    fn expansion_produces_power() {
        let model = PerfectGasModel::new();
        let mut exp = ExpBasic::new("t", 2.0, 0.9, &Defaults::default())
            .unwrap()
            .with_inlet(hot_inlet(&model));
        let out = exp.run(&model).unwrap();
        assert!((out.p() - 3.0e6).abs() < 1e-6);
        assert!(out.t() < 1100.0);
        assert!(exp.power().value < 0.0);
    }

    #[test]
    fn efficiency_sizing_recovers_parameter() {
        let model = PerfectGasModel::new();
        let mut reference = ExpBasic::new("t", 2.0, 0.85, &Defaults::default())
            .unwrap()
            .with_inlet(hot_inlet(&model));
        let target = reference.run(&model).unwrap();

        let mut exp = ExpBasic::new("t", 2.0, 0.5, &Defaults::default())
            .unwrap()
            .with_inlet(hot_inlet(&model))
            .with_outlet(target);
        let eff = exp
            .size(&model, &SizeSetup::new(MachineAttr::EffIsen))
            .unwrap();
        assert!((eff - 0.85).abs() < 1e-9, "eff = {eff}");
        assert!((exp.eff_isentropic() - 0.85).abs() < 1e-9);
    }

    #[test]
    fn mass_flow_sizing_matches_power() {
        let model = PerfectGasModel::new();
        let mut reference = ExpBasic::new("t", 2.0, 0.9, &Defaults::default())
            .unwrap()
            .with_inlet(hot_inlet(&model));
        let target = reference.run(&model).unwrap();
        let produced = -reference.power().value;

        let mut exp = ExpBasic::new("t", 2.0, 0.9, &Defaults::default())
            .unwrap()
            .with_inlet(hot_inlet(&model))
            .with_outlet(target);
        let setup = SizeSetup::new(MachineAttr::M { power: 2.0 * produced }).with_bounds(0.5, 5.0);
        let m = exp.size(&model, &setup).unwrap();
        assert!((m - 2.0).abs() < 1e-5, "m = {m}");
        assert!((exp.power().value + 2.0 * produced).abs() < 1e-3 * produced);
    }
}
