//! Basic compressor defined by a pressure ratio and isentropic efficiency.

use pc_core::Defaults;
use pc_core::units::{Power, w};
use pc_fluids::{FlowState, PropertyBackend};

use crate::error::ComponentResult;
use crate::machine::{Direction, Machine};
use crate::traits::{Component, ComponentKind, SizeAttr, SizeSetup, unsupported};

/// Adiabatic compressor.
///
/// ## Model
///
/// ```text
/// p_out = p_in * p_ratio
/// h_out = h_in + (h_s(p_out, s_in) - h_in) / eff_isentropic
/// ```
///
/// `power()` is positive: the shaft does work on the fluid.
#[derive(Debug, Clone)]
pub struct CompBasic {
    inner: Machine,
}

impl CompBasic {
    /// # Errors
    /// Returns `InvalidArg` if `p_ratio < 1` or the efficiency is outside `(0, 1]`.
    pub fn new(
        name: impl Into<String>,
        p_ratio: f64,
        eff_isentropic: f64,
        defaults: &Defaults,
    ) -> ComponentResult<Self> {
        Ok(Self {
            inner: Machine::new(name.into(), Direction::Compress, p_ratio, eff_isentropic, defaults)?,
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

impl Component for CompBasic {
    fn name(&self) -> &str {
        &self.inner.name
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Compressor
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
    use crate::error::{ComponentError, ErrorClass};
    use crate::traits::MachineAttr;
    use pc_core::units::{k, pa};
    use pc_fluids::{InputPair, MassFlow, PerfectGasModel, Species};

    fn inlet(model: &PerfectGasModel) -> FlowState {
        FlowState::new(
            model,
            Species::He,
            InputPair::PT {
                p: pa(2.0e6),
                t: k(300.0),
            },
            MassFlow::Known(2.0),
        )
        .unwrap()
    }

    #[test]
    fn rejects_ratio_below_one() {
        assert!(CompBasic::new("c", 0.5, 0.9, &Defaults::default()).is_err());
        assert!(CompBasic::new("c", 2.0, 1.5, &Defaults::default()).is_err());
    }

    #[test]
    fn ideal_compression_matches_perfect_gas() {
        let model = PerfectGasModel::new();
        let mut comp = CompBasic::new("c", 2.0, 1.0, &Defaults::default())
            .unwrap()
            .with_inlet(inlet(&model));
        let out = comp.run(&model).unwrap();
        assert!((out.p() - 4.0e6).abs() < 1e-6);
        // T2/T1 = r^((gamma-1)/gamma) with gamma = 5/3
        let expected = 300.0 * 2f64.powf(0.4);
        assert!((out.t() - expected).abs() < 1e-6 * expected, "T = {}", out.t());
        assert!(comp.power().value > 0.0);
    }

    #[test]
    fn losses_raise_outlet_temperature() {
        let model = PerfectGasModel::new();
        let mut ideal = CompBasic::new("c", 2.0, 1.0, &Defaults::default())
            .unwrap()
            .with_inlet(inlet(&model));
        let mut real = CompBasic::new("c", 2.0, 0.8, &Defaults::default())
            .unwrap()
            .with_inlet(inlet(&model));
        let t_ideal = ideal.run(&model).unwrap().t();
        let t_real = real.run(&model).unwrap().t();
        assert!(t_real > t_ideal);
        assert!(real.power().value > ideal.power().value);
    }

    fn outlet_at(model: &PerfectGasModel, p: f64) -> FlowState {
        FlowState::new(model, Species::He, InputPair::PT { p: pa(p), t: k(400.0) }, MassFlow::Known(2.0)).unwrap()
    }

    #[test]
    fn bracketed_ratio_sizing() {
        let model = PerfectGasModel::new();
        let mut comp = CompBasic::new("c", 1.0, 0.9, &Defaults::default())
            .unwrap()
            .with_inlet(inlet(&model))
            .with_outlet(outlet_at(&model, 5.0e6));
        let ratio = comp
            .size(&model, &SizeSetup::new(MachineAttr::PRatio).with_bounds(1.0, 4.0))
            .unwrap();
        assert!((ratio - 2.5).abs() < 1e-6, "ratio = {ratio}");
        assert_eq!(comp.p_ratio(), ratio);
    }

    #[test]
    fn bracketed_ratio_below_one_is_infeasible() {
        let model = PerfectGasModel::new();
        let mut comp = CompBasic::new("c", 2.0, 0.9, &Defaults::default())
            .unwrap()
            .with_inlet(inlet(&model))
            .with_outlet(outlet_at(&model, 1.5e6));
        let err = comp
            .size(&model, &SizeSetup::new(MachineAttr::PRatio).with_bounds(0.5, 2.0))
            .unwrap_err();
        assert!(matches!(err, ComponentError::Infeasible { .. }), "{err}");
        assert_eq!(err.class(), ErrorClass::Infeasible);
        assert_eq!(comp.p_ratio(), 2.0);
    }
}
