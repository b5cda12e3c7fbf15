//! Basic cooler: removes a set amount of heat at constant pressure.

use pc_core::Defaults;
use pc_core::units::{Power, w};
use pc_fluids::{FlowState, PropertyBackend};

use crate::basic::{BasicAttr, BasicHeat};
use crate::common::{check_efficiency, check_finite};
use crate::error::ComponentResult;
use crate::traits::{Component, ComponentKind, CoolerAttr, SizeAttr, SizeSetup, unsupported};

/// Cooler with a fixed heat removal rate.
///
/// `q_cool` is the heat drawn from the working fluid before efficiency is
/// applied; the fluid loses `q_cool * efficiency` and `duty()` reports `-q_cool`.
#[derive(Debug, Clone)]
pub struct ClrBasic {
    inner: BasicHeat,
}

impl ClrBasic {
    /// # Errors
    /// Returns `InvalidArg` for a non-finite duty or an efficiency outside `(0, 1]`.
    pub fn new(
        name: impl Into<String>,
        q_cool: f64,
        efficiency: f64,
        defaults: &Defaults,
    ) -> ComponentResult<Self> {
        check_finite(q_cool, "cooler duty")?;
        check_efficiency(efficiency, "cooler efficiency must be in (0,1]")?;
        Ok(Self {
            inner: BasicHeat {
                name: name.into(),
                sign: -1.0,
                q_key: "QCool",
                q: q_cool,
                efficiency,
                inlet: None,
                outlet: None,
                defaults: defaults.clone(),
            },
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

    pub fn q_cool(&self) -> f64 {
        self.inner.q
    }

    pub fn efficiency(&self) -> f64 {
        self.inner.efficiency
    }
}

impl Component for ClrBasic {
    fn name(&self) -> &str {
        &self.inner.name
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Cooler
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
        let attr = match setup.attr {
            SizeAttr::Cooler(CoolerAttr::QCool) => BasicAttr::Q,
            SizeAttr::Cooler(CoolerAttr::M) => BasicAttr::M,
            SizeAttr::Cooler(CoolerAttr::Efficiency) => BasicAttr::Efficiency,
            other => return Err(unsupported(&self.inner.name, &other)),
        };
        self.inner.size(backend, attr, setup.bounds, setup.m)
    }

    fn duty(&self) -> Power {
        w(self.inner.duty())
    }

    fn values(&self) -> Vec<(String, f64)> {
        self.inner.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComponentError;
    use pc_core::units::{k, mpa};
    use pc_fluids::{InputPair, MassFlow, PerfectGasModel, Species};
    use proptest::prelude::*;

    #[test]
    fn rejects_bad_parameters() {
        let d = Defaults::default();
        assert!(ClrBasic::new("clr", 1.0e6, 0.0, &d).is_err());
        assert!(ClrBasic::new("clr", f64::NAN, 1.0, &d).is_err());
        assert!(ClrBasic::new("clr", 1.0e6, 1.0, &d).is_ok());
    }

    #[test]
    fn duty_is_negative() {
        let clr = ClrBasic::new("clr", 2.0e6, 0.5, &Defaults::default()).unwrap();
        assert_eq!(clr.duty().value, -2.0e6);
        assert_eq!(clr.kind(), ComponentKind::Cooler);
    }

    #[test]
    fn run_needs_inlet() {
        let mut clr = ClrBasic::new("clr", 1.0e6, 1.0, &Defaults::default()).unwrap();
        let backend = PerfectGasModel::new();
        let err = clr.run(&backend).unwrap_err();
        assert!(matches!(err, ComponentError::Config { .. }));
    }

    #[test]
    fn foreign_attribute_is_refused() {
        let mut clr = ClrBasic::new("clr", 1.0e6, 1.0, &Defaults::default()).unwrap();
        let backend = PerfectGasModel::new();
        let setup = SizeSetup::new(crate::traits::HxAttr::L);
        let err = clr.size(&backend, &setup).unwrap_err();
        assert!(matches!(err, ComponentError::UnsupportedAttr { .. }));
    }

    proptest! {
        #[test]
        fn heat_removed_matches_duty(q in 1.0e3..1.0e6_f64, eff in 0.05..1.0_f64, m in 1.0..10.0_f64) {
            let backend = PerfectGasModel::new();
            let inlet = FlowState::new(
                &backend,
                Species::He,
                InputPair::PT { p: mpa(2.0), t: k(1000.0) },
                MassFlow::Known(m),
            )
            .unwrap();
            let mut clr = ClrBasic::new("clr", q, eff, &Defaults::default()).unwrap().with_inlet(inlet.clone());
            let outlet = clr.run(&backend).unwrap();
            let removed = m * (inlet.h() - outlet.h());
            prop_assert!((removed - q * eff).abs() <= 1e-6 * q);
            prop_assert_eq!(outlet.p(), inlet.p());
        }
    }
}
