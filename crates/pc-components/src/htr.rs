//! Basic heater: adds a set amount of heat at constant pressure.

use pc_core::Defaults;
use pc_core::units::{Power, w};
use pc_fluids::{FlowState, PropertyBackend};

use crate::basic::{BasicAttr, BasicHeat};
use crate::common::{check_efficiency, check_finite};
use crate::error::ComponentResult;
use crate::traits::{Component, ComponentKind, HeaterAttr, SizeAttr, SizeSetup, unsupported};

/// Heater with a fixed heat input rate.
///
/// `q_heat` is the heat supplied before efficiency is applied; the fluid
/// gains `q_heat * efficiency` and `duty()` reports `q_heat`.
#[derive(Debug, Clone)]
pub struct HtrBasic {
    inner: BasicHeat,
}

impl HtrBasic {
    /// # Errors
    /// Returns `InvalidArg` for a non-finite duty or an efficiency outside `(0, 1]`.
    pub fn new(
        name: impl Into<String>,
        q_heat: f64,
        efficiency: f64,
        defaults: &Defaults,
    ) -> ComponentResult<Self> {
        check_finite(q_heat, "heater duty")?;
        check_efficiency(efficiency, "heater efficiency must be in (0,1]")?;
        Ok(Self {
            inner: BasicHeat {
                name: name.into(),
                sign: 1.0,
                q_key: "QHeat",
                q: q_heat,
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

    pub fn q_heat(&self) -> f64 {
        self.inner.q
    }

    pub fn efficiency(&self) -> f64 {
        self.inner.efficiency
    }
}

impl Component for HtrBasic {
    fn name(&self) -> &str {
        &self.inner.name
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Heater
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
            SizeAttr::Heater(HeaterAttr::QHeat) => BasicAttr::Q,
            SizeAttr::Heater(HeaterAttr::M) => BasicAttr::M,
            SizeAttr::Heater(HeaterAttr::Efficiency) => BasicAttr::Efficiency,
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
