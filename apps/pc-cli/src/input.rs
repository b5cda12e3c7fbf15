//! YAML input documents for the `size-cooler` and `run-cycle` commands.

use std::collections::HashMap;

use pc_components::{
    ClrBasic, CompBasic, Component, ComponentError, CoolerAttr, ExpBasic, HtrBasic, HxPlate, PlateLayout,
    SizeSetup,
};
use pc_core::units::{k, pa};
use pc_core::{Defaults, PointId};
use pc_correlations::{MethodEntry, MethodTable};
use pc_fluids::{CoolPropModel, FlowState, InputPair, MassFlow, PerfectGasModel, PropertyBackend, Species};
use pc_graph::GraphBuilder;
use pc_solver::Cycle;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[default]
    #[serde(rename = "coolprop")]
    CoolProp,
    PerfectGas,
}

impl BackendKind {
    pub fn build(self, defaults: &Defaults) -> Box<dyn PropertyBackend> {
        match self {
            BackendKind::CoolProp => Box::new(CoolPropModel::with_defaults(defaults)),
            BackendKind::PerfectGas => Box::new(PerfectGasModel::new()),
        }
    }
}

/// A state fixed by pressure and either temperature or enthalpy.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateInput {
    /// [Pa]
    pub p: f64,
    /// [K]
    pub t: Option<f64>,
    /// [J/kg]
    pub h: Option<f64>,
    /// [kg/s]
    pub m: Option<f64>,
}

impl StateInput {
    pub fn resolve(&self, backend: &dyn PropertyBackend, species: Species) -> AppResult<FlowState> {
        let input = match (self.t, self.h) {
            (Some(t), None) => InputPair::PT { p: pa(self.p), t: k(t) },
            (None, Some(h)) => InputPair::PH { p: pa(self.p), h },
            _ => {
                return Err(AppError::Input {
                    what: "a state needs exactly one of `t` or `h` next to `p`".into(),
                });
            }
        };
        let m = self.m.map_or(MassFlow::Unresolved, MassFlow::Known);
        Ok(FlowState::new(backend, species, input, m)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoolerTarget {
    QCool,
    M,
    Efficiency,
}

/// Cooler sizing problem: find one attribute so the inlet reaches the outlet.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoolerSizing {
    #[serde(default = "default_cooler_name")]
    pub name: String,
    pub species: Species,
    #[serde(default)]
    pub backend: BackendKind,
    pub inlet: StateInput,
    pub outlet: StateInput,
    #[serde(default)]
    pub q_cool: f64,
    #[serde(default = "one")]
    pub efficiency: f64,
    pub size: CoolerTarget,
    pub bounds: Option<[f64; 2]>,
}

fn default_cooler_name() -> String {
    "cooler".into()
}

fn one() -> f64 {
    1.0
}

impl CoolerSizing {
    pub fn cooler(&self, backend: &dyn PropertyBackend, defaults: &Defaults) -> AppResult<ClrBasic> {
        let inlet = self.inlet.resolve(backend, self.species)?;
        let outlet = self.outlet.resolve(backend, self.species)?;
        Ok(ClrBasic::new(&self.name, self.q_cool, self.efficiency, defaults)?
            .with_inlet(inlet)
            .with_outlet(outlet))
    }

    pub fn setup(&self) -> SizeSetup {
        let attr = match self.size {
            CoolerTarget::QCool => CoolerAttr::QCool,
            CoolerTarget::M => CoolerAttr::M,
            CoolerTarget::Efficiency => CoolerAttr::Efficiency,
        };
        let setup = SizeSetup::new(attr);
        match self.bounds {
            Some([lo, hi]) => setup.with_bounds(lo, hi),
            None => setup,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum ComponentInput {
    Compressor {
        name: String,
        inlet: String,
        outlet: String,
        p_ratio: f64,
        eff_isentropic: f64,
    },
    Expander {
        name: String,
        inlet: String,
        outlet: String,
        p_ratio: f64,
        eff_isentropic: f64,
    },
    Heater {
        name: String,
        inlet: String,
        outlet: String,
        q_heat: f64,
        #[serde(default = "one")]
        efficiency: f64,
    },
    Cooler {
        name: String,
        inlet: String,
        outlet: String,
        q_cool: f64,
        #[serde(default = "one")]
        efficiency: f64,
    },
    /// Plate exchanger rated against a secondary stream of fixed inlet.
    HxPlate {
        name: String,
        inlet: String,
        outlet: String,
        layout: Box<PlateLayout>,
        sf_species: Species,
        /// Secondary inlet; `m` is required.
        sf_inlet: StateInput,
        /// Overrides applied over the default correlation table.
        #[serde(default)]
        methods: Vec<MethodEntry>,
    },
}

impl ComponentInput {
    fn name(&self) -> &str {
        match self {
            ComponentInput::Compressor { name, .. }
            | ComponentInput::Expander { name, .. }
            | ComponentInput::Heater { name, .. }
            | ComponentInput::Cooler { name, .. }
            | ComponentInput::HxPlate { name, .. } => name.as_str(),
        }
    }

    fn points(&self) -> (&str, &str) {
        match self {
            ComponentInput::Compressor { inlet, outlet, .. }
            | ComponentInput::Expander { inlet, outlet, .. }
            | ComponentInput::Heater { inlet, outlet, .. }
            | ComponentInput::Cooler { inlet, outlet, .. }
            | ComponentInput::HxPlate { inlet, outlet, .. } => (inlet.as_str(), outlet.as_str()),
        }
    }

    fn build(
        &self,
        backend: &dyn PropertyBackend,
        defaults: &Defaults,
    ) -> AppResult<Box<dyn Component>> {
        let component: Box<dyn Component> = match self {
            ComponentInput::Compressor {
                name,
                p_ratio,
                eff_isentropic,
                ..
            } => Box::new(CompBasic::new(name, *p_ratio, *eff_isentropic, defaults)?),
            ComponentInput::Expander {
                name,
                p_ratio,
                eff_isentropic,
                ..
            } => Box::new(ExpBasic::new(name, *p_ratio, *eff_isentropic, defaults)?),
            ComponentInput::Heater {
                name,
                q_heat,
                efficiency,
                ..
            } => Box::new(HtrBasic::new(name, *q_heat, *efficiency, defaults)?),
            ComponentInput::Cooler {
                name,
                q_cool,
                efficiency,
                ..
            } => Box::new(ClrBasic::new(name, *q_cool, *efficiency, defaults)?),
            ComponentInput::HxPlate {
                name,
                layout,
                sf_species,
                sf_inlet,
                methods,
                ..
            } => {
                let mut table = MethodTable::default();
                table.apply(methods).map_err(ComponentError::from)?;
                if sf_inlet.m.is_none() {
                    return Err(AppError::Input {
                        what: format!("{name}: `sf_inlet` needs a mass flow `m`"),
                    });
                }
                let sf = sf_inlet.resolve(backend, *sf_species)?;
                let hx = HxPlate::new(name.as_str(), layout.as_ref().clone(), table, defaults)?;
                Box::new(hx.with_sf_inlet(sf))
            }
        };
        Ok(component)
    }
}

/// Cycle document: components in declaration order, joined by named points.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CycleInput {
    pub species: Species,
    #[serde(default)]
    pub backend: BackendKind,
    /// State at the inlet of the first component.
    pub seed: StateInput,
    pub components: Vec<ComponentInput>,
}

impl CycleInput {
    pub fn cycle(&self, backend: &dyn PropertyBackend, defaults: &Defaults) -> AppResult<Cycle> {
        let mut builder = GraphBuilder::new();
        let mut points: HashMap<&str, PointId> = HashMap::new();
        let mut components = Vec::with_capacity(self.components.len());

        for input in &self.components {
            let (inlet, outlet) = input.points();
            let inlet = *points.entry(inlet).or_insert_with(|| builder.add_point(inlet));
            let outlet = *points.entry(outlet).or_insert_with(|| builder.add_point(outlet));
            builder.add_component(input.name(), inlet, outlet);
            components.push(input.build(backend, defaults)?);
        }

        let mut cycle = Cycle::new(builder.build()?, components, defaults)?;
        cycle.set_seed(self.seed.resolve(backend, self.species)?)?;
        Ok(cycle)
    }
}
