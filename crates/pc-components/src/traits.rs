//! Core traits for component models.

use pc_core::units::{Power, Pressure, pa, w};
use pc_fluids::{FlowState, PropertyBackend};
use serde::{Deserialize, Serialize};

use crate::error::{ComponentError, ComponentResult};

/// Kind tag reported in snapshots and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Cooler,
    Heater,
    Compressor,
    Expander,
    HxPlate,
}

/// Sizeable attributes of [`ClrBasic`](crate::ClrBasic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoolerAttr {
    /// Heat removed from the working fluid [W].
    #[serde(rename = "QCool")]
    QCool,
    #[serde(rename = "m")]
    M,
    #[serde(rename = "efficiency")]
    Efficiency,
}

/// Sizeable attributes of [`HtrBasic`](crate::HtrBasic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaterAttr {
    /// Heat added to the working fluid [W].
    #[serde(rename = "QHeat")]
    QHeat,
    #[serde(rename = "m")]
    M,
    #[serde(rename = "efficiency")]
    Efficiency,
}

/// Sizeable attributes of compressors and expanders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MachineAttr {
    #[serde(rename = "pRatio")]
    PRatio,
    #[serde(rename = "effIsentropic")]
    EffIsen,
    /// Mass flow that matches a shaft power magnitude [W].
    #[serde(rename = "m")]
    M { power: f64 },
}

/// Sizeable attributes of [`HxPlate`](crate::HxPlate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HxAttr {
    /// Plate length in the flow direction.
    L,
    /// Plate width.
    W,
    /// Secondary fluid mass flow.
    #[serde(rename = "mSf")]
    MSf,
    #[serde(rename = "NPlate")]
    NPlate,
}

/// Attribute to size, tagged by the component family that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeAttr {
    Cooler(CoolerAttr),
    Heater(HeaterAttr),
    Machine(MachineAttr),
    Hx(HxAttr),
}

impl SizeAttr {
    pub fn key(&self) -> &'static str {
        match self {
            SizeAttr::Cooler(CoolerAttr::QCool) => "QCool",
            SizeAttr::Heater(HeaterAttr::QHeat) => "QHeat",
            SizeAttr::Cooler(CoolerAttr::M)
            | SizeAttr::Heater(HeaterAttr::M)
            | SizeAttr::Machine(MachineAttr::M { .. }) => "m",
            SizeAttr::Cooler(CoolerAttr::Efficiency) | SizeAttr::Heater(HeaterAttr::Efficiency) => {
                "efficiency"
            }
            SizeAttr::Machine(MachineAttr::PRatio) => "pRatio",
            SizeAttr::Machine(MachineAttr::EffIsen) => "effIsentropic",
            SizeAttr::Hx(HxAttr::L) => "L",
            SizeAttr::Hx(HxAttr::W) => "W",
            SizeAttr::Hx(HxAttr::MSf) => "mSf",
            SizeAttr::Hx(HxAttr::NPlate) => "NPlate",
        }
    }
}

impl From<CoolerAttr> for SizeAttr {
    fn from(attr: CoolerAttr) -> Self {
        SizeAttr::Cooler(attr)
    }
}

impl From<HeaterAttr> for SizeAttr {
    fn from(attr: HeaterAttr) -> Self {
        SizeAttr::Heater(attr)
    }
}

impl From<MachineAttr> for SizeAttr {
    fn from(attr: MachineAttr) -> Self {
        SizeAttr::Machine(attr)
    }
}

impl From<HxAttr> for SizeAttr {
    fn from(attr: HxAttr) -> Self {
        SizeAttr::Hx(attr)
    }
}

/// One sizing request.
///
/// Without `bounds`, attributes that have a closed form are solved directly;
/// the rest need a bracket. `m`, when given, replaces the inlet mass flow
/// before sizing starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeSetup {
    pub attr: SizeAttr,
    #[serde(default)]
    pub bounds: Option<[f64; 2]>,
    #[serde(default)]
    pub m: Option<f64>,
}

impl SizeSetup {
    pub fn new(attr: impl Into<SizeAttr>) -> Self {
        Self {
            attr: attr.into(),
            bounds: None,
            m: None,
        }
    }

    pub fn with_bounds(mut self, lo: f64, hi: f64) -> Self {
        self.bounds = Some([lo, hi]);
        self
    }

    pub fn with_mass_flow(mut self, m: f64) -> Self {
        self.m = Some(m);
        self
    }
}

/// Flat record of a component's results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentSnapshot {
    pub name: String,
    pub kind: ComponentKind,
    /// Heat into the working fluid [W]
    pub duty: f64,
    /// Shaft power into the working fluid [W]
    pub power: f64,
    /// Working fluid pressure drop [Pa]
    pub dp: f64,
    /// Parameters and derived values by name
    pub values: Vec<(String, f64)>,
}

/// A component that transforms a working-fluid inlet state into an outlet.
///
/// The property backend is passed per call, so one backend instance serves
/// every component in a cycle.
///
/// Sign conventions: `duty` and `power` are positive when energy enters the
/// working fluid; `dp` is positive for a pressure loss.
pub trait Component: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    fn kind(&self) -> ComponentKind;

    fn inlet(&self) -> Option<&FlowState>;

    fn outlet(&self) -> Option<&FlowState>;

    fn set_inlet(&mut self, state: FlowState);

    /// Store a target outlet state for sizing.
    fn set_outlet(&mut self, state: FlowState);

    /// Compute the outlet from the inlet and the current parameters.
    fn run(&mut self, backend: &dyn PropertyBackend) -> ComponentResult<FlowState>;

    /// Solve one attribute so that running the component reproduces the
    /// stored outlet state. Returns the solved value; the component keeps it
    /// and its outlet is refreshed.
    fn size(&mut self, backend: &dyn PropertyBackend, setup: &SizeSetup) -> ComponentResult<f64>;

    fn duty(&self) -> Power {
        w(0.0)
    }

    fn power(&self) -> Power {
        w(0.0)
    }

    fn dp(&self) -> Pressure {
        pa(0.0)
    }

    /// Named parameters and derived values for reporting.
    fn values(&self) -> Vec<(String, f64)> {
        Vec::new()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot {
            name: self.name().to_owned(),
            kind: self.kind(),
            duty: self.duty().value,
            power: self.power().value,
            dp: self.dp().value,
            values: self.values(),
        }
    }
}

/// Error for a sizing request aimed at another component family.
pub(crate) fn unsupported(component: &str, attr: &SizeAttr) -> ComponentError {
    ComponentError::UnsupportedAttr {
        component: component.to_owned(),
        attr: attr.key().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_builder() {
        let setup = SizeSetup::new(CoolerAttr::M).with_bounds(0.8, 1.1);
        assert_eq!(setup.attr, SizeAttr::Cooler(CoolerAttr::M));
        assert_eq!(setup.bounds, Some([0.8, 1.1]));
        assert_eq!(setup.m, None);
        assert_eq!(setup.attr.key(), "m");
    }

    #[test]
    fn attr_keys() {
        assert_eq!(SizeAttr::from(HxAttr::NPlate).key(), "NPlate");
        assert_eq!(SizeAttr::from(MachineAttr::M { power: 1.0 }).key(), "m");
        assert_eq!(SizeAttr::from(HeaterAttr::QHeat).key(), "QHeat");
    }

    #[test]
    fn snapshot_serializes_with_snake_case_kind() {
        let snap = ComponentSnapshot {
            name: "hx".into(),
            kind: ComponentKind::HxPlate,
            duty: 1.5e5,
            power: 0.0,
            dp: 120.0,
            values: vec![("L".into(), 0.42)],
        };
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["kind"], "hx_plate");
        assert_eq!(json["values"][0][0], "L");
        assert_eq!(json["dp"], 120.0);
    }
}
