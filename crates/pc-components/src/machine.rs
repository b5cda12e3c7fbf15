//! Isentropic-efficiency machine model shared by compressors and expanders.

use pc_core::Defaults;
use pc_core::units::pa;
use pc_fluids::{FlowState, InputPair, MassFlow, PropertyBackend};

use crate::common::{check_efficiency, closed_form, require_inlet, sizing_states, solve_bounded};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::MachineAttr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Compress,
    Expand,
}

#[derive(Debug, Clone)]
pub(crate) struct Machine {
    pub name: String,
    pub direction: Direction,
    /// Pressure ratio, always >= 1: `p_out/p_in` compressing, `p_in/p_out` expanding.
    pub p_ratio: f64,
    pub eff_isentropic: f64,
    pub inlet: Option<FlowState>,
    pub outlet: Option<FlowState>,
    pub power: Option<f64>,
    pub defaults: Defaults,
}

impl Machine {
    pub fn new(
        name: String,
        direction: Direction,
        p_ratio: f64,
        eff_isentropic: f64,
        defaults: &Defaults,
    ) -> ComponentResult<Self> {
        if !p_ratio.is_finite() || p_ratio < 1.0 {
            return Err(ComponentError::InvalidArg {
                what: "pressure ratio must be finite and >= 1",
            });
        }
        check_efficiency(eff_isentropic, "isentropic efficiency must be in (0,1]")?;
        Ok(Self {
            name,
            direction,
            p_ratio,
            eff_isentropic,
            inlet: None,
            outlet: None,
            power: None,
            defaults: defaults.clone(),
        })
    }

    fn outlet_pressure(&self, p_in: f64, ratio: f64) -> f64 {
        match self.direction {
            Direction::Compress => p_in * ratio,
            Direction::Expand => p_in / ratio,
        }
    }

    fn isentropic_h(&self, backend: &dyn PropertyBackend, inlet: &FlowState, p_out: f64) -> ComponentResult<f64> {
        let ideal = backend.props(
            inlet.species(),
            InputPair::PS {
                p: pa(p_out),
                s: inlet.s(),
            },
        )?;
        Ok(ideal.h)
    }

    fn outlet_h(&self, h_in: f64, h_s: f64, eff: f64) -> f64 {
        match self.direction {
            Direction::Compress => h_in + (h_s - h_in) / eff,
            Direction::Expand => h_in - eff * (h_in - h_s),
        }
    }

    pub fn run(&mut self, backend: &dyn PropertyBackend) -> ComponentResult<FlowState> {
        let inlet = require_inlet(&self.name, self.inlet.as_ref())?;
        let p_out = self.outlet_pressure(inlet.p(), self.p_ratio);
        let h_s = self.isentropic_h(backend, inlet, p_out)?;
        let h_out = self.outlet_h(inlet.h(), h_s, self.eff_isentropic);
        let outlet = inlet.with_state(backend, InputPair::PH { p: pa(p_out), h: h_out })?;
        self.power = inlet.mass_flow().value().map(|m| m * (h_out - inlet.h()));
        self.outlet = Some(outlet.clone());
        Ok(outlet)
    }

    fn check_outlet_pressure(&self, inlet: &FlowState, outlet: &FlowState) -> ComponentResult<()> {
        let p_expected = self.outlet_pressure(inlet.p(), self.p_ratio);
        if (p_expected - outlet.p()).abs() > self.defaults.tolerances().band(p_expected) {
            return Err(ComponentError::Infeasible {
                component: self.name.clone(),
                what: format!(
                    "outlet pressure {:.6e} Pa does not match pressure ratio {} ({p_expected:.6e} Pa)",
                    outlet.p(),
                    self.p_ratio
                ),
            });
        }
        Ok(())
    }

    pub fn size(
        &mut self,
        backend: &dyn PropertyBackend,
        attr: MachineAttr,
        bounds: Option<[f64; 2]>,
        m: Option<f64>,
    ) -> ComponentResult<f64> {
        let key = crate::traits::SizeAttr::Machine(attr).key();
        let (inlet, outlet) = sizing_states(&self.name, self.inlet.as_ref(), self.outlet.as_ref(), m)?;
        let (p_in, p_out) = (inlet.p(), outlet.p());
        let (h_in, h_out) = (inlet.h(), outlet.h());
        let opts = self.defaults.component_root_options();

        let value = match attr {
            MachineAttr::PRatio => {
                let ratio = match bounds {
                    None => {
                        let ratio = match self.direction {
                            Direction::Compress => p_out / p_in,
                            Direction::Expand => p_in / p_out,
                        };
                        closed_form(&self.name, key, ratio)?
                    }
                    Some(bounds) => solve_bounded(&self.name, key, bounds, opts, |x| {
                        Ok(self.outlet_pressure(p_in, x) - p_out)
                    })?,
                };
                if ratio < 1.0 {
                    return Err(ComponentError::Infeasible {
                        component: self.name.clone(),
                        what: format!("pressure ratio {ratio:.6} below 1"),
                    });
                }
                ratio
            }
            MachineAttr::EffIsen => {
                self.check_outlet_pressure(&inlet, &outlet)?;
                let h_s = self.isentropic_h(backend, &inlet, p_out)?;
                let eff = match bounds {
                    None => {
                        let eff = match self.direction {
                            Direction::Compress => (h_s - h_in) / (h_out - h_in),
                            Direction::Expand => (h_in - h_out) / (h_in - h_s),
                        };
                        closed_form(&self.name, key, eff)?
                    }
                    Some(bounds) => solve_bounded(&self.name, key, bounds, opts, |x| {
                        Ok(self.outlet_h(h_in, h_s, x) - h_out)
                    })?,
                };
                check_efficiency(eff, "isentropic efficiency must be in (0,1]").map_err(|_| {
                    ComponentError::Infeasible {
                        component: self.name.clone(),
                        what: format!("isentropic efficiency {eff:.6} outside (0, 1]"),
                    }
                })?;
                eff
            }
            MachineAttr::M { power } => {
                self.check_outlet_pressure(&inlet, &outlet)?;
                let dh = (h_out - h_in).abs();
                match bounds {
                    None => closed_form(&self.name, key, power / dh)?,
                    Some(bounds) => {
                        solve_bounded(&self.name, key, bounds, opts, |x| Ok(x * dh - power))?
                    }
                }
            }
        };

        let inlet = match attr {
            MachineAttr::PRatio => {
                self.p_ratio = value;
                inlet
            }
            MachineAttr::EffIsen => {
                self.eff_isentropic = value;
                inlet
            }
            MachineAttr::M { .. } => inlet.with_mass_flow(MassFlow::Known(value)),
        };
        self.inlet = Some(inlet);
        self.run(backend)?;
        tracing::info!(component = %self.name, attr = key, value, "sized");
        Ok(value)
    }

    pub fn values(&self) -> Vec<(String, f64)> {
        let mut values = vec![
            ("pRatio".to_owned(), self.p_ratio),
            ("effIsentropic".to_owned(), self.eff_isentropic),
        ];
        if let Some(m) = self.inlet.as_ref().and_then(|s| s.mass_flow().value()) {
            values.push(("m".to_owned(), m));
        }
        values
    }
}
