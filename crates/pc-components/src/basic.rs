//! Constant-pressure heat transfer shared by the basic heater and cooler.
//!
//! Heat reaching the working fluid is `sign * q * efficiency`, where `sign`
//! is `+1` for a heater and `-1` for a cooler. The outlet enthalpy follows
//! from `h_out = h_in + sign * q * efficiency / m`.

use pc_core::{Defaults, units::pa};
use pc_fluids::{FlowState, InputPair, MassFlow, PropertyBackend};

use crate::common::{check_same_pressure, closed_form, sizing_states, solve_bounded};
use crate::error::{ComponentError, ComponentResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BasicAttr {
    Q,
    M,
    Efficiency,
}

impl BasicAttr {
    fn key(self, q_key: &'static str) -> &'static str {
        match self {
            BasicAttr::Q => q_key,
            BasicAttr::M => "m",
            BasicAttr::Efficiency => "efficiency",
        }
    }
}

/// Parameters and port states of a basic heater or cooler.
#[derive(Debug, Clone)]
pub(crate) struct BasicHeat {
    pub name: String,
    pub sign: f64,
    pub q_key: &'static str,
    pub q: f64,
    pub efficiency: f64,
    pub inlet: Option<FlowState>,
    pub outlet: Option<FlowState>,
    pub defaults: Defaults,
}

impl BasicHeat {
    pub fn duty(&self) -> f64 {
        self.sign * self.q
    }

    fn outlet_h(&self, h_in: f64, q: f64, efficiency: f64, m: f64) -> f64 {
        h_in + self.sign * q * efficiency / m
    }

    pub fn run(&mut self, backend: &dyn PropertyBackend) -> ComponentResult<FlowState> {
        let inlet = crate::common::require_inlet(&self.name, self.inlet.as_ref())?;
        let m = inlet.m()?;
        if m <= 0.0 {
            return Err(ComponentError::Infeasible {
                component: self.name.clone(),
                what: "zero mass flow through a heat transfer component".to_owned(),
            });
        }
        let h_out = self.outlet_h(inlet.h(), self.q, self.efficiency, m);
        let outlet = inlet.with_state(
            backend,
            InputPair::PH {
                p: pa(inlet.p()),
                h: h_out,
            },
        )?;
        self.outlet = Some(outlet.clone());
        Ok(outlet)
    }

    pub fn size(
        &mut self,
        backend: &dyn PropertyBackend,
        attr: BasicAttr,
        bounds: Option<[f64; 2]>,
        m: Option<f64>,
    ) -> ComponentResult<f64> {
        let key = attr.key(self.q_key);
        let (inlet, outlet) = sizing_states(&self.name, self.inlet.as_ref(), self.outlet.as_ref(), m)?;
        check_same_pressure(&self.name, &inlet, &outlet, self.defaults.tolerances())?;
        let (h_in, h_out) = (inlet.h(), outlet.h());
        let dh = h_out - h_in;

        let value = match (attr, bounds) {
            (BasicAttr::Q, None) => closed_form(&self.name, key, self.sign * inlet.m()? * dh / self.efficiency)?,
            (BasicAttr::M, None) => closed_form(&self.name, key, self.sign * self.q * self.efficiency / dh)?,
            (BasicAttr::Efficiency, None) => {
                let eff = closed_form(&self.name, key, self.sign * inlet.m()? * dh / self.q)?;
                if eff > 1.0 {
                    return Err(ComponentError::Infeasible {
                        component: self.name.clone(),
                        what: format!("efficiency {eff:.6} exceeds 1"),
                    });
                }
                eff
            }
            (attr, Some(bounds)) => {
                let m_in = if attr == BasicAttr::M { 0.0 } else { inlet.m()? };
                let opts = self.defaults.component_root_options();
                solve_bounded(&self.name, key, bounds, opts, |x| {
                    let (q, eff, m) = match attr {
                        BasicAttr::Q => (x, self.efficiency, m_in),
                        BasicAttr::M => (self.q, self.efficiency, x),
                        BasicAttr::Efficiency => (self.q, x, m_in),
                    };
                    Ok(self.outlet_h(h_in, q, eff, m) - h_out)
                })?
            }
        };

        match attr {
            BasicAttr::Q => self.q = value,
            BasicAttr::Efficiency => self.efficiency = value,
            BasicAttr::M => {}
        }
        let inlet = if attr == BasicAttr::M {
            inlet.with_mass_flow(MassFlow::Known(value))
        } else {
            inlet
        };
        self.inlet = Some(inlet);
        self.run(backend)?;
        tracing::info!(component = %self.name, attr = key, value, "sized");
        Ok(value)
    }

    pub fn values(&self) -> Vec<(String, f64)> {
        let mut values = vec![
            (self.q_key.to_owned(), self.q),
            ("efficiency".to_owned(), self.efficiency),
        ];
        if let Some(m) = self.inlet.as_ref().and_then(|s| s.mass_flow().value()) {
            values.push(("m".to_owned(), m));
        }
        values
    }
}
