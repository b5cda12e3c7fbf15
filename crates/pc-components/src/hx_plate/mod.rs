//! Plate heat exchanger between the working fluid and a secondary fluid.

mod layout;
mod profile;

pub use layout::{FlowArrangement, Orientation, PlateLayout, PlateSide};
pub use profile::{HxSolution, Segment};

use pc_core::units::{Power, Pressure, pa, w};
use pc_core::{Defaults, bisect_integer};
use pc_correlations::{MethodTable, Regime, Side};
use pc_fluids::{FlowState, InputPair, MassFlow, PropertyBackend};

use crate::common::{bounds_required, require_inlet, sizing_states, solve_bounded};
use crate::error::{ComponentError, ComponentResult, ErrorClass};
use crate::traits::{Component, ComponentKind, HxAttr, SizeAttr, SizeSetup, unsupported};
use profile::{Analysis, Streams};

/// Gasketed plate heat exchanger.
///
/// The component's inlet and outlet are the working-fluid ports. The
/// secondary inlet is set separately and its outlet follows from the energy
/// balance.
///
/// ## Modes
///
/// - Sizing: with both working-fluid states fixed, `L` comes straight from the
///   segment analysis; `W`, `mSf` and `NPlate` are bracketed so that the
///   required length matches the current `L`.
/// - Rating (`run`): with `L` fixed, the duty is bracketed between zero and the
///   largest thermodynamically possible duty. Candidate duties that cross the
///   temperature profiles count as too large.
#[derive(Debug, Clone)]
pub struct HxPlate {
    name: String,
    layout: PlateLayout,
    methods: MethodTable,
    wf_in: Option<FlowState>,
    wf_out: Option<FlowState>,
    sf_in: Option<FlowState>,
    sf_out: Option<FlowState>,
    solution: Option<HxSolution>,
    defaults: Defaults,
}

impl HxPlate {
    /// Build an exchanger, checking the plate pack and the correlation table.
    ///
    /// Both sides must have heat and friction methods for every single-phase
    /// regime of their geometry. Two-phase entries are checked when a segment
    /// first reaches them.
    pub fn new(
        name: impl Into<String>,
        layout: PlateLayout,
        methods: MethodTable,
        defaults: &Defaults,
    ) -> ComponentResult<Self> {
        layout.validate()?;
        methods.validate()?;
        methods.require(layout.wf.geometry.kind(), Side::Wf, Regime::SINGLE_PHASE)?;
        methods.require(layout.sf.geometry.kind(), Side::Sf, Regime::SINGLE_PHASE)?;
        Ok(Self {
            name: name.into(),
            layout,
            methods,
            wf_in: None,
            wf_out: None,
            sf_in: None,
            sf_out: None,
            solution: None,
            defaults: defaults.clone(),
        })
    }

    pub fn with_inlet(mut self, inlet: FlowState) -> Self {
        self.wf_in = Some(inlet);
        self
    }

    pub fn with_outlet(mut self, outlet: FlowState) -> Self {
        self.wf_out = Some(outlet);
        self
    }

    pub fn with_sf_inlet(mut self, inlet: FlowState) -> Self {
        self.sf_in = Some(inlet);
        self
    }

    pub fn set_sf_inlet(&mut self, inlet: FlowState) {
        self.sf_in = Some(inlet);
    }

    pub fn sf_inlet(&self) -> Option<&FlowState> {
        self.sf_in.as_ref()
    }

    pub fn sf_outlet(&self) -> Option<&FlowState> {
        self.sf_out.as_ref()
    }

    pub fn layout(&self) -> &PlateLayout {
        &self.layout
    }

    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    pub fn solution(&self) -> Option<&HxSolution> {
        self.solution.as_ref()
    }

    fn analysis<'a>(&'a self, layout: &'a PlateLayout, backend: &'a dyn PropertyBackend) -> Analysis<'a> {
        Analysis {
            name: &self.name,
            layout,
            methods: &self.methods,
            defaults: &self.defaults,
            backend,
        }
    }

    fn require_sf(&self) -> ComponentResult<&FlowState> {
        self.sf_in.as_ref().ok_or_else(|| ComponentError::Config {
            component: self.name.clone(),
            what: "secondary fluid inlet is not set".to_owned(),
        })
    }

    /// Store a solution and refresh both outlets from it.
    fn accept(
        &mut self,
        backend: &dyn PropertyBackend,
        wf_in: FlowState,
        sf_in: FlowState,
        solution: HxSolution,
    ) -> ComponentResult<FlowState> {
        let wf_out = wf_in.with_state(
            backend,
            InputPair::PH {
                p: pa(wf_in.p() - solution.dp_wf),
                h: solution.h_wf_out,
            },
        )?;
        let sf_out = sf_in.with_state(
            backend,
            InputPair::PH {
                p: pa(sf_in.p() - solution.dp_sf),
                h: solution.h_sf_out,
            },
        )?;
        self.wf_in = Some(wf_in);
        self.sf_in = Some(sf_in);
        self.wf_out = Some(wf_out.clone());
        self.sf_out = Some(sf_out);
        self.solution = Some(solution);
        Ok(wf_out)
    }

    /// Largest duty magnitude the inlet temperatures allow.
    fn max_duty(&self, backend: &dyn PropertyBackend, wf_in: &FlowState, sf_in: &FlowState) -> ComponentResult<f64> {
        let (m_wf, m_sf) = (wf_in.m()?, sf_in.m()?);
        let wf_at_sf_t = backend.props(
            wf_in.species(),
            InputPair::PT {
                p: wf_in.pressure(),
                t: sf_in.temperature(),
            },
        )?;
        let sf_at_wf_t = backend.props(
            sf_in.species(),
            InputPair::PT {
                p: sf_in.pressure(),
                t: wf_in.temperature(),
            },
        )?;
        let by_wf = m_wf * (wf_at_sf_t.h - wf_in.h());
        let by_sf = m_sf * (sf_in.h() - sf_at_wf_t.h);
        Ok(by_wf.abs().min(by_sf.abs()))
    }
}

/// Rated duty is resolved this much finer than the cycle tolerance, so that an
/// enclosing loop sees a continuous outlet state.
const RATING_TOL_FACTOR: f64 = 1e-3;

/// Required length minus the target, counting infeasible candidates as too
/// much duty or too little surface.
fn excess_length(result: ComponentResult<HxSolution>, target: f64) -> ComponentResult<f64> {
    match result {
        Ok(solution) => Ok(solution.l - target),
        Err(e) if e.class() == ErrorClass::Infeasible => Ok(f64::INFINITY),
        Err(e) => Err(e),
    }
}

impl Component for HxPlate {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::HxPlate
    }

    fn inlet(&self) -> Option<&FlowState> {
        self.wf_in.as_ref()
    }

    fn outlet(&self) -> Option<&FlowState> {
        self.wf_out.as_ref()
    }

    fn set_inlet(&mut self, state: FlowState) {
        self.wf_in = Some(state);
    }

    fn set_outlet(&mut self, state: FlowState) {
        self.wf_out = Some(state);
    }

    fn run(&mut self, backend: &dyn PropertyBackend) -> ComponentResult<FlowState> {
        let wf_in = require_inlet(&self.name, self.wf_in.as_ref())?.clone();
        let sf_in = self.require_sf()?.clone();
        let q_max = self.max_duty(backend, &wf_in, &sf_in)?;
        let heated = sf_in.t() > wf_in.t();
        let m_wf = wf_in.m()?;

        let solution = if q_max <= self.defaults.tolerances().band(0.0) || self.layout.l == 0.0 {
            let streams = Streams {
                wf_in: &wf_in,
                h_wf_out: wf_in.h(),
                sf_in: &sf_in,
            };
            self.analysis(&self.layout, backend).solve(&streams)?
        } else {
            let sign = if heated { 1.0 } else { -1.0 };
            let analysis = self.analysis(&self.layout, backend);
            let at = |q: f64| {
                analysis.solve(&Streams {
                    wf_in: &wf_in,
                    h_wf_out: wf_in.h() + sign * q / m_wf,
                    sf_in: &sf_in,
                })
            };
            let mut opts = self.defaults.component_root_options();
            opts.tol.abs *= RATING_TOL_FACTOR;
            opts.tol.rel *= RATING_TOL_FACTOR;
            let q = solve_bounded(&self.name, "duty", [q_max * 1e-9, q_max], opts, |q| {
                excess_length(at(q), self.layout.l)
            })?;
            at(q)?
        };
        tracing::debug!(component = %self.name, q = solution.q, pinch = solution.pinch, "rated");
        self.accept(backend, wf_in, sf_in, solution)
    }

    fn size(&mut self, backend: &dyn PropertyBackend, setup: &SizeSetup) -> ComponentResult<f64> {
        let attr = match setup.attr {
            SizeAttr::Hx(attr) => attr,
            other => return Err(unsupported(&self.name, &other)),
        };
        let key = setup.attr.key();
        let (wf_in, wf_out) = sizing_states(&self.name, self.wf_in.as_ref(), self.wf_out.as_ref(), setup.m)?;
        let sf_in = self.require_sf()?.clone();
        let h_wf_out = wf_out.h();
        let target = self.layout.l;
        let opts = self.defaults.component_root_options();

        let (value, sf_in) = match attr {
            HxAttr::L => {
                let solution = self.analysis(&self.layout, backend).solve(&Streams::new(&wf_in, h_wf_out, &sf_in))?;
                if let Some([lo, hi]) = setup.bounds
                    && !(lo..=hi).contains(&solution.l)
                {
                    return Err(ComponentError::Infeasible {
                        component: self.name.clone(),
                        what: format!("required length {:.6} m outside [{lo}, {hi}]", solution.l),
                    });
                }
                (solution.l, sf_in)
            }
            HxAttr::W => {
                let bounds = setup.bounds.ok_or_else(|| bounds_required(&self.name, key))?;
                let w = solve_bounded(&self.name, key, bounds, opts, |w| {
                    let layout = PlateLayout { w, ..self.layout.clone() };
                    let streams = Streams::new(&wf_in, h_wf_out, &sf_in);
                    excess_length(self.analysis(&layout, backend).solve(&streams), target)
                })?;
                (w, sf_in)
            }
            HxAttr::MSf => {
                let bounds = setup.bounds.ok_or_else(|| bounds_required(&self.name, key))?;
                let m_sf = solve_bounded(&self.name, key, bounds, opts, |m| {
                    let sf = sf_in.with_mass_flow(MassFlow::Known(m));
                    let streams = Streams::new(&wf_in, h_wf_out, &sf);
                    excess_length(self.analysis(&self.layout, backend).solve(&streams), target)
                })?;
                (m_sf, sf_in.with_mass_flow(MassFlow::Known(m_sf)))
            }
            HxAttr::NPlate => {
                let [lo, hi] = setup.bounds.ok_or_else(|| bounds_required(&self.name, key))?;
                if !lo.is_finite() || !hi.is_finite() || lo < PlateLayout::MIN_PLATES as f64 {
                    return Err(ComponentError::Config {
                        component: self.name.clone(),
                        what: format!("plate count bounds [{lo}, {hi}] must be finite and >= 3"),
                    });
                }
                let n = bisect_integer(
                    |n| {
                        let layout = PlateLayout {
                            n_plate: n,
                            ..self.layout.clone()
                        };
                        let streams = Streams::new(&wf_in, h_wf_out, &sf_in);
                        excess_length(self.analysis(&layout, backend).solve(&streams), target)
                    },
                    lo.ceil() as u32,
                    hi.floor() as u32,
                )
                .map_err(|e: ComponentError| e.in_sizing(&self.name, key))?;
                (n as f64, sf_in)
            }
        };

        match attr {
            HxAttr::L => self.layout.l = value,
            HxAttr::W => self.layout.w = value,
            HxAttr::NPlate => self.layout.n_plate = value as u32,
            HxAttr::MSf => {}
        }
        let solution = self.analysis(&self.layout, backend).solve(&Streams::new(&wf_in, h_wf_out, &sf_in))?;
        self.accept(backend, wf_in.clone(), sf_in, solution)?;
        tracing::info!(component = %self.name, attr = key, value, "sized");
        Ok(value)
    }

    fn duty(&self) -> Power {
        w(self.solution.as_ref().map_or(0.0, |s| s.q))
    }

    fn dp(&self) -> Pressure {
        pa(self.solution.as_ref().map_or(0.0, |s| s.dp_wf))
    }

    fn values(&self) -> Vec<(String, f64)> {
        let mut values = vec![
            ("L".to_owned(), self.layout.l),
            ("W".to_owned(), self.layout.w),
            ("NPlate".to_owned(), self.layout.n_plate as f64),
        ];
        if let Some(m) = self.sf_in.as_ref().and_then(|s| s.mass_flow().value()) {
            values.push(("mSf".to_owned(), m));
        }
        if let Some(solution) = &self.solution {
            values.push(("pinch".to_owned(), solution.pinch));
            values.push(("dpSf".to_owned(), solution.dp_sf));
            values.push(("segments".to_owned(), solution.segments.len() as f64));
        }
        values
    }
}
