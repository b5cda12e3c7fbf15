//! Segment-by-segment analysis of a plate pack.
//!
//! The working-fluid enthalpy range is cut at phase boundaries of either
//! stream, then each zone is stepped by `div_t` (single phase) or `div_x`
//! (two phase). The secondary stream follows from the energy balance. Every
//! segment gets its own regimes, correlations, overall coefficient and log-mean
//! temperature difference, from which the required plate length is summed.

use pc_core::Defaults;
use pc_core::units::pa;
use pc_correlations::{Bulk, FlowInput, FlowProps, Method, MethodTable, Regime, Side, TwoPhase};
use pc_fluids::{FlowState, InputPair, Phase, PropertyBackend, Saturation, Species, ThermoProps};
use serde::Serialize;

use super::layout::{FlowArrangement, PlateLayout, PlateSide};
use crate::error::{ComponentError, ComponentResult};

/// One wall segment between two profile nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    /// Working fluid temperature at the segment ends [K]
    pub t_wf: [f64; 2],
    /// Secondary fluid temperature at the same ends [K]
    pub t_sf: [f64; 2],
    pub regime_wf: Regime,
    pub regime_sf: Regime,
    pub method_wf: Method,
    pub method_sf: Method,
    /// Overall heat transfer coefficient on projected area [W/(m²·K)]
    pub u: f64,
    pub lmtd: f64,
    /// Heat exchanged in the segment [W]
    pub q: f64,
    /// Projected wall area [m²]
    pub area: f64,
    /// Plate length taken by the segment [m]
    pub l: f64,
    pub dp_wf: f64,
    pub dp_sf: f64,
    #[serde(skip)]
    rho_wf: f64,
    #[serde(skip)]
    rho_sf: f64,
}

/// Aggregated result of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HxSolution {
    /// Heat into the working fluid [W]
    pub q: f64,
    /// Required plate length [m]
    pub l: f64,
    /// Total working fluid pressure drop [Pa]
    pub dp_wf: f64,
    /// Total secondary fluid pressure drop [Pa]
    pub dp_sf: f64,
    /// Minimum temperature difference between the streams [K]
    pub pinch: f64,
    pub h_wf_out: f64,
    pub h_sf_out: f64,
    pub segments: Vec<Segment>,
}

/// Inlet states and the working-fluid outlet enthalpy being analysed.
pub(crate) struct Streams<'a> {
    pub wf_in: &'a FlowState,
    pub h_wf_out: f64,
    pub sf_in: &'a FlowState,
}

impl<'a> Streams<'a> {
    pub fn new(wf_in: &'a FlowState, h_wf_out: f64, sf_in: &'a FlowState) -> Self {
        Self {
            wf_in,
            h_wf_out,
            sf_in,
        }
    }
}

/// Energy balance between the streams.
#[derive(Debug, Clone, Copy)]
struct Balance {
    arrangement: FlowArrangement,
    h_wf_in: f64,
    m_wf: f64,
    h_sf_in: f64,
    m_sf: f64,
    q: f64,
}

impl Balance {
    fn h_sf_out(&self) -> f64 {
        self.h_sf_in - self.q / self.m_sf
    }

    /// Secondary enthalpy level with a working-fluid enthalpy `h_wf`.
    fn h_sf_at(&self, h_wf: f64) -> f64 {
        let q = self.m_wf * (h_wf - self.h_wf_in);
        match self.arrangement {
            FlowArrangement::Counter => self.h_sf_out() + q / self.m_sf,
            FlowArrangement::Parallel => self.h_sf_in - q / self.m_sf,
        }
    }

    /// Inverse of [`Balance::h_sf_at`].
    fn h_wf_at(&self, h_sf: f64) -> f64 {
        let q = match self.arrangement {
            FlowArrangement::Counter => (h_sf - self.h_sf_out()) * self.m_sf,
            FlowArrangement::Parallel => (self.h_sf_in - h_sf) * self.m_sf,
        };
        self.h_wf_in + q / self.m_wf
    }
}

/// Per-side quantities that stay fixed along the plate.
struct SideFlow<'a> {
    side: Side,
    plate: &'a PlateSide,
    species: Species,
    p: f64,
    g: f64,
    heated: bool,
    sat: Option<Saturation>,
}

impl SideFlow<'_> {
    fn local(&self, backend: &dyn PropertyBackend, h: f64) -> ComponentResult<(Regime, FlowProps)> {
        let props = backend.props(self.species, InputPair::PH { p: pa(self.p), h })?;
        let regime = match props.phase {
            Phase::TwoPhase if self.heated => Regime::TpEvap,
            Phase::TwoPhase => Regime::TpCond,
            Phase::Liquid => Regime::Liq,
            Phase::Vapour => Regime::Vap,
            Phase::Supercritical => Regime::Sp,
        };
        if !regime.is_two_phase() {
            return Ok((regime, FlowProps::Single(bulk(self.species, &props)?)));
        }
        let sat = match self.sat {
            Some(sat) => sat,
            None => backend.saturation(self.species, pa(self.p))?,
        };
        let two = TwoPhase {
            x: props.quality.unwrap_or_else(|| sat.quality_of(h)),
            liquid: bulk(self.species, &sat.liquid)?,
            rho_v: sat.vapour.rho,
            h_fg: sat.h_fg(),
            t_sat: sat.t_sat,
            sigma: sat.sigma,
        };
        Ok((regime, FlowProps::Two(two)))
    }
}

fn bulk(species: Species, props: &ThermoProps) -> ComponentResult<Bulk> {
    let transport = props.transport(species)?;
    Ok(Bulk {
        rho: props.rho,
        cp: transport.cp,
        mu: transport.mu,
        k: transport.k,
    })
}

/// Log-mean of two temperature differences of the same sign.
pub(crate) fn lmtd(a: f64, b: f64) -> f64 {
    let (a, b) = (a.abs(), b.abs());
    if (a - b).abs() <= 1e-9 * a.max(b) {
        0.5 * (a + b)
    } else {
        (a - b) / (a / b).ln()
    }
}

/// Spread `max_walls` over zones, keeping at least one segment per zone.
pub(crate) fn cap_steps(steps: &mut [usize], max_walls: usize) {
    let total: usize = steps.iter().sum();
    if total <= max_walls {
        return;
    }
    for n in steps.iter_mut() {
        *n = (*n * max_walls / total).max(1);
    }
    while steps.iter().sum::<usize>() > max_walls {
        match steps.iter_mut().filter(|n| **n > 1).max_by_key(|n| **n) {
            Some(n) => *n -= 1,
            None => break,
        }
    }
}

pub(crate) struct Analysis<'a> {
    pub name: &'a str,
    pub layout: &'a PlateLayout,
    pub methods: &'a MethodTable,
    pub defaults: &'a Defaults,
    pub backend: &'a dyn PropertyBackend,
}

impl Analysis<'_> {
    pub fn solve(&self, streams: &Streams<'_>) -> ComponentResult<HxSolution> {
        let m_wf = streams.wf_in.m()?;
        let m_sf = streams.sf_in.m()?;
        if m_wf <= 0.0 || m_sf <= 0.0 {
            return Err(self.infeasible("zero mass flow on one side".to_owned()));
        }
        let h_wf_in = streams.wf_in.h();
        let balance = Balance {
            arrangement: self.layout.arrangement,
            h_wf_in,
            m_wf,
            h_sf_in: streams.sf_in.h(),
            m_sf,
            q: m_wf * (streams.h_wf_out - h_wf_in),
        };
        let heated = balance.q >= 0.0;
        let wf = SideFlow {
            side: Side::Wf,
            plate: &self.layout.wf,
            species: streams.wf_in.species(),
            p: streams.wf_in.p(),
            g: self.layout.mass_flux(&self.layout.wf, self.layout.channels_wf(), m_wf),
            heated,
            sat: self.backend.saturation(streams.wf_in.species(), pa(streams.wf_in.p())).ok(),
        };
        let sf = SideFlow {
            side: Side::Sf,
            plate: &self.layout.sf,
            species: streams.sf_in.species(),
            p: streams.sf_in.p(),
            g: self.layout.mass_flux(&self.layout.sf, self.layout.channels_sf(), m_sf),
            heated: !heated,
            sat: self.backend.saturation(streams.sf_in.species(), pa(streams.sf_in.p())).ok(),
        };

        let h_nodes = self.node_enthalpies(&balance, streams.h_wf_out, &wf, &sf)?;
        let mut wf_nodes = Vec::with_capacity(h_nodes.len());
        let mut sf_nodes = Vec::with_capacity(h_nodes.len());
        for &h in &h_nodes {
            wf_nodes.push(self.backend.props(wf.species, InputPair::PH { p: pa(wf.p), h })?);
            let h_sf = balance.h_sf_at(h);
            sf_nodes.push(self.backend.props(sf.species, InputPair::PH { p: pa(sf.p), h: h_sf })?);
        }

        let sign = if heated { 1.0 } else { -1.0 };
        let mut pinch = f64::INFINITY;
        for (node, (w, s)) in wf_nodes.iter().zip(&sf_nodes).enumerate() {
            let dt = s.t - w.t;
            if dt * sign <= 0.0 {
                return Err(ComponentError::PinchCrossing {
                    component: self.name.to_owned(),
                    node,
                    dt,
                });
            }
            pinch = pinch.min(dt.abs());
        }

        let mut segments = Vec::with_capacity(h_nodes.len().saturating_sub(1));
        for i in 0..h_nodes.len().saturating_sub(1) {
            let ends = [i, i + 1];
            segments.push(self.segment(
                &balance,
                [h_nodes[i], h_nodes[i + 1]],
                ends.map(|j| &wf_nodes[j]),
                ends.map(|j| &sf_nodes[j]),
                &wf,
                &sf,
            )?);
        }

        let l: f64 = segments.iter().map(|s| s.l).sum();
        let mean = |rho: fn(&Segment) -> f64, fallback: f64| {
            if l > 0.0 {
                segments.iter().map(|s| rho(s) * s.l).sum::<f64>() / l
            } else {
                fallback
            }
        };
        let rho_wf = mean(|s| s.rho_wf, wf_nodes[0].rho);
        let rho_sf = mean(|s| s.rho_sf, sf_nodes[0].rho);
        let (sf_first, sf_last) = (&sf_nodes[0], &sf_nodes[sf_nodes.len() - 1]);
        let (sf_in, sf_out) = match self.layout.arrangement {
            FlowArrangement::Counter => (sf_last, sf_first),
            FlowArrangement::Parallel => (sf_first, sf_last),
        };

        let dp_wf = segments.iter().map(|s| s.dp_wf).sum::<f64>()
            + self.port_loss(&self.layout.wf, m_wf, wf_nodes[0].rho, wf_nodes[wf_nodes.len() - 1].rho)
            + rho_wf * self.defaults.gravity * self.layout.wf.orientation.rise() * l;
        let dp_sf = segments.iter().map(|s| s.dp_sf).sum::<f64>()
            + self.port_loss(&self.layout.sf, m_sf, sf_in.rho, sf_out.rho)
            + rho_sf * self.defaults.gravity * self.layout.sf.orientation.rise() * l;

        tracing::debug!(
            component = self.name,
            segments = segments.len(),
            q = balance.q,
            l,
            pinch,
            "plate pack analysed"
        );
        Ok(HxSolution {
            q: balance.q,
            l,
            dp_wf,
            dp_sf,
            pinch,
            h_wf_out: streams.h_wf_out,
            h_sf_out: balance.h_sf_out(),
            segments,
        })
    }

    fn infeasible(&self, what: String) -> ComponentError {
        ComponentError::Infeasible {
            component: self.name.to_owned(),
            what,
        }
    }

    /// Inlet and outlet port losses as multiples of the port dynamic head.
    fn port_loss(&self, side: &PlateSide, m: f64, rho_in: f64, rho_out: f64) -> f64 {
        let g = m / side.port_area();
        0.5 * g
            * g
            * (self.defaults.dp_port_in_factor / rho_in + self.defaults.dp_port_out_factor / rho_out)
    }

    fn node_enthalpies(
        &self,
        balance: &Balance,
        h_out: f64,
        wf: &SideFlow<'_>,
        sf: &SideFlow<'_>,
    ) -> ComponentResult<Vec<f64>> {
        let h_in = balance.h_wf_in;
        let tol = self.defaults.tolerances();
        if (h_out - h_in).abs() <= tol.band(h_in) {
            return Ok(vec![h_in]);
        }

        let inside = |h: f64| (h - h_in) * (h_out - h) > 0.0;
        let mut cuts = vec![h_in, h_out];
        if let Some(sat) = &wf.sat {
            cuts.extend([sat.liquid.h, sat.vapour.h].into_iter().filter(|&h| inside(h)));
        }
        if let Some(sat) = &sf.sat {
            cuts.extend(
                [sat.liquid.h, sat.vapour.h]
                    .into_iter()
                    .map(|h_sf| balance.h_wf_at(h_sf))
                    .filter(|&h| inside(h)),
            );
        }
        cuts.sort_by(|a, b| a.total_cmp(b));
        if h_out < h_in {
            cuts.reverse();
        }
        cuts.dedup_by(|a, b| (*a - *b).abs() <= tol.band(*b));

        let mut steps = Vec::with_capacity(cuts.len() - 1);
        for zone in cuts.windows(2) {
            steps.push(self.zone_steps(zone[0], zone[1], wf)?);
        }
        cap_steps(&mut steps, self.defaults.max_walls);

        let mut nodes = vec![h_in];
        for (zone, &n) in cuts.windows(2).zip(&steps) {
            let dh = (zone[1] - zone[0]) / n as f64;
            nodes.extend((1..n).map(|k| zone[0] + dh * k as f64));
            nodes.push(zone[1]);
        }
        Ok(nodes)
    }

    fn zone_steps(&self, h0: f64, h1: f64, wf: &SideFlow<'_>) -> ComponentResult<usize> {
        let mid = 0.5 * (h0 + h1);
        if let Some(sat) = &wf.sat
            && sat.is_inside(mid, self.defaults.tol_abs_x)
        {
            let dx = (sat.quality_of(h1) - sat.quality_of(h0)).abs();
            return Ok(((dx / self.defaults.div_x).ceil() as usize).max(1));
        }
        let t = |h: f64| -> ComponentResult<f64> {
            Ok(self.backend.props(wf.species, InputPair::PH { p: pa(wf.p), h })?.t)
        };
        let dt = (t(h1)? - t(h0)?).abs();
        Ok(((dt / self.defaults.div_t).ceil() as usize).max(1))
    }

    fn segment(
        &self,
        balance: &Balance,
        h: [f64; 2],
        wf_ends: [&ThermoProps; 2],
        sf_ends: [&ThermoProps; 2],
        wf: &SideFlow<'_>,
        sf: &SideFlow<'_>,
    ) -> ComponentResult<Segment> {
        let h_mid = 0.5 * (h[0] + h[1]);
        let (regime_wf, props_wf) = wf.local(self.backend, h_mid)?;
        let (regime_sf, props_sf) = sf.local(self.backend, balance.h_sf_at(h_mid))?;

        let dt = [sf_ends[0].t - wf_ends[0].t, sf_ends[1].t - wf_ends[1].t];
        let lmtd = lmtd(dt[0], dt[1]);
        let q = balance.m_wf * (h[1] - h[0]).abs();
        let fixed = wf.plate.r_fouling + self.layout.wall_resistance() + sf.plate.r_fouling;
        let gravity = self.defaults.gravity;

        let film = |flow: &SideFlow<'_>, props: FlowProps, regime: Regime, q_flux: f64| {
            let input = FlowInput {
                g: flow.g,
                props,
                q_flux,
                gravity,
            };
            let (method, heat) = self.methods.heat(&flow.plate.geometry, flow.side, regime, &input)?;
            Ok::<_, ComponentError>((method, heat.h * flow.plate.geometry.area_factor()))
        };

        let tol = self.defaults.tolerances();
        let mut q_flux = 0.0;
        let mut iterations = 0;
        let (u, method_wf, method_sf) = loop {
            let (method_wf, h_wf) = film(wf, props_wf, regime_wf, q_flux)?;
            let (method_sf, h_sf) = film(sf, props_sf, regime_sf, q_flux)?;
            let u = 1.0 / (1.0 / h_wf + fixed + 1.0 / h_sf);
            let next = u * lmtd;
            iterations += 1;
            let flux_dependent = method_wf.uses_heat_flux() || method_sf.uses_heat_flux();
            if !flux_dependent || (next - q_flux).abs() <= tol.band(next) {
                break (u, method_wf, method_sf);
            }
            if iterations >= self.defaults.max_iter_component {
                return Err(ComponentError::Convergence {
                    component: self.name.to_owned(),
                    what: "segment heat flux",
                    iterations,
                    residual: next - q_flux,
                });
            }
            q_flux = next;
        };

        let area = q / (u * lmtd);
        let l = area / (self.layout.walls() as f64 * self.layout.w);
        let friction = |flow: &SideFlow<'_>, props: FlowProps, regime: Regime| {
            let input = FlowInput {
                g: flow.g,
                props,
                q_flux: u * lmtd,
                gravity,
            };
            let f = self.methods.friction(&flow.plate.geometry, flow.side, regime, &input)?.f;
            Ok::<_, ComponentError>(2.0 * f * flow.g * flow.g * l / (props.rho() * flow.plate.geometry.dh()))
        };

        Ok(Segment {
            t_wf: [wf_ends[0].t, wf_ends[1].t],
            t_sf: [sf_ends[0].t, sf_ends[1].t],
            regime_wf,
            regime_sf,
            method_wf,
            method_sf,
            u,
            lmtd,
            q,
            area,
            l,
            dp_wf: friction(wf, props_wf, regime_wf)?,
            dp_sf: friction(sf, props_sf, regime_sf)?,
            rho_wf: props_wf.rho(),
            rho_sf: props_sf.rho(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lmtd_limits() {
        assert!((lmtd(10.0, 10.0) - 10.0).abs() < 1e-12);
        let expected = (20.0 - 10.0) / 2f64.ln();
        assert!((lmtd(20.0, 10.0) - expected).abs() < 1e-12);
        assert!((lmtd(-20.0, -10.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn capped_steps_respect_max_walls() {
        let mut steps = vec![150, 10, 90];
        cap_steps(&mut steps, 200);
        assert!(steps.iter().sum::<usize>() <= 200);
        assert!(steps.iter().all(|&n| n >= 1));

        let mut steps = vec![1, 1, 400];
        cap_steps(&mut steps, 10);
        assert_eq!(steps.iter().sum::<usize>(), 10);
        assert_eq!(&steps[..2], &[1, 1]);

        let mut steps = vec![3, 4];
        cap_steps(&mut steps, 200);
        assert_eq!(steps, vec![3, 4]);
    }

    #[test]
    fn balance_closes_at_both_ends() {
        for arrangement in [FlowArrangement::Counter, FlowArrangement::Parallel] {
            let balance = Balance {
                arrangement,
                h_wf_in: 1.0e5,
                m_wf: 0.5,
                h_sf_in: 4.0e5,
                m_sf: 2.0,
                q: 0.5 * 2.0e5,
            };
            let h_wf_out = 3.0e5;
            let (h_sf_in_end, h_sf_out_end) = match arrangement {
                FlowArrangement::Counter => (h_wf_out, 1.0e5),
                FlowArrangement::Parallel => (1.0e5, h_wf_out),
            };
            assert!((balance.h_sf_at(h_sf_in_end) - 4.0e5).abs() < 1e-6);
            assert!((balance.h_sf_at(h_sf_out_end) - balance.h_sf_out()).abs() < 1e-6);
            assert!((balance.h_wf_at(balance.h_sf_at(2.0e5)) - 2.0e5).abs() < 1e-6);
        }
    }
}
