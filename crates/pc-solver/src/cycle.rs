//! Closed-cycle and open-chain solving by successive substitution.

use pc_components::Component;
use pc_core::units::pa;
use pc_core::{Defaults, PointId, timed};
use pc_fluids::{FlowState, InputPair, PropertyBackend};
use pc_graph::Graph;

use crate::error::{SolverError, SolverResult};
use crate::seed::envelope_seed;
use crate::solution::{CycleSolution, CycleStatus, PointSnapshot, SeedSource, Totals};

/// Outcome of one pass over every component.
#[derive(Debug, Clone, Copy)]
struct Pass {
    converged: bool,
    /// Largest change of the governing attribute at any state point.
    residual: f64,
}

/// Components wired by a validated topology, with one state per state point.
///
/// `components[i]` fills the graph slot with id `i`. The cycle is assembled
/// once; solving changes only the point states and component outputs.
///
/// In a closed cycle the seed point keeps the seed pressure: the component
/// that closes the loop hands back its outlet enthalpy at that pressure, and
/// the pressure it actually produced is reported as the closure mismatch.
#[derive(Debug)]
pub struct Cycle {
    graph: Graph,
    components: Vec<Box<dyn Component>>,
    states: Vec<Option<FlowState>>,
    /// Caller's state at the seed point, restored if the envelope seed fails.
    seed: Option<FlowState>,
    status: CycleStatus,
    residual: f64,
    /// Closing outlet pressure minus the seed pressure [Pa].
    pressure_closure: f64,
    defaults: Defaults,
}

impl Cycle {
    pub fn new(graph: Graph, components: Vec<Box<dyn Component>>, defaults: &Defaults) -> SolverResult<Self> {
        defaults.validate().map_err(|e| SolverError::Setup { what: e.to_string() })?;
        if components.len() != graph.components().len() {
            return Err(SolverError::Setup {
                what: format!(
                    "topology has {} components but {} were supplied",
                    graph.components().len(),
                    components.len()
                ),
            });
        }
        for (slot, comp) in graph.components().iter().zip(&components) {
            if slot.name != comp.name() {
                return Err(SolverError::Setup {
                    what: format!("slot {} is '{}' but component is '{}'", slot.id, slot.name, comp.name()),
                });
            }
        }

        let states = vec![None; graph.points().len()];
        Ok(Self {
            graph,
            components,
            states,
            seed: None,
            status: CycleStatus::Unconverged,
            residual: f64::INFINITY,
            pressure_closure: 0.0,
            defaults: defaults.clone(),
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn status(&self) -> CycleStatus {
        self.status
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub fn components(&self) -> &[Box<dyn Component>] {
        &self.components
    }

    pub fn component(&self, name: &str) -> Option<&dyn Component> {
        self.components.iter().find(|c| c.name() == name).map(|c| c.as_ref())
    }

    pub fn component_mut(&mut self, name: &str) -> Option<&mut Box<dyn Component>> {
        self.components.iter_mut().find(|c| c.name() == name)
    }

    pub fn state(&self, point: PointId) -> Option<&FlowState> {
        self.states.get(point.as_usize())?.as_ref()
    }

    pub fn state_by_name(&self, name: &str) -> Option<&FlowState> {
        let point = self.graph.points().iter().find(|p| p.name == name)?;
        self.state(point.id)
    }

    /// Set the starting state of the seed point and mark the cycle unconverged.
    pub fn set_seed(&mut self, state: FlowState) -> SolverResult<()> {
        let point = self.seed_point()?;
        self.states[point.as_usize()] = Some(state.clone());
        self.seed = Some(state);
        self.status = CycleStatus::Unconverged;
        Ok(())
    }

    fn seed_point(&self) -> SolverResult<PointId> {
        self.graph.seed_point().ok_or_else(|| SolverError::Setup {
            what: "topology has no seed point".into(),
        })
    }

    /// Drive the cycle to a self-consistent state.
    ///
    /// Open chains run one pass. Closed cycles iterate until the pressure and
    /// the governing attribute stop changing at every state point; a cycle
    /// that is already converged confirms it on the first pass.
    pub fn solve(&mut self, backend: &dyn PropertyBackend) -> SolverResult<CycleSolution> {
        let (result, elapsed) = timed("cycle solve", || self.solve_inner(backend));
        let mut solution = result?;
        solution.elapsed_s = elapsed.as_secs_f64();
        tracing::info!(
            iterations = solution.iterations,
            net_power = solution.net_power,
            efficiency = ?solution.efficiency,
            "cycle converged"
        );
        Ok(solution)
    }

    fn solve_inner(&mut self, backend: &dyn PropertyBackend) -> SolverResult<CycleSolution> {
        let point = self.seed_point()?;
        let Some(given) = self.states[point.as_usize()].clone() else {
            return Err(SolverError::Setup {
                what: "seed point has no state".into(),
            });
        };

        if !self.graph.is_closed() {
            let pass = self.pass(backend)?;
            self.residual = pass.residual;
            self.status = CycleStatus::Converged { iterations: 1 };
            return Ok(self.solution(SeedSource::Given));
        }

        let use_envelope = self.defaults.try_build_phase_envelope && !self.status.is_converged();
        if use_envelope {
            match envelope_seed(backend, &given) {
                Ok(state) => {
                    self.reset(point, state);
                    match self.iterate(backend, SeedSource::Envelope) {
                        Ok(()) => return Ok(self.solution(SeedSource::Envelope)),
                        Err(e) => {
                            tracing::warn!(error = %e, "iteration from envelope seed failed, retrying from given seed");
                        }
                    }
                    let fallback = self.seed.clone().unwrap_or(given);
                    self.reset(point, fallback);
                    self.iterate(backend, SeedSource::Fallback)?;
                    return Ok(self.solution(SeedSource::Fallback));
                }
                Err(e) => tracing::warn!(error = %e, "phase envelope unavailable, using given seed"),
            }
        }

        self.iterate(backend, SeedSource::Given)?;
        Ok(self.solution(SeedSource::Given))
    }

    /// Clear every point and restart from `seed`.
    fn reset(&mut self, point: PointId, seed: FlowState) {
        self.states.iter_mut().for_each(|s| *s = None);
        self.states[point.as_usize()] = Some(seed);
        self.status = CycleStatus::Unconverged;
        self.residual = f64::INFINITY;
        self.pressure_closure = 0.0;
    }

    fn iterate(&mut self, backend: &dyn PropertyBackend, seed: SeedSource) -> SolverResult<()> {
        let max_iter = self.defaults.max_iter_cycle;
        for iteration in 1..=max_iter {
            self.status = CycleStatus::Iterating { iteration };
            let pass = self.pass(backend)?;
            self.residual = pass.residual;
            tracing::debug!(
                iteration,
                residual = pass.residual,
                pressure_closure = self.pressure_closure,
                "cycle pass"
            );
            if pass.converged {
                self.status = CycleStatus::Converged { iterations: iteration };
                return Ok(());
            }
        }

        self.status = CycleStatus::MaxIterExceeded {
            iterations: max_iter,
            residual: self.residual,
        };
        Err(SolverError::MaxIterExceeded {
            iterations: max_iter,
            residual: self.residual,
            last: Box::new(self.solution(seed)),
        })
    }

    /// Run every component in flow order, moving each outlet to the next inlet.
    fn pass(&mut self, backend: &dyn PropertyBackend) -> SolverResult<Pass> {
        let tol = self.defaults.tolerances();
        let attr = self.defaults.tol_attr;
        let mut pass = Pass {
            converged: true,
            residual: 0.0,
        };
        let anchor = match self.graph.seed_point() {
            Some(point) if self.graph.is_closed() => self.states[point.as_usize()]
                .as_ref()
                .map(|state| (point, state.p())),
            _ => None,
        };

        let order = self.graph.order().to_vec();
        for comp_id in order {
            let endpoints = (self.graph.inlet_point(comp_id), self.graph.outlet_point(comp_id));
            let (inlet_point, outlet_point) = match endpoints {
                (Some(i), Some(o)) => (i, o),
                _ => {
                    return Err(SolverError::Setup {
                        what: format!("component {comp_id} has no endpoints"),
                    });
                }
            };
            let inlet = self.states[inlet_point.as_usize()]
                .clone()
                .ok_or_else(|| SolverError::Setup {
                    what: format!("no state at the inlet of component {comp_id}"),
                })?;

            let component = &mut self.components[comp_id.as_usize()];
            component.set_inlet(inlet);
            let mut outlet = component.run(backend).map_err(|source| SolverError::Component {
                component: component.name().to_owned(),
                source,
            })?;
            if let Some((point, p_seed)) = anchor
                && point == outlet_point
            {
                self.pressure_closure = outlet.p() - p_seed;
                if outlet.p() != p_seed {
                    outlet = outlet.with_state(
                        backend,
                        InputPair::PH {
                            p: pa(p_seed),
                            h: outlet.h(),
                        },
                    )?;
                }
            }

            let next = outlet.attr(attr);
            match &self.states[outlet_point.as_usize()] {
                Some(previous) => {
                    let prev = previous.attr(attr);
                    let change = (next - prev).abs();
                    pass.residual = pass.residual.max(change);
                    let p_change = (outlet.p() - previous.p()).abs();
                    if !(change <= tol.band(prev)) || !(p_change <= tol.band(previous.p())) {
                        pass.converged = false;
                    }
                }
                None => {
                    pass.converged = false;
                    pass.residual = f64::INFINITY;
                }
            }
            self.states[outlet_point.as_usize()] = Some(outlet);
        }
        Ok(pass)
    }

    fn solution(&self, seed: SeedSource) -> CycleSolution {
        let iterations = match self.status {
            CycleStatus::Converged { iterations } | CycleStatus::MaxIterExceeded { iterations, .. } => iterations,
            CycleStatus::Iterating { iteration } => iteration,
            CycleStatus::Unconverged => 0,
        };
        let totals = Totals::from_snapshots(self.components.iter().map(|c| c.snapshot()).collect());
        let efficiency = totals.efficiency();
        let points = self
            .graph
            .points()
            .iter()
            .filter_map(|p| Some(PointSnapshot::new(&p.name, self.state(p.id)?)))
            .collect();

        CycleSolution {
            status: self.status,
            seed,
            iterations,
            residual: self.residual,
            pressure_closure: self.pressure_closure,
            net_power: totals.net_power,
            heat_in: totals.heat_in,
            heat_rejected: totals.heat_rejected,
            efficiency,
            components: totals.components,
            points,
            elapsed_s: 0.0,
        }
    }
}
