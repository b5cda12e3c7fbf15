//! Incremental topology builder.

use pc_core::{CompId, PointId, PortId};

use crate::error::GraphResult;
use crate::graph::{Component, Graph, Point, Port, PortKind};
use crate::validate;

/// Collects state points and components, then validates and freezes them.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    points: Vec<Point>,
    components: Vec<Component>,
    ports: Vec<Port>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self, name: impl Into<String>) -> PointId {
        let id = PointId::from_index(self.points.len() as u32);
        self.points.push(Point {
            id,
            name: name.into(),
        });
        id
    }

    /// Add a component flowing from `inlet` to `outlet`.
    ///
    /// Components are ordered by insertion; a closed cycle is walked starting
    /// from the first one added.
    pub fn add_component(&mut self, name: impl Into<String>, inlet: PointId, outlet: PointId) -> CompId {
        let comp = CompId::from_index(self.components.len() as u32);
        let inlet_port = self.push_port(comp, inlet, PortKind::Inlet);
        let outlet_port = self.push_port(comp, outlet, PortKind::Outlet);
        self.components.push(Component {
            id: comp,
            name: name.into(),
            ports: [inlet_port, outlet_port],
        });
        comp
    }

    fn push_port(&mut self, comp: CompId, point: PointId, kind: PortKind) -> PortId {
        let id = PortId::from_index(self.ports.len() as u32);
        self.ports.push(Port { id, comp, point, kind });
        id
    }

    pub fn rename_point(&mut self, id: PointId, name: impl Into<String>) {
        if let Some(point) = self.points.get_mut(id.as_usize()) {
            point.name = name.into();
        }
    }

    pub fn rename_component(&mut self, id: CompId, name: impl Into<String>) {
        if let Some(comp) = self.components.get_mut(id.as_usize()) {
            comp.name = name.into();
        }
    }

    /// Validate references, build point adjacency and classify the topology.
    pub fn build(self) -> GraphResult<Graph> {
        validate::validate_structure(&self.points, &self.components, &self.ports)?;
        let (offsets, point_ports) = adjacency(self.points.len(), &self.ports);
        validate::validate_adjacency(&self.points, &self.ports, &offsets, &point_ports)?;
        let topology = validate::classify(&self.points, &self.components, &self.ports)?;

        Ok(Graph {
            points: self.points,
            components: self.components,
            ports: self.ports,
            offsets,
            point_ports,
            topology,
        })
    }
}

/// Flat point-to-port lists, ports sorted by id within each point.
fn adjacency(n_points: usize, ports: &[Port]) -> (Vec<usize>, Vec<PortId>) {
    let mut grouped: Vec<Vec<PortId>> = vec![Vec::new(); n_points];
    for port in ports {
        grouped[port.point.as_usize()].push(port.id);
    }

    let mut offsets = Vec::with_capacity(n_points + 1);
    let mut flat = Vec::with_capacity(ports.len());
    offsets.push(0);
    for mut list in grouped {
        list.sort();
        flat.extend(list);
        offsets.push(flat.len());
    }
    (offsets, flat)
}
