//! Cycle topology: components joined by state points.

use pc_core::{CompId, PointId, PortId};

/// Which side of a component a port is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortKind {
    Inlet,
    Outlet,
}

/// A state point between components, where one flow state lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    pub id: PointId,
    pub name: String,
}

/// Attachment of a component side to a state point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub id: PortId,
    pub comp: CompId,
    pub point: PointId,
    pub kind: PortKind,
}

/// A component slot in the topology. Ports are `[inlet, outlet]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub id: CompId,
    pub name: String,
    pub ports: [PortId; 2],
}

impl Component {
    pub fn inlet(&self) -> PortId {
        self.ports[0]
    }

    pub fn outlet(&self) -> PortId {
        self.ports[1]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyKind {
    /// Every outlet feeds a downstream inlet and the path returns to its start.
    Closed,
    /// A single chain from a source point to a sink point.
    Open,
}

/// Validated component order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    pub kind: TopologyKind,
    /// Components in flow order, starting with the first declared component
    /// for a closed cycle or the one fed by the source point for a chain.
    pub order: Vec<CompId>,
}

/// Immutable, validated topology.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) points: Vec<Point>,
    pub(crate) components: Vec<Component>,
    pub(crate) ports: Vec<Port>,
    /// Point `i`'s ports are `point_ports[offsets[i]..offsets[i + 1]]`.
    pub(crate) offsets: Vec<usize>,
    pub(crate) point_ports: Vec<PortId>,
    pub(crate) topology: Topology,
}

impl Graph {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(id.as_usize())
    }

    pub fn component(&self, id: CompId) -> Option<&Component> {
        self.components.get(id.as_usize())
    }

    pub fn port(&self, id: PortId) -> Option<&Port> {
        self.ports.get(id.as_usize())
    }

    /// Ports attached to a state point.
    pub fn point_ports(&self, id: PointId) -> &[PortId] {
        let i = id.as_usize();
        if i >= self.points.len() {
            return &[];
        }
        &self.point_ports[self.offsets[i]..self.offsets[i + 1]]
    }

    pub fn inlet_point(&self, comp: CompId) -> Option<PointId> {
        let comp = self.component(comp)?;
        Some(self.port(comp.inlet())?.point)
    }

    pub fn outlet_point(&self, comp: CompId) -> Option<PointId> {
        let comp = self.component(comp)?;
        Some(self.port(comp.outlet())?.point)
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn order(&self) -> &[CompId] {
        &self.topology.order
    }

    pub fn is_closed(&self) -> bool {
        self.topology.kind == TopologyKind::Closed
    }

    /// Point whose state seeds iteration: the inlet of the first component in order.
    pub fn seed_point(&self) -> Option<PointId> {
        self.inlet_point(*self.topology.order.first()?)
    }
}
