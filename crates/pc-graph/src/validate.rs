//! Structural checks and topology classification.

use std::collections::HashSet;

use pc_core::{CompId, PortId};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Component, Point, Port, PortKind, Topology, TopologyKind};

/// All ids are contiguous and every reference resolves.
pub(crate) fn validate_structure(points: &[Point], components: &[Component], ports: &[Port]) -> GraphResult<()> {
    for (i, port) in ports.iter().enumerate() {
        if port.id.as_usize() != i {
            return Err(GraphError::InconsistentAdjacency {
                port: port.id,
                point: port.point,
            });
        }
        if port.point.as_usize() >= points.len() {
            return Err(GraphError::InvalidPointRef {
                port: port.id,
                point: port.point,
            });
        }
    }

    for comp in components {
        let [inlet, outlet] = comp.ports;
        if inlet == outlet {
            return Err(GraphError::DuplicatePorts {
                comp: comp.id,
                port: inlet,
            });
        }
        for (port_id, kind) in [(inlet, PortKind::Inlet), (outlet, PortKind::Outlet)] {
            let Some(port) = ports.get(port_id.as_usize()) else {
                return Err(GraphError::Disconnected {
                    what: format!("component {} lists unknown port {port_id}", comp.id),
                });
            };
            if port.comp != comp.id || port.kind != kind {
                return Err(GraphError::PortCompMismatch {
                    port: port_id,
                    expected: comp.id,
                    actual: port.comp,
                });
            }
        }
    }
    Ok(())
}

/// Every port appears exactly once, under the point it attaches to.
pub(crate) fn validate_adjacency(
    points: &[Point],
    ports: &[Port],
    offsets: &[usize],
    point_ports: &[PortId],
) -> GraphResult<()> {
    if offsets.len() != points.len() + 1 {
        return Err(GraphError::Disconnected {
            what: format!("{} adjacency offsets for {} points", offsets.len(), points.len()),
        });
    }

    let mut seen = HashSet::with_capacity(ports.len());
    for point in points {
        let i = point.id.as_usize();
        for &port_id in &point_ports[offsets[i]..offsets[i + 1]] {
            let attached = ports.get(port_id.as_usize()).is_some_and(|p| p.point == point.id);
            if !attached || !seen.insert(port_id) {
                return Err(GraphError::InconsistentAdjacency {
                    port: port_id,
                    point: point.id,
                });
            }
        }
    }

    match ports.iter().find(|p| !seen.contains(&p.id)) {
        Some(port) => Err(GraphError::InconsistentAdjacency {
            port: port.id,
            point: port.point,
        }),
        None => Ok(()),
    }
}

/// Classify the topology as a single closed cycle or a single open chain
/// and return its components in flow order.
///
/// Each state point may be fed by at most one component outlet and may feed
/// at most one component inlet.
pub(crate) fn classify(points: &[Point], components: &[Component], ports: &[Port]) -> GraphResult<Topology> {
    if components.is_empty() {
        return Err(GraphError::Empty);
    }

    // consumer[i]: component whose inlet sits on point i; producer[i]: whose outlet does.
    let mut consumer: Vec<Vec<CompId>> = vec![Vec::new(); points.len()];
    let mut producer: Vec<Vec<CompId>> = vec![Vec::new(); points.len()];
    for port in ports {
        match port.kind {
            PortKind::Inlet => consumer[port.point.as_usize()].push(port.comp),
            PortKind::Outlet => producer[port.point.as_usize()].push(port.comp),
        }
    }

    let mut sources = Vec::new();
    let mut sinks = Vec::new();
    for point in points {
        let i = point.id.as_usize();
        let (feeds, fed_by) = (consumer[i].len(), producer[i].len());
        if feeds > 1 || fed_by > 1 {
            return Err(GraphError::Branch {
                point: point.id,
                name: point.name.clone(),
                feeds,
                fed_by,
            });
        }
        match (feeds, fed_by) {
            (0, 0) => {
                return Err(GraphError::Dangling {
                    point: point.id,
                    name: point.name.clone(),
                });
            }
            (1, 0) => sources.push(i),
            (0, 1) => sinks.push(i),
            _ => {}
        }
    }

    let (kind, start) = match (sources.as_slice(), sinks.len()) {
        ([], 0) => (TopologyKind::Closed, components[0].id),
        ([source], 1) => (TopologyKind::Open, consumer[*source][0]),
        _ => {
            return Err(GraphError::Disconnected {
                what: format!("{} source and {} sink points", sources.len(), sinks.len()),
            });
        }
    };

    let mut order = Vec::with_capacity(components.len());
    let mut current = Some(start);
    while let Some(comp) = current {
        if order.contains(&comp) {
            break;
        }
        order.push(comp);
        let outlet = ports[components[comp.as_usize()].outlet().as_usize()].point;
        current = consumer[outlet.as_usize()].first().copied();
    }

    if order.len() != components.len() {
        return Err(GraphError::Disconnected {
            what: format!(
                "{} of {} components reachable from '{}'",
                order.len(),
                components.len(),
                components[start.as_usize()].name
            ),
        });
    }
    Ok(Topology { kind, order })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_core::Id;

    fn point(i: u32) -> Point {
        Point {
            id: Id::from_index(i),
            name: format!("p{i}"),
        }
    }

    #[test]
    fn point_reference_out_of_range() {
        let points = vec![point(0)];
        let ports = vec![Port {
            id: Id::from_index(0),
            comp: Id::from_index(0),
            point: Id::from_index(99),
            kind: PortKind::Inlet,
        }];
        let err = validate_structure(&points, &[], &ports).unwrap_err();
        assert!(matches!(err, GraphError::InvalidPointRef { .. }));
    }

    #[test]
    fn port_owned_by_another_component() {
        let points = vec![point(0), point(1)];
        let ports = vec![
            Port {
                id: Id::from_index(0),
                comp: Id::from_index(0),
                point: Id::from_index(0),
                kind: PortKind::Inlet,
            },
            Port {
                id: Id::from_index(1),
                comp: Id::from_index(7),
                point: Id::from_index(1),
                kind: PortKind::Outlet,
            },
        ];
        let components = vec![Component {
            id: Id::from_index(0),
            name: "c".into(),
            ports: [Id::from_index(0), Id::from_index(1)],
        }];
        let err = validate_structure(&points, &components, &ports).unwrap_err();
        assert!(matches!(err, GraphError::PortCompMismatch { .. }));
    }

    #[test]
    fn empty_topology() {
        assert_eq!(classify(&[], &[], &[]), Err(GraphError::Empty));
    }
}
