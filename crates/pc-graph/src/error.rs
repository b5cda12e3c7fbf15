//! Graph-specific error types.

use pc_core::{CompId, PointId, PortId};
use thiserror::Error;

/// Cycle topology construction and validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Port {port} refers to non-existent state point {point}")]
    InvalidPointRef { port: PortId, point: PointId },

    #[error("Port {port} should belong to component {expected} but references {actual}")]
    PortCompMismatch {
        port: PortId,
        expected: CompId,
        actual: CompId,
    },

    #[error("Component {comp} uses port {port} twice")]
    DuplicatePorts { comp: CompId, port: PortId },

    #[error("Port {port} is listed at state point {point} but does not attach to it")]
    InconsistentAdjacency { port: PortId, point: PointId },

    #[error("Topology has no components")]
    Empty,

    #[error("State point '{name}' ({point}) is not connected to any component")]
    Dangling { point: PointId, name: String },

    #[error("State point '{name}' ({point}) branches: {feeds} consumers, {fed_by} producers")]
    Branch {
        point: PointId,
        name: String,
        feeds: usize,
        fed_by: usize,
    },

    #[error("Topology is not a single cycle or chain: {what}")]
    Disconnected { what: String },
}

pub type GraphResult<T> = Result<T, GraphError>;
