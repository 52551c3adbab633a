use thiserror::Error;

use crate::{Cost, NodeLabel, MAX_NODES, UNREACHABLE_COST};

/// Structural errors raised by the routing core. None of them leave the topology
/// partially mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    #[error("node {label} does not exist in a network of {node_count} nodes")]
    InvalidReference { label: NodeLabel, node_count: usize },
    #[error("link cost {0} is out of range (must be below {})", UNREACHABLE_COST)]
    InvalidCost(Cost),
    #[error("node {neighbour} is not a neighbour of node {node}")]
    NotNeighbour { node: NodeLabel, neighbour: NodeLabel },
    #[error("node {0} cannot be linked to itself")]
    SelfLink(NodeLabel),
    #[error("link {0}-{1} is already defined")]
    DuplicateLink(NodeLabel, NodeLabel),
    #[error("a network needs at least one node")]
    EmptyTopology,
    #[error("a network of {0} nodes exceeds the limit of {}", MAX_NODES)]
    TooManyNodes(usize),
    #[error("malformed topology source at line {line}: {reason}")]
    MalformedTopologySource { line: usize, reason: String },
}
