//! Operations the shell and the loader drive the routing core through.

use log::{info, warn};

use crate::algorithms::{self, RouteOutcome};
use crate::network::{NodeSnapshot, Topology};
use crate::protocol::{self, IterationReport};
use crate::{Cost, NodeLabel, RoutingError, MAX_NODES, UNREACHABLE_COST};

/// Creates a network of `node_count` nodes with every table initialised.
pub fn build_topology(node_count: usize) -> Result<Topology, RoutingError> {
    if node_count == 0 {
        return Err(RoutingError::EmptyTopology);
    }
    if node_count > MAX_NODES {
        return Err(RoutingError::TooManyNodes(node_count));
    }
    let mut topology = Topology::new(node_count);
    topology.initialize_vectors();
    Ok(topology)
}

/// Adds one undirected link from the topology source: seeds the direct route on
/// both ends and records the adjacency.
pub fn load_link(topology: &mut Topology, a: NodeLabel, b: NodeLabel, cost: Cost) -> Result<(), RoutingError> {
    check_cost(cost)?;
    topology.check_label(a)?;
    topology.check_label(b)?;
    if a == b {
        return Err(RoutingError::SelfLink(a));
    }
    if topology.are_neighbours(a, b)? {
        return Err(RoutingError::DuplicateLink(a, b));
    }

    topology.seed_direct_link(a, b, cost)?;
    topology.add_neighbour_link(a, b)
}

pub fn run_iteration(topology: &mut Topology) -> IterationReport {
    protocol::run_iteration(topology)
}

pub fn set_split_horizon(topology: &mut Topology, enabled: bool) {
    topology.set_split_horizon(enabled);
    info!("Split horizon {}", if enabled { "enabled" } else { "disabled" });
}

/// Sets the cost of the existing link `a <-> b` in both directions.
pub fn change_link_cost(topology: &mut Topology, a: NodeLabel, b: NodeLabel, cost: Cost) -> Result<(), RoutingError> {
    check_cost(cost)?;
    if !topology.are_neighbours(a, b)? {
        return Err(RoutingError::NotNeighbour { node: a, neighbour: b });
    }

    topology.update_link(a, b, b, cost)?;
    topology.update_link(b, a, a, cost)?;
    info!("Link {} <-> {} now costs {}", a, b, cost);
    Ok(())
}

/// Marks `label` unreachable and forces every incident link to the sentinel.
pub fn fail_node(topology: &mut Topology, label: NodeLabel) -> Result<(), RoutingError> {
    let neighbours = topology.neighbours(label)?.to_vec();
    if !topology.node(label)?.is_reachable() {
        warn!("Node {} is already unreachable", label);
    }

    topology.mark_unreachable(label)?;
    for neighbour in neighbours {
        topology.update_link(label, neighbour, neighbour, UNREACHABLE_COST)?;
        topology.update_link(neighbour, label, label, UNREACHABLE_COST)?;
    }
    Ok(())
}

pub fn resolve_route(topology: &Topology, source: NodeLabel, destination: NodeLabel) -> Result<RouteOutcome, RoutingError> {
    algorithms::resolve_route(topology, source, destination)
}

pub fn snapshot(topology: &Topology) -> Vec<NodeSnapshot> {
    topology.snapshot()
}

fn check_cost(cost: Cost) -> Result<(), RoutingError> {
    if cost >= UNREACHABLE_COST {
        return Err(RoutingError::InvalidCost(cost));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_network_is_rejected() {
        assert_eq!(build_topology(0).unwrap_err(), RoutingError::EmptyTopology);
    }

    #[test]
    fn oversized_network_is_rejected() {
        assert_eq!(
            build_topology(MAX_NODES + 1).unwrap_err(),
            RoutingError::TooManyNodes(MAX_NODES + 1)
        );
        assert_eq!(build_topology(100_000).unwrap_err(), RoutingError::TooManyNodes(100_000));
    }

    #[test]
    fn load_link_validates_before_mutating() {
        let mut topology = build_topology(3).unwrap();
        load_link(&mut topology, 1, 2, 4).unwrap();
        let before = topology.snapshot();

        assert_eq!(load_link(&mut topology, 2, 1, 1), Err(RoutingError::DuplicateLink(2, 1)));
        assert_eq!(load_link(&mut topology, 3, 3, 1), Err(RoutingError::SelfLink(3)));
        assert_eq!(load_link(&mut topology, 1, 3, 999), Err(RoutingError::InvalidCost(999)));
        assert_eq!(
            load_link(&mut topology, 1, 4, 1),
            Err(RoutingError::InvalidReference { label: 4, node_count: 3 })
        );
        assert_eq!(topology.snapshot(), before);
    }

    #[test]
    fn change_link_cost_is_symmetric_and_requires_adjacency() {
        let mut topology = build_topology(3).unwrap();
        load_link(&mut topology, 1, 2, 4).unwrap();

        change_link_cost(&mut topology, 2, 1, 9).unwrap();
        assert_eq!(topology.node(1).unwrap().distance(2), Some(9));
        assert_eq!(topology.node(2).unwrap().distance(1), Some(9));

        assert_eq!(
            change_link_cost(&mut topology, 1, 3, 2),
            Err(RoutingError::NotNeighbour { node: 1, neighbour: 3 })
        );
        assert_eq!(change_link_cost(&mut topology, 1, 2, 1000), Err(RoutingError::InvalidCost(1000)));
    }

    #[test]
    fn fail_node_forces_incident_links_to_sentinel() {
        let mut topology = build_topology(3).unwrap();
        load_link(&mut topology, 1, 2, 1).unwrap();
        load_link(&mut topology, 2, 3, 1).unwrap();

        fail_node(&mut topology, 2).unwrap();
        assert!(!topology.node(2).unwrap().is_reachable());
        for (from, to) in [(1, 2), (2, 1), (2, 3), (3, 2)] {
            assert_eq!(topology.node(from).unwrap().distance(to), Some(UNREACHABLE_COST));
        }
        assert_eq!(topology.neighbours(2).unwrap(), &[1, 3]);
        assert!(fail_node(&mut topology, 7).is_err());
    }
}
