use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::network::Node;
use crate::{Cost, NodeLabel, RoutingError};

/// Every node of one loaded network plus the global split-horizon flag.
///
/// Nodes are created once and never removed; a failed node is only flagged as
/// unreachable. Label `n` is stored at position `n - 1`.
#[derive(Debug, Clone)]
pub struct Topology {
    nodes: Vec<Node>,
    split_horizon: bool,
}

/// One row of a routing table as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub destination: NodeLabel,
    pub cost: Cost,
    pub next_hop: Option<NodeLabel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub label: NodeLabel,
    pub reachable: bool,
    pub routes: Vec<RouteEntry>,
}

impl Topology {
    /// Creates `node_count` nodes labelled `1..=node_count` with empty tables.
    pub fn new(node_count: usize) -> Self {
        Self {
            nodes: (1..=node_count).map(Node::new).collect(),
            split_horizon: false,
        }
    }

    /// Resets every table so each node only knows the route to itself.
    /// Must run before any direct link is seeded.
    pub fn initialize_vectors(&mut self) {
        let node_count = self.nodes.len();
        for node in &mut self.nodes {
            node.reset_vector(node_count);
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn node(&self, label: NodeLabel) -> Result<&Node, RoutingError> {
        self.check_label(label)?;
        Ok(&self.nodes[label - 1])
    }

    fn node_mut(&mut self, label: NodeLabel) -> Result<&mut Node, RoutingError> {
        self.check_label(label)?;
        Ok(&mut self.nodes[label - 1])
    }

    pub fn check_label(&self, label: NodeLabel) -> Result<(), RoutingError> {
        if label == 0 || label > self.nodes.len() {
            return Err(RoutingError::InvalidReference {
                label,
                node_count: self.nodes.len(),
            });
        }
        Ok(())
    }

    pub fn split_horizon(&self) -> bool {
        self.split_horizon
    }

    pub fn set_split_horizon(&mut self, enabled: bool) {
        self.split_horizon = enabled;
    }

    pub fn neighbours(&self, label: NodeLabel) -> Result<&[NodeLabel], RoutingError> {
        Ok(self.node(label)?.neighbours())
    }

    pub fn are_neighbours(&self, a: NodeLabel, b: NodeLabel) -> Result<bool, RoutingError> {
        self.check_label(b)?;
        Ok(self.node(a)?.has_neighbour(b))
    }

    /// Installs the direct route `a <-> b` on both ends.
    pub fn seed_direct_link(&mut self, a: NodeLabel, b: NodeLabel, cost: Cost) -> Result<(), RoutingError> {
        self.check_pair(a, b)?;
        debug_assert!(
            self.nodes[a - 1].is_initialized() && self.nodes[b - 1].is_initialized(),
            "initialize_vectors must run before seeding links"
        );

        self.nodes[a - 1].set_route(b, Some(b), cost);
        self.nodes[b - 1].set_route(a, Some(a), cost);
        debug!("Seeded direct link {} <-> {} cost {}", a, b, cost);
        Ok(())
    }

    /// Records `a` and `b` as neighbours of each other. A repeated call is a no-op.
    pub fn add_neighbour_link(&mut self, a: NodeLabel, b: NodeLabel) -> Result<(), RoutingError> {
        self.check_pair(a, b)?;
        let added_ab = self.nodes[a - 1].add_neighbour(b);
        let added_ba = self.nodes[b - 1].add_neighbour(a);
        if !(added_ab && added_ba) {
            debug!("Neighbour link {} <-> {} already present", a, b);
        }
        Ok(())
    }

    /// Overwrites `source`'s route to `dest`, whether or not it is an improvement.
    /// Beyond the bounds checks, `source == dest` is refused with
    /// [`RoutingError::SelfLink`] so the self route always stays at cost 0.
    pub fn update_link(
        &mut self,
        source: NodeLabel,
        dest: NodeLabel,
        outgoing: NodeLabel,
        cost: Cost,
    ) -> Result<(), RoutingError> {
        self.check_pair(source, dest)?;
        self.check_label(outgoing)?;

        self.nodes[source - 1].set_route(dest, Some(outgoing), cost);
        debug!("Route {} -> {} forced to cost {} via {}", source, dest, cost, outgoing);
        Ok(())
    }

    /// Flags `label` as unreachable. Routes through it are cleared by later
    /// propagation passes, not here.
    pub fn mark_unreachable(&mut self, label: NodeLabel) -> Result<(), RoutingError> {
        self.node_mut(label)?.set_unreachable();
        info!("Node {} marked unreachable", label);
        Ok(())
    }

    pub fn snapshot(&self) -> Vec<NodeSnapshot> {
        self.nodes
            .iter()
            .map(|node| NodeSnapshot {
                label: node.label(),
                reachable: node.is_reachable(),
                routes: node
                    .distances()
                    .iter()
                    .zip(node.next_hops())
                    .enumerate()
                    .map(|(index, (&cost, &next_hop))| RouteEntry {
                        destination: index + 1,
                        cost,
                        next_hop,
                    })
                    .collect(),
            })
            .collect()
    }

    fn check_pair(&self, a: NodeLabel, b: NodeLabel) -> Result<(), RoutingError> {
        self.check_label(a)?;
        self.check_label(b)?;
        if a == b {
            return Err(RoutingError::SelfLink(a));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UNREACHABLE_COST;
    use pretty_assertions::assert_eq;

    fn initialized(node_count: usize) -> Topology {
        let mut topology = Topology::new(node_count);
        topology.initialize_vectors();
        topology
    }

    #[test]
    fn new_topology_starts_empty_and_without_split_horizon() {
        let topology = Topology::new(3);
        assert_eq!(topology.node_count(), 3);
        assert!(!topology.split_horizon());
        assert!(topology.nodes().iter().all(|n| !n.is_initialized()));
        assert_eq!(
            topology.nodes().iter().map(Node::label).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn self_route_is_zero_after_initialization() {
        let topology = initialized(4);
        for node in topology.nodes() {
            assert_eq!(node.distance(node.label()), Some(0));
            assert_eq!(node.next_hop(node.label()), None);
            for other in 1..=4 {
                if other != node.label() {
                    assert_eq!(node.distance(other), Some(UNREACHABLE_COST));
                    assert_eq!(node.next_hop(other), None);
                }
            }
        }
    }

    #[test]
    fn seeding_is_symmetric() {
        let mut topology = initialized(3);
        topology.seed_direct_link(1, 3, 7).unwrap();

        assert_eq!(topology.node(1).unwrap().distance(3), Some(7));
        assert_eq!(topology.node(3).unwrap().distance(1), Some(7));
        assert_eq!(topology.node(1).unwrap().next_hop(3), Some(3));
        assert_eq!(topology.node(3).unwrap().next_hop(1), Some(1));
    }

    #[test]
    fn neighbour_links_are_idempotent() {
        let mut topology = initialized(3);
        topology.add_neighbour_link(1, 2).unwrap();
        topology.add_neighbour_link(2, 1).unwrap();
        topology.add_neighbour_link(2, 3).unwrap();

        assert_eq!(topology.neighbours(1).unwrap(), &[2]);
        assert_eq!(topology.neighbours(2).unwrap(), &[1, 3]);
        assert!(topology.are_neighbours(3, 2).unwrap());
        assert!(!topology.are_neighbours(1, 3).unwrap());
    }

    #[test]
    fn out_of_range_labels_are_rejected_without_mutation() {
        let mut topology = initialized(2);
        let before = topology.snapshot();

        assert_eq!(
            topology.seed_direct_link(1, 3, 1),
            Err(RoutingError::InvalidReference { label: 3, node_count: 2 })
        );
        assert_eq!(
            topology.update_link(0, 1, 1, 1),
            Err(RoutingError::InvalidReference { label: 0, node_count: 2 })
        );
        assert_eq!(
            topology.update_link(1, 2, 5, 1),
            Err(RoutingError::InvalidReference { label: 5, node_count: 2 })
        );
        assert!(topology.mark_unreachable(9).is_err());
        assert_eq!(topology.seed_direct_link(2, 2, 1), Err(RoutingError::SelfLink(2)));
        assert_eq!(topology.update_link(1, 1, 2, 5), Err(RoutingError::SelfLink(1)));
        assert_eq!(topology.snapshot(), before);
    }

    #[test]
    fn update_link_overwrites_even_when_worse() {
        let mut topology = initialized(2);
        topology.seed_direct_link(1, 2, 1).unwrap();
        topology.update_link(1, 2, 2, 40).unwrap();

        assert_eq!(topology.node(1).unwrap().distance(2), Some(40));
        assert_eq!(topology.node(2).unwrap().distance(1), Some(1));
    }

    #[test]
    fn mark_unreachable_keeps_neighbours_and_vectors() {
        let mut topology = initialized(2);
        topology.seed_direct_link(1, 2, 3).unwrap();
        topology.add_neighbour_link(1, 2).unwrap();
        topology.mark_unreachable(2).unwrap();

        assert!(!topology.node(2).unwrap().is_reachable());
        assert_eq!(topology.neighbours(1).unwrap(), &[2]);
        assert_eq!(topology.node(1).unwrap().distance(2), Some(3));
    }

    #[test]
    fn snapshot_lists_every_destination() {
        let mut topology = initialized(2);
        topology.seed_direct_link(1, 2, 4).unwrap();
        let snapshot = topology.snapshot();

        assert_eq!(
            snapshot[0],
            NodeSnapshot {
                label: 1,
                reachable: true,
                routes: vec![
                    RouteEntry { destination: 1, cost: 0, next_hop: None },
                    RouteEntry { destination: 2, cost: 4, next_hop: Some(2) },
                ],
            }
        );
    }
}
