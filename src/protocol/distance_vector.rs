use log::debug;
use serde::Serialize;

use crate::network::{Node, Topology};
use crate::{Cost, NodeLabel, RoutingError, UNREACHABLE_COST};

/// A recomputed table for one node, not yet written back.
#[derive(Debug, Clone)]
pub struct VectorUpdate {
    pub distances: Vec<Cost>,
    pub next_hops: Vec<Option<NodeLabel>>,
    pub changed_entries: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IterationReport {
    pub updated_nodes: Vec<NodeLabel>,
    pub changed_entries: usize,
}

impl IterationReport {
    pub fn is_stable(&self) -> bool {
        self.changed_entries == 0
    }
}

/// `advertised + weight`, or `None` when either side is unknown or the sum would
/// reach the sentinel.
fn candidate_cost(advertised: Cost, weight: Cost) -> Option<Cost> {
    if advertised >= UNREACHABLE_COST || weight >= UNREACHABLE_COST {
        return None;
    }
    advertised
        .checked_add(weight)
        .filter(|&cost| cost < UNREACHABLE_COST)
}

/// Recomputes the table of `label` from its neighbours' tables in `view`.
///
/// `view` is read only, so every node computed against the same view sees the same
/// prior state. Only strictly cheaper routes replace existing ones. Destinations
/// that are unreachable, or whose next hop is unreachable, are forced back to
/// [`UNREACHABLE_COST`] after the neighbour pass.
pub fn compute_vector(view: &[Node], label: NodeLabel, split_horizon: bool) -> Result<VectorUpdate, RoutingError> {
    if label == 0 || label > view.len() {
        return Err(RoutingError::InvalidReference {
            label,
            node_count: view.len(),
        });
    }
    Ok(recompute(view, &view[label - 1], split_horizon))
}

/// `node` must be an element of `view`.
fn recompute(view: &[Node], node: &Node, split_horizon: bool) -> VectorUpdate {
    let label = node.label();
    let mut distances = node.distances().to_vec();
    let mut next_hops = node.next_hops().to_vec();

    if !node.is_initialized() {
        return VectorUpdate {
            distances,
            next_hops,
            changed_entries: 0,
        };
    }

    for &via in node.neighbours() {
        let neighbour = &view[via - 1];
        if !neighbour.is_reachable() {
            continue;
        }
        // Cost to the neighbour as it stands in this pass, so an improvement found
        // through an earlier neighbour already applies.
        let weight = distances[via - 1];

        for (index, &advertised) in neighbour.distances().iter().enumerate() {
            let destination = index + 1;

            if !view[index].is_reachable() {
                continue;
            }
            if split_horizon && node.has_neighbour(destination) {
                continue;
            }
            if destination == label {
                continue;
            }

            let Some(candidate) = candidate_cost(advertised, weight) else {
                continue;
            };
            if candidate < distances[index] {
                distances[index] = candidate;
                next_hops[index] = Some(via);
                debug!(
                    "Improved route from {} to {} via {} cost {}",
                    label, destination, via, candidate
                );
            }
        }
    }

    for index in 0..distances.len() {
        if index + 1 == label {
            continue;
        }
        let destination_down = !view[index].is_reachable();
        let next_hop_down = next_hops[index].is_some_and(|hop| !view[hop - 1].is_reachable());
        if destination_down || next_hop_down {
            distances[index] = UNREACHABLE_COST;
            next_hops[index] = None;
        }
    }

    let changed_entries = distances
        .iter()
        .zip(&next_hops)
        .zip(node.distances().iter().zip(node.next_hops()))
        .filter(|(new, old)| new.0 != old.0 || new.1 != old.1)
        .count();

    VectorUpdate {
        distances,
        next_hops,
        changed_entries,
    }
}

/// Recomputes one node's table in place against the current topology state.
/// Returns the number of entries that changed.
pub fn update_vector(topology: &mut Topology, label: NodeLabel, split_horizon: bool) -> Result<usize, RoutingError> {
    let update = compute_vector(topology.nodes(), label, split_horizon)?;
    let changed = update.changed_entries;
    topology.nodes_mut()[label - 1].replace_vector(update.distances, update.next_hops);
    Ok(changed)
}

/// One network-wide exchange: every reachable node recomputes its table in label
/// order, all against the tables as they stood before the pass.
pub fn run_iteration(topology: &mut Topology) -> IterationReport {
    let split_horizon = topology.split_horizon();
    let view: Vec<Node> = topology.nodes().to_vec();
    let mut report = IterationReport::default();

    for node in view.iter().filter(|node| node.is_reachable()) {
        let update = recompute(&view, node, split_horizon);
        report.changed_entries += update.changed_entries;
        report.updated_nodes.push(node.label());
        topology.nodes_mut()[node.label() - 1].replace_vector(update.distances, update.next_hops);
    }

    report
}
