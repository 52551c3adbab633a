use serde::Serialize;

use crate::network::Topology;
use crate::{Cost, NodeLabel, RoutingError, UNREACHABLE_COST};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    pub hops: Vec<NodeLabel>,
    pub cost: Cost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoRouteReason {
    SameNode,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RouteOutcome {
    Found(ResolvedRoute),
    NoRoute(NoRouteReason),
    /// The next-hop chain loops or breaks before reaching the destination.
    Inconsistent { visited: Vec<NodeLabel> },
}

/// Walks the next-hop tables from `source` towards `destination`.
///
/// The walk stops after as many hops as there are nodes, so a next-hop cycle left
/// behind by a network that has not converged yet is reported instead of followed
/// forever.
pub fn resolve_route(
    topology: &Topology,
    source: NodeLabel,
    destination: NodeLabel,
) -> Result<RouteOutcome, RoutingError> {
    topology.check_label(destination)?;
    let cost = topology
        .node(source)?
        .distance(destination)
        .unwrap_or(UNREACHABLE_COST);

    if source == destination {
        return Ok(RouteOutcome::NoRoute(NoRouteReason::SameNode));
    }
    if cost == UNREACHABLE_COST {
        return Ok(RouteOutcome::NoRoute(NoRouteReason::Unknown));
    }

    let mut hops = vec![source];
    let mut current = source;
    for _ in 0..topology.node_count() {
        let Some(next) = topology.node(current)?.next_hop(destination) else {
            return Ok(RouteOutcome::Inconsistent { visited: hops });
        };
        hops.push(next);
        if next == destination {
            return Ok(RouteOutcome::Found(ResolvedRoute { hops, cost }));
        }
        current = next;
    }

    Ok(RouteOutcome::Inconsistent { visited: hops })
}
