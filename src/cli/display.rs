use crate::algorithms::{NoRouteReason, RouteOutcome};
use crate::network::NodeSnapshot;
use crate::NodeLabel;

const NETWORK_HEADER: &str = "\
Source || (Destination Node, Cost, Outgoing Node)
----------------------------------------------------
";

pub fn format_network(snapshot: &[NodeSnapshot]) -> String {
    let mut out = String::from(NETWORK_HEADER);
    for node in snapshot {
        out.push_str(&format_row(node));
        out.push('\n');
    }
    out
}

fn format_row(node: &NodeSnapshot) -> String {
    let routes: Vec<String> = node
        .routes
        .iter()
        .map(|route| {
            let next_hop = route
                .next_hop
                .map_or_else(|| "-".to_string(), |hop| hop.to_string());
            format!("({},{},{})", route.destination, route.cost, next_hop)
        })
        .collect();
    let marker = if node.reachable { "" } else { "  [unreachable]" };
    format!("{:<6} || {}{}", node.label, routes.join(" "), marker)
}

pub fn format_route(source: NodeLabel, destination: NodeLabel, outcome: &RouteOutcome) -> String {
    let header = format!("Route from nodes {} to {}:", source, destination);
    match outcome {
        RouteOutcome::Found(route) => {
            let hops: Vec<String> = route.hops.iter().map(ToString::to_string).collect();
            format!("{}\n{}\nCost: {}", header, hops.join(" -> "), route.cost)
        }
        RouteOutcome::NoRoute(NoRouteReason::SameNode) => {
            format!("{}\nSource node is the same as destination node!", header)
        }
        RouteOutcome::NoRoute(NoRouteReason::Unknown) => format!("{}\nRoute is currently unknown", header),
        RouteOutcome::Inconsistent { visited } => {
            let hops: Vec<String> = visited.iter().map(ToString::to_string).collect();
            format!(
                "{}\nRoute is inconsistent (next hops loop or break): {} ...",
                header,
                hops.join(" -> ")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::ResolvedRoute;
    use crate::network::RouteEntry;

    #[test]
    fn network_rows_show_missing_hops_as_dash() {
        let snapshot = vec![NodeSnapshot {
            label: 1,
            reachable: false,
            routes: vec![
                RouteEntry { destination: 1, cost: 0, next_hop: None },
                RouteEntry { destination: 2, cost: 3, next_hop: Some(2) },
            ],
        }];

        let text = format_network(&snapshot);
        assert!(text.starts_with("Source || (Destination Node, Cost, Outgoing Node)\n---"));
        assert!(text.ends_with("\n1      || (1,0,-) (2,3,2)  [unreachable]\n"));
    }

    #[test]
    fn found_route_lists_hops_and_cost() {
        let outcome = RouteOutcome::Found(ResolvedRoute { hops: vec![1, 2, 3], cost: 2 });
        assert_eq!(
            format_route(1, 3, &outcome),
            "Route from nodes 1 to 3:\n1 -> 2 -> 3\nCost: 2"
        );
    }
}
