//! Builds a [`Topology`] from the plain-text network description.
//!
//! ```text
//! 3
//! 1,2,1
//! 2,3,1
//! ```
//!
//! The first non-empty line is the node count, every following non-empty line is
//! an undirected `node,node,cost` link.

use std::fs;
use std::path::Path;

use anyhow::Context;
use log::info;

use crate::network::Topology;
use crate::simulation;
use crate::{Cost, NodeLabel, RoutingError};

pub fn parse_topology(source: &str) -> Result<Topology, RoutingError> {
    let mut lines = source
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (count_line, count_text) = lines
        .next()
        .ok_or_else(|| malformed(1, "missing node count"))?;
    let node_count: usize = count_text
        .parse()
        .map_err(|_| malformed(count_line, format!("invalid node count '{}'", count_text)))?;

    let mut topology = simulation::build_topology(node_count).map_err(|e| malformed(count_line, e.to_string()))?;

    for (line_number, line) in lines {
        let (a, b, cost) = parse_link(line).map_err(|reason| malformed(line_number, reason))?;
        simulation::load_link(&mut topology, a, b, cost).map_err(|e| malformed(line_number, e.to_string()))?;
    }

    Ok(topology)
}

pub fn load_topology_file(path: impl AsRef<Path>) -> anyhow::Result<Topology> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).with_context(|| format!("failed to read topology file {}", path.display()))?;
    let topology = parse_topology(&content).with_context(|| format!("failed to load topology from {}", path.display()))?;
    info!("Loaded {} ({} nodes)", path.display(), topology.node_count());
    Ok(topology)
}

fn parse_link(line: &str) -> Result<(NodeLabel, NodeLabel, Cost), String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 3 {
        return Err(format!("expected 'node,node,cost' but found {} field(s)", fields.len()));
    }

    let a = fields[0].parse().map_err(|_| format!("invalid node '{}'", fields[0]))?;
    let b = fields[1].parse().map_err(|_| format!("invalid node '{}'", fields[1]))?;
    let cost = fields[2].parse().map_err(|_| format!("invalid cost '{}'", fields[2]))?;
    Ok((a, b, cost))
}

fn malformed(line: usize, reason: impl Into<String>) -> RoutingError {
    RoutingError::MalformedTopologySource {
        line,
        reason: reason.into(),
    }
}
