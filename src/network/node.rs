use crate::{Cost, NodeLabel, UNREACHABLE_COST};

/// One routable vertex. Every cross-reference (destinations, next hops, neighbours)
/// is a label resolved through the owning [`crate::Topology`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    label: NodeLabel,
    reachable: bool,
    distances: Vec<Cost>,
    next_hops: Vec<Option<NodeLabel>>,
    neighbours: Vec<NodeLabel>,
}

impl Node {
    pub fn new(label: NodeLabel) -> Self {
        Self {
            label,
            reachable: true,
            distances: Vec::new(),
            next_hops: Vec::new(),
            neighbours: Vec::new(),
        }
    }

    pub fn label(&self) -> NodeLabel {
        self.label
    }

    pub fn is_reachable(&self) -> bool {
        self.reachable
    }

    pub(crate) fn set_unreachable(&mut self) {
        self.reachable = false;
    }

    pub fn neighbours(&self) -> &[NodeLabel] {
        &self.neighbours
    }

    pub fn has_neighbour(&self, label: NodeLabel) -> bool {
        self.neighbours.contains(&label)
    }

    /// Returns false when `label` was already a neighbour.
    pub(crate) fn add_neighbour(&mut self, label: NodeLabel) -> bool {
        if self.has_neighbour(label) {
            return false;
        }
        self.neighbours.push(label);
        true
    }

    /// Resets the table to "only self is known" for a network of `node_count` nodes.
    pub(crate) fn reset_vector(&mut self, node_count: usize) {
        self.distances = vec![UNREACHABLE_COST; node_count];
        self.next_hops = vec![None; node_count];
        self.distances[self.label - 1] = 0;
    }

    pub fn is_initialized(&self) -> bool {
        !self.distances.is_empty()
    }

    /// Cost to `destination`, or `None` if the label is outside the table.
    pub fn distance(&self, destination: NodeLabel) -> Option<Cost> {
        destination
            .checked_sub(1)
            .and_then(|index| self.distances.get(index))
            .copied()
    }

    pub fn next_hop(&self, destination: NodeLabel) -> Option<NodeLabel> {
        destination
            .checked_sub(1)
            .and_then(|index| self.next_hops.get(index))
            .copied()
            .flatten()
    }

    pub fn distances(&self) -> &[Cost] {
        &self.distances
    }

    pub fn next_hops(&self) -> &[Option<NodeLabel>] {
        &self.next_hops
    }

    /// Installs a route. Callers have already bounds-checked `destination`.
    pub(crate) fn set_route(&mut self, destination: NodeLabel, next_hop: Option<NodeLabel>, cost: Cost) {
        self.distances[destination - 1] = cost;
        self.next_hops[destination - 1] = next_hop;
    }

    /// Replaces the whole table with a freshly computed one of the same shape.
    pub(crate) fn replace_vector(&mut self, distances: Vec<Cost>, next_hops: Vec<Option<NodeLabel>>) {
        debug_assert_eq!(distances.len(), self.distances.len());
        debug_assert_eq!(next_hops.len(), self.next_hops.len());
        self.distances = distances;
        self.next_hops = next_hops;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_vector_knows_only_self() {
        let mut node = Node::new(2);
        assert!(!node.is_initialized());
        node.reset_vector(3);

        assert_eq!(node.distances(), &[UNREACHABLE_COST, 0, UNREACHABLE_COST]);
        assert!(node.next_hops().iter().all(Option::is_none));
        assert_eq!(node.distance(2), Some(0));
        assert_eq!(node.distance(0), None);
        assert_eq!(node.distance(4), None);
    }

    #[test]
    fn neighbours_are_not_duplicated() {
        let mut node = Node::new(1);
        assert!(node.add_neighbour(2));
        assert!(!node.add_neighbour(2));
        assert!(node.add_neighbour(3));
        assert_eq!(node.neighbours(), &[2, 3]);
    }
}
