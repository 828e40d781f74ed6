use fxhash::FxHashMap;

use crate::error::NetworkError;
use crate::types::{Cost, EdgeId, NodeId};

/// A directed edge with a non-negative travel cost in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectedWeightedEdge {
    source: NodeId,
    destination: NodeId,
    cost: Cost,
}

impl DirectedWeightedEdge {
    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn destination(&self) -> NodeId {
        self.destination
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }
}

/// A directed weighted graph keeping, for every node, the list of outgoing
/// and the list of incoming edges. The two lists are kept consistent:
/// every edge appears in the outgoing list of its source and the incoming
/// list of its destination.
///
/// Parallel edges are allowed; nothing is deduplicated. Node iteration
/// order is stable as long as the network is not mutated, but not across
/// mutations.
#[derive(Debug, Default, Clone)]
pub struct PathNetwork {
    edges: Vec<DirectedWeightedEdge>,
    outgoing: FxHashMap<NodeId, Vec<EdgeId>>,
    incoming: FxHashMap<NodeId, Vec<EdgeId>>,
}

impl PathNetwork {
    pub fn new() -> Self {
        PathNetwork::default()
    }

    /// Adds a node. Returns whether the id was new; adding a known node is
    /// a no-op.
    pub fn add_node(&mut self, node: NodeId) -> bool {
        if self.outgoing.contains_key(&node) {
            return false;
        }
        self.outgoing.insert(node, Vec::new());
        self.incoming.insert(node, Vec::new());
        true
    }

    /// Adds an edge between two known nodes.
    ///
    /// Fails with [`NetworkError::UnknownNode`] when an endpoint has not
    /// been added and with [`NetworkError::InvalidCost`] for a negative
    /// (or NaN) cost.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        destination: NodeId,
        cost: Cost,
    ) -> Result<EdgeId, NetworkError> {
        if !self.outgoing.contains_key(&source) {
            return Err(NetworkError::UnknownNode(source));
        }
        if !self.outgoing.contains_key(&destination) {
            return Err(NetworkError::UnknownNode(destination));
        }
        if cost < 0.0 || cost.is_nan() {
            return Err(NetworkError::InvalidCost(cost));
        }

        let edge_id = self.edges.len();
        self.edges.push(DirectedWeightedEdge {
            source,
            destination,
            cost,
        });
        self.outgoing.entry(source).or_default().push(edge_id);
        self.incoming.entry(destination).or_default().push(edge_id);
        Ok(edge_id)
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.outgoing.contains_key(&node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing.keys().copied()
    }

    pub fn edge(&self, edge_id: EdgeId) -> &DirectedWeightedEdge {
        &self.edges[edge_id]
    }

    pub fn edges(&self) -> &[DirectedWeightedEdge] {
        &self.edges
    }

    /// Ids of the edges leaving `node`. Unknown nodes have no edges.
    pub fn outgoing(&self, node: NodeId) -> &[EdgeId] {
        self.outgoing.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids of the edges arriving at `node`. Unknown nodes have no edges.
    pub fn incoming(&self, node: NodeId) -> &[EdgeId] {
        self.incoming.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.outgoing.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Removes every node failing `keep` together with all edges touching
    /// such a node. Edge ids are reassigned.
    pub fn reduce<F>(&mut self, keep: F)
    where
        F: Fn(NodeId) -> bool,
    {
        self.outgoing.retain(|&node, _| keep(node));
        self.incoming.retain(|&node, _| keep(node));

        let retained: Vec<DirectedWeightedEdge> = self
            .edges
            .iter()
            .copied()
            .filter(|edge| {
                self.outgoing.contains_key(&edge.source)
                    && self.outgoing.contains_key(&edge.destination)
            })
            .collect();
        self.edges = retained;

        for edge_ids in self.outgoing.values_mut() {
            edge_ids.clear();
        }
        for edge_ids in self.incoming.values_mut() {
            edge_ids.clear();
        }
        for (edge_id, edge) in self.edges.iter().enumerate() {
            self.outgoing.entry(edge.source).or_default().push(edge_id);
            self.incoming
                .entry(edge.destination)
                .or_default()
                .push(edge_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_node_reports_new_ids() {
        let mut network = PathNetwork::new();
        assert!(network.add_node(1));
        assert!(network.add_node(2));
        assert!(!network.add_node(1));
        assert_eq!(network.size(), 2);
    }

    #[test]
    fn edges_appear_in_both_adjacency_lists() {
        let mut network = PathNetwork::new();
        network.add_node(1);
        network.add_node(2);
        let edge_id = network.add_edge(1, 2, 4.0).unwrap();

        assert_eq!(network.outgoing(1), &[edge_id]);
        assert_eq!(network.incoming(2), &[edge_id]);
        assert!(network.outgoing(2).is_empty());
        assert!(network.incoming(1).is_empty());

        let edge = network.edge(edge_id);
        assert_eq!(edge.source(), 1);
        assert_eq!(edge.destination(), 2);
        assert_eq!(edge.cost(), 4.0);
    }

    #[test]
    fn parallel_edges_are_kept() {
        let mut network = PathNetwork::new();
        network.add_node(1);
        network.add_node(2);
        network.add_edge(1, 2, 1.0).unwrap();
        network.add_edge(1, 2, 1.0).unwrap();
        assert_eq!(network.edge_count(), 2);
        assert_eq!(network.outgoing(1).len(), 2);
    }

    #[test]
    fn add_edge_rejects_unknown_endpoints() {
        let mut network = PathNetwork::new();
        network.add_node(1);
        assert!(matches!(
            network.add_edge(1, 2, 1.0),
            Err(NetworkError::UnknownNode(2))
        ));
        assert!(matches!(
            network.add_edge(3, 1, 1.0),
            Err(NetworkError::UnknownNode(3))
        ));
        assert_eq!(network.edge_count(), 0);
    }

    #[test]
    fn add_edge_rejects_negative_costs() {
        let mut network = PathNetwork::new();
        network.add_node(1);
        network.add_node(2);
        assert!(matches!(
            network.add_edge(1, 2, -0.5),
            Err(NetworkError::InvalidCost(_))
        ));
        assert!(matches!(
            network.add_edge(1, 2, f32::NAN),
            Err(NetworkError::InvalidCost(_))
        ));
    }

    #[test]
    fn reduce_drops_nodes_and_incident_edges() {
        let mut network = PathNetwork::new();
        for node in 0..4 {
            network.add_node(node);
        }
        network.add_edge(0, 1, 1.0).unwrap();
        network.add_edge(1, 2, 1.0).unwrap();
        network.add_edge(2, 3, 1.0).unwrap();
        network.add_edge(3, 0, 1.0).unwrap();

        network.reduce(|node| node < 2);

        assert_eq!(network.size(), 2);
        assert_eq!(network.edge_count(), 1);
        assert!(network.contains_node(0));
        assert!(network.contains_node(1));
        assert!(!network.contains_node(2));
        let edge = network.edge(network.outgoing(0)[0]);
        assert_eq!((edge.source(), edge.destination()), (0, 1));
        assert_eq!(network.incoming(1).len(), 1);
    }
}
