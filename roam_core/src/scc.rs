use fxhash::{FxHashMap, FxHashSet};
use tracing::info;

use crate::graph::PathNetwork;
use crate::types::NodeId;

/// Computes all strongly connected components of `network` with an
/// iterative Tarjan walk, linear in nodes plus edges.
pub fn strongly_connected_components(network: &PathNetwork) -> Vec<Vec<NodeId>> {
    Tarjan::new(network).run()
}

/// Reduces `network` to its largest strongly connected component.
///
/// Afterwards the network is strongly connected (or empty, when it was
/// empty to begin with). Among equally large components the first one
/// encountered in node iteration order wins.
pub fn reduce_to_largest_scc(network: &mut PathNetwork) {
    let components = strongly_connected_components(network);

    let mut largest: Option<&Vec<NodeId>> = None;
    for component in &components {
        if largest.map_or(true, |best| component.len() > best.len()) {
            largest = Some(component);
        }
    }
    let Some(largest) = largest else {
        return;
    };

    let keep: FxHashSet<NodeId> = largest.iter().copied().collect();
    network.reduce(|node| keep.contains(&node));
    info!(
        nodes = network.size(),
        edges = network.edge_count(),
        "reduced to the largest strongly connected component"
    );
}

struct Tarjan<'a> {
    network: &'a PathNetwork,
    index: FxHashMap<NodeId, usize>,
    lowlink: FxHashMap<NodeId, usize>,
    stack: Vec<NodeId>,
    on_stack: FxHashSet<NodeId>,
    next_index: usize,
    components: Vec<Vec<NodeId>>,
}

impl<'a> Tarjan<'a> {
    fn new(network: &'a PathNetwork) -> Self {
        Tarjan {
            network,
            index: FxHashMap::default(),
            lowlink: FxHashMap::default(),
            stack: Vec::new(),
            on_stack: FxHashSet::default(),
            next_index: 0,
            components: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Vec<NodeId>> {
        let nodes: Vec<NodeId> = self.network.nodes().collect();
        for node in nodes {
            if !self.index.contains_key(&node) {
                self.visit(node);
            }
        }
        self.components
    }

    fn discover(&mut self, node: NodeId) {
        self.index.insert(node, self.next_index);
        self.lowlink.insert(node, self.next_index);
        self.next_index += 1;
        self.stack.push(node);
        self.on_stack.insert(node);
    }

    /// Depth-first walk from `root` with an explicit frame stack; road
    /// networks are far too deep for recursion.
    fn visit(&mut self, root: NodeId) {
        let network = self.network;
        let mut frames: Vec<(NodeId, usize)> = vec![(root, 0)];
        self.discover(root);

        while let Some((node, edge_position)) = frames.pop() {
            let edge_ids = network.outgoing(node);

            if edge_position < edge_ids.len() {
                frames.push((node, edge_position + 1));
                let successor = network.edge(edge_ids[edge_position]).destination();
                if !self.index.contains_key(&successor) {
                    self.discover(successor);
                    frames.push((successor, 0));
                } else if self.on_stack.contains(&successor) {
                    let low = self.lowlink[&node].min(self.index[&successor]);
                    self.lowlink.insert(node, low);
                }
                continue;
            }

            // All successors handled: propagate the lowlink and close the
            // component when this node is its root.
            if let Some(&(parent, _)) = frames.last() {
                let low = self.lowlink[&parent].min(self.lowlink[&node]);
                self.lowlink.insert(parent, low);
            }
            if self.lowlink[&node] == self.index[&node] {
                let mut component = Vec::new();
                loop {
                    let member = self.stack.pop().expect("component root is on the stack");
                    self.on_stack.remove(&member);
                    component.push(member);
                    if member == node {
                        break;
                    }
                }
                self.components.push(component);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::dijkstra::Dijkstra;
    use crate::routing::ShortestPath;
    use crate::test_network_utils::test_network;

    #[test]
    fn a_ring_is_one_component() {
        let network = test_network::ring_network();
        let components = strongly_connected_components(&network);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), 4);
    }

    #[test]
    fn a_line_falls_apart_into_singletons() {
        let network = test_network::line_network();
        let components = strongly_connected_components(&network);
        assert_eq!(components.len(), 4);
        assert!(components.iter().all(|component| component.len() == 1));
    }

    #[test]
    fn reduction_keeps_the_largest_component() {
        // Ring 0..4 plus a dangling tail 4 -> 5.
        let mut network = test_network::ring_network();
        network.add_node(4);
        network.add_node(5);
        network.add_edge(3, 4, 1.0).unwrap();
        network.add_edge(4, 5, 1.0).unwrap();

        reduce_to_largest_scc(&mut network);

        assert_eq!(network.size(), 4);
        assert_eq!(network.edge_count(), 4);
        assert!(!network.contains_node(4));
        assert!(!network.contains_node(5));
    }

    #[test]
    fn reduction_leaves_all_pairs_mutually_reachable() {
        let mut network = test_network::ring_network();
        network.add_node(7);
        network.add_edge(0, 7, 2.0).unwrap();

        reduce_to_largest_scc(&mut network);

        let nodes: Vec<_> = network.nodes().collect();
        let dijkstra = Dijkstra::new(&network);
        for &first in &nodes {
            for &second in &nodes {
                assert!(dijkstra.path(first, second).is_some());
                assert!(dijkstra.path(second, first).is_some());
            }
        }
    }

    #[test]
    fn reducing_an_empty_network_is_a_no_op() {
        let mut network = PathNetwork::new();
        reduce_to_largest_scc(&mut network);
        assert_eq!(network.size(), 0);
        assert_eq!(network.edge_count(), 0);
    }
}
