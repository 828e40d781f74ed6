use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fxhash::{FxHashMap, FxHashSet};

use crate::graph::{DirectedWeightedEdge, PathNetwork};
use crate::routing::path::Path;
use crate::routing::search_direction::SearchDirection;
use crate::types::{Cost, EdgeId, NodeId};

/// One queue entry. A node may be queued several times; stale entries are
/// skipped when popped (lazy invalidation, no decrease-key).
#[derive(Debug, Clone, Copy)]
struct HeapItem {
    node: NodeId,
    /// Tentative cost from the sources when this entry was pushed.
    g_score: Cost,
    /// Tentative cost plus the estimator's lower bound to the target.
    f_score: Cost,
    /// Insertion counter, breaking f_score ties in favour of earlier
    /// insertions.
    sequence: u64,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &HeapItem) -> bool {
        self.f_score == other.f_score && self.sequence == other.sequence
    }
}

impl Eq for HeapItem {}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip the comparison so std's max-heap behaves as a min-heap.
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &HeapItem) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The settled state of one finished best-first exploration. All query
/// outputs (cost, cost map, path, search space) are read from here.
pub(crate) struct Exploration {
    costs: FxHashMap<NodeId, Cost>,
    parents: FxHashMap<NodeId, EdgeId>,
    settled: FxHashSet<NodeId>,
    direction: SearchDirection,
}

impl Exploration {
    /// Cost of reaching `node`, when it was settled.
    pub fn cost_to(&self, node: NodeId) -> Option<Cost> {
        self.settled.contains(&node).then(|| self.costs[&node])
    }

    /// Costs of every settled node.
    pub fn settled_costs(&self) -> FxHashMap<NodeId, Cost> {
        self.settled
            .iter()
            .map(|&node| (node, self.costs[&node]))
            .collect()
    }

    /// The settled nodes.
    pub fn search_space(&self) -> &FxHashSet<NodeId> {
        &self.settled
    }

    /// Reconstructs the path to `node` from the parent-edge map. For a
    /// backward exploration the result runs from `node` to the
    /// exploration's source.
    pub fn path_to(&self, network: &PathNetwork, node: NodeId) -> Option<Path> {
        if !self.settled.contains(&node) {
            return None;
        }

        let mut edges: Vec<DirectedWeightedEdge> = Vec::new();
        let mut current = node;
        while let Some(&edge_id) = self.parents.get(&current) {
            let edge = *network.edge(edge_id);
            current = match self.direction {
                SearchDirection::Forward => edge.source(),
                SearchDirection::Backward => edge.destination(),
            };
            edges.push(edge);
        }

        match self.direction {
            SearchDirection::Forward => {
                edges.reverse();
                let mut path = Path::new(current);
                for edge in edges {
                    path.push(edge);
                }
                Some(path)
            }
            SearchDirection::Backward => {
                let mut path = Path::new(node);
                for edge in edges {
                    path.push(edge);
                }
                Some(path)
            }
        }
    }
}

/// Runs one best-first exploration over `network`.
///
/// All three algorithms share this loop: Dijkstra passes a zero estimator
/// and no filter, A* an admissible and consistent metric bound, the
/// arc-flag query a zero estimator and the region-bit filter. `sources`
/// seeds the queue with per-source initial costs; `stop_at` ends the
/// exploration once that node is settled, `None` explores to exhaustion.
pub(crate) fn explore<E, F>(
    network: &PathNetwork,
    sources: &[(NodeId, Cost)],
    stop_at: Option<NodeId>,
    direction: SearchDirection,
    estimate: E,
    filter: F,
) -> Exploration
where
    E: Fn(NodeId) -> Cost,
    F: Fn(EdgeId, &DirectedWeightedEdge) -> bool,
{
    let mut costs: FxHashMap<NodeId, Cost> = FxHashMap::default();
    let mut parents: FxHashMap<NodeId, EdgeId> = FxHashMap::default();
    let mut settled: FxHashSet<NodeId> = FxHashSet::default();
    let mut heap: BinaryHeap<HeapItem> = BinaryHeap::new();
    let mut sequence = 0u64;

    for &(source, initial_cost) in sources {
        if !network.contains_node(source) {
            continue;
        }
        if costs.get(&source).map_or(true, |&known| initial_cost < known) {
            costs.insert(source, initial_cost);
            heap.push(HeapItem {
                node: source,
                g_score: initial_cost,
                f_score: initial_cost + estimate(source),
                sequence,
            });
            sequence += 1;
        }
    }

    while let Some(HeapItem { node, g_score, .. }) = heap.pop() {
        if settled.contains(&node) {
            continue;
        }
        if g_score > costs[&node] {
            // A cheaper entry for this node was already processed.
            continue;
        }

        settled.insert(node);
        if stop_at == Some(node) {
            break;
        }

        let edge_ids = match direction {
            SearchDirection::Forward => network.outgoing(node),
            SearchDirection::Backward => network.incoming(node),
        };
        for &edge_id in edge_ids {
            let edge = network.edge(edge_id);
            if !filter(edge_id, edge) {
                continue;
            }

            let next = match direction {
                SearchDirection::Forward => edge.destination(),
                SearchDirection::Backward => edge.source(),
            };
            if settled.contains(&next) {
                continue;
            }

            let tentative = g_score + edge.cost();
            if costs.get(&next).map_or(true, |&known| tentative < known) {
                costs.insert(next, tentative);
                parents.insert(next, edge_id);
                heap.push(HeapItem {
                    node: next,
                    g_score: tentative,
                    f_score: tentative + estimate(next),
                    sequence,
                });
                sequence += 1;
            }
        }
    }

    Exploration {
        costs,
        parents,
        settled,
        direction,
    }
}
