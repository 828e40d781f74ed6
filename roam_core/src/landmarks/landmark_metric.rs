use fxhash::FxHashMap;
use tracing::info;

use crate::graph::PathNetwork;
use crate::routing::dijkstra::Dijkstra;
use crate::routing::metric::Metric;
use crate::types::{Cost, NodeId};

/// Shortest-path tables for one landmark. Road networks contain one-way
/// edges, so both directions are kept: the cost from the landmark to
/// every node and the cost from every node to the landmark. Missing
/// entries mean unreachable.
struct LandmarkTable {
    node: NodeId,
    from_landmark: FxHashMap<NodeId, Cost>,
    to_landmark: FxHashMap<NodeId, Cost>,
}

/// The ALT heuristic: precomputed landmark distance tables combined into
/// a lower bound by the triangle inequality. Built once per preprocessing
/// pass and shared read-only across queries.
pub struct LandmarkMetric {
    landmarks: Vec<LandmarkTable>,
}

impl LandmarkMetric {
    /// Runs one forward and one backward one-to-all Dijkstra per
    /// landmark.
    pub fn new(network: &PathNetwork, landmarks: &[NodeId]) -> Self {
        let dijkstra = Dijkstra::new(network);
        let tables = landmarks
            .iter()
            .map(|&landmark| LandmarkTable {
                node: landmark,
                from_landmark: dijkstra.cost_map_from(landmark),
                to_landmark: dijkstra.reverse_exploration_from(landmark).settled_costs(),
            })
            .collect();
        info!(landmarks = landmarks.len(), "landmark distance tables computed");
        LandmarkMetric { landmarks: tables }
    }

    pub fn num_landmarks(&self) -> usize {
        self.landmarks.len()
    }

    pub fn landmark_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.landmarks.iter().map(|table| table.node)
    }
}

impl Metric for LandmarkMetric {
    /// For every landmark L both differences d(from → L) − d(to → L) and
    /// d(L → to) − d(L → from) bound the true cost from below; the best
    /// landmark wins. A landmark that cannot see both nodes in a
    /// direction contributes nothing, never a negative bound.
    fn lower_bound(&self, from: NodeId, to: NodeId) -> Cost {
        let mut bound: Cost = 0.0;
        for table in &self.landmarks {
            if let (Some(&from_cost), Some(&to_cost)) =
                (table.to_landmark.get(&from), table.to_landmark.get(&to))
            {
                bound = bound.max(from_cost - to_cost);
            }
            if let (Some(&to_cost), Some(&from_cost)) =
                (table.from_landmark.get(&to), table.from_landmark.get(&from))
            {
                bound = bound.max(to_cost - from_cost);
            }
        }
        bound
    }
}
