use fxhash::FxHashSet;

use crate::graph::PathNetwork;
use crate::routing::metric::Metric;
use crate::routing::path::Path;
use crate::routing::search::{self, Exploration};
use crate::routing::search_direction::SearchDirection;
use crate::routing::ShortestPath;
use crate::types::{Cost, NodeId};

/// A*: the best-first skeleton biased towards the destination by an
/// admissible metric. With such a metric the first settling of the
/// destination is optimal, so every query returns Dijkstra's answer while
/// settling fewer nodes.
pub struct AStar<'a, M> {
    network: &'a PathNetwork,
    metric: M,
}

impl<'a, M: Metric> AStar<'a, M> {
    pub fn with_metric(network: &'a PathNetwork, metric: M) -> Self {
        AStar { network, metric }
    }

    fn explore_to(&self, source: NodeId, destination: NodeId) -> Exploration {
        search::explore(
            self.network,
            &[(source, 0.0)],
            Some(destination),
            SearchDirection::Forward,
            |node| self.metric.lower_bound(node, destination),
            |_, _| true,
        )
    }
}

impl<M: Metric> ShortestPath for AStar<'_, M> {
    fn cost(&self, source: NodeId, destination: NodeId) -> Option<Cost> {
        self.explore_to(source, destination).cost_to(destination)
    }

    fn path(&self, source: NodeId, destination: NodeId) -> Option<Path> {
        self.explore_to(source, destination)
            .path_to(self.network, destination)
    }

    fn search_space(&self, source: NodeId, destination: NodeId) -> FxHashSet<NodeId> {
        self.explore_to(source, destination).search_space().clone()
    }
}
