use fxhash::{FxHashMap, FxHashSet};

use crate::graph::PathNetwork;
use crate::routing::path::Path;
use crate::routing::search::{self, Exploration};
use crate::routing::search_direction::SearchDirection;
use crate::routing::ShortestPath;
use crate::types::{Cost, NodeId};

/// Plain Dijkstra: the best-first skeleton with a zero estimator and no
/// edge filter.
pub struct Dijkstra<'a> {
    network: &'a PathNetwork,
}

impl<'a> Dijkstra<'a> {
    pub fn new(network: &'a PathNetwork) -> Self {
        Dijkstra { network }
    }

    fn explore(
        &self,
        sources: &[(NodeId, Cost)],
        stop_at: Option<NodeId>,
        direction: SearchDirection,
    ) -> Exploration {
        search::explore(self.network, sources, stop_at, direction, |_| 0.0, |_, _| true)
    }

    /// Costs of every node reachable from `source`.
    pub fn cost_map_from(&self, source: NodeId) -> FxHashMap<NodeId, Cost> {
        self.explore(&[(source, 0.0)], None, SearchDirection::Forward)
            .settled_costs()
    }

    /// Costs of every node reachable from any node of `sources`, all
    /// starting at cost zero.
    pub fn cost_map_from_all(&self, sources: &[NodeId]) -> FxHashMap<NodeId, Cost> {
        let sources: Vec<(NodeId, Cost)> = sources.iter().map(|&node| (node, 0.0)).collect();
        self.explore(&sources, None, SearchDirection::Forward)
            .settled_costs()
    }

    /// One-to-all exploration on the reverse graph: settles every node
    /// that can reach `target`, with its cost towards `target`.
    pub(crate) fn reverse_exploration_from(&self, target: NodeId) -> Exploration {
        self.explore(&[(target, 0.0)], None, SearchDirection::Backward)
    }
}

impl ShortestPath for Dijkstra<'_> {
    fn cost(&self, source: NodeId, destination: NodeId) -> Option<Cost> {
        self.explore(&[(source, 0.0)], Some(destination), SearchDirection::Forward)
            .cost_to(destination)
    }

    fn path(&self, source: NodeId, destination: NodeId) -> Option<Path> {
        self.explore(&[(source, 0.0)], Some(destination), SearchDirection::Forward)
            .path_to(self.network, destination)
    }

    fn search_space(&self, source: NodeId, destination: NodeId) -> FxHashSet<NodeId> {
        self.explore(&[(source, 0.0)], Some(destination), SearchDirection::Forward)
            .search_space()
            .clone()
    }
}
