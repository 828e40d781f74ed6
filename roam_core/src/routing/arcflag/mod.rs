pub mod partitioning;

use fixedbitset::FixedBitSet;
use fxhash::{FxHashMap, FxHashSet};
use tracing::{debug, info};

use crate::graph::PathNetwork;
use crate::routing::path::Path;
use crate::routing::search::{self, Exploration};
use crate::routing::search_direction::SearchDirection;
use crate::routing::ShortestPath;
use crate::types::{Cost, NodeId};
use self::partitioning::PartitioningProvider;

/// Arc-flag accelerated Dijkstra.
///
/// Preprocessing marks, for every region of a partitioning, the edges
/// that can lie on some shortest path ending inside that region. A query
/// then runs the plain best-first loop but skips every edge whose flag
/// for the destination's region is unset. The flags over-approximate, so
/// the filtered network still contains every true shortest path and
/// queries return Dijkstra's answers.
pub struct ArcFlagShortestPath<'a> {
    network: &'a PathNetwork,
    region_of: FxHashMap<NodeId, usize>,
    edge_flags: Vec<FixedBitSet>,
}

impl<'a> ArcFlagShortestPath<'a> {
    /// Preprocesses arc flags for `network` under the given partitioning.
    /// This runs one reverse one-to-all Dijkstra per boundary node and is
    /// the expensive part of arc-flag routing.
    pub fn new(network: &'a PathNetwork, provider: &impl PartitioningProvider) -> Self {
        let regions = provider.partitioning();

        let mut region_of = FxHashMap::default();
        for (region_index, region) in regions.iter().enumerate() {
            for &node in region {
                region_of.insert(node, region_index);
            }
        }

        let mut edge_flags =
            vec![FixedBitSet::with_capacity(regions.len()); network.edge_count()];
        for (region_index, region) in regions.iter().enumerate() {
            flag_region(network, region, region_index, &mut edge_flags);
        }
        info!(
            regions = regions.len(),
            edges = network.edge_count(),
            "arc flags preprocessed"
        );

        ArcFlagShortestPath {
            network,
            region_of,
            edge_flags,
        }
    }

    fn explore_to(&self, source: NodeId, destination: NodeId) -> Option<Exploration> {
        let &destination_region = self.region_of.get(&destination)?;
        Some(search::explore(
            self.network,
            &[(source, 0.0)],
            Some(destination),
            SearchDirection::Forward,
            |_| 0.0,
            |edge_id, _| self.edge_flags[edge_id].contains(destination_region),
        ))
    }
}

/// Sets the region's bit on every edge that can participate in a
/// shortest path into the region: all edges inside the region, plus all
/// edges tight in some reverse shortest-path tree rooted at one of the
/// region's boundary nodes. Bits are only ever set, never cleared.
fn flag_region(
    network: &PathNetwork,
    region: &FxHashSet<NodeId>,
    region_index: usize,
    edge_flags: &mut [FixedBitSet],
) {
    for (edge_id, edge) in network.edges().iter().enumerate() {
        if region.contains(&edge.source()) && region.contains(&edge.destination()) {
            edge_flags[edge_id].insert(region_index);
        }
    }

    // A boundary node of the region has an incoming edge from outside.
    let boundary_nodes: Vec<NodeId> = region
        .iter()
        .copied()
        .filter(|&node| {
            network
                .incoming(node)
                .iter()
                .any(|&edge_id| !region.contains(&network.edge(edge_id).source()))
        })
        .collect();
    debug!(
        region = region_index,
        boundary = boundary_nodes.len(),
        "flagging region"
    );

    for &boundary_node in &boundary_nodes {
        let exploration = search::explore(
            network,
            &[(boundary_node, 0.0)],
            None,
            SearchDirection::Backward,
            |_| 0.0,
            |_, _| true,
        );

        for &settled in exploration.search_space() {
            let Some(settled_cost) = exploration.cost_to(settled) else {
                continue;
            };
            for &edge_id in network.incoming(settled) {
                let edge = network.edge(edge_id);
                if let Some(source_cost) = exploration.cost_to(edge.source()) {
                    if source_cost == settled_cost + edge.cost() {
                        edge_flags[edge_id].insert(region_index);
                    }
                }
            }
        }
    }
}

impl ShortestPath for ArcFlagShortestPath<'_> {
    fn cost(&self, source: NodeId, destination: NodeId) -> Option<Cost> {
        self.explore_to(source, destination)?.cost_to(destination)
    }

    fn path(&self, source: NodeId, destination: NodeId) -> Option<Path> {
        self.explore_to(source, destination)?
            .path_to(self.network, destination)
    }

    fn search_space(&self, source: NodeId, destination: NodeId) -> FxHashSet<NodeId> {
        self.explore_to(source, destination)
            .map(|exploration| exploration.search_space().clone())
            .unwrap_or_default()
    }
}
