use fxhash::FxHashSet;

use crate::road_network::{RoadNetwork, RoadNode};
use crate::types::NodeId;

/// Splits a network's nodes into disjoint regions that together cover
/// every node. The order of the returned regions is fixed: arc-flag bit
/// indices refer to positions in this list, so empty regions must still
/// be present.
pub trait PartitioningProvider {
    fn partitioning(&self) -> Vec<FxHashSet<NodeId>>;
}

/// Partitions a road network by an axis-aligned geographic rectangle:
/// region 0 holds the nodes inside the rectangle (bounds inclusive),
/// region 1 everything else.
pub struct RectanglePartitioningProvider<'a> {
    network: &'a RoadNetwork,
    lat_min: f32,
    lat_max: f32,
    lon_min: f32,
    lon_max: f32,
}

impl<'a> RectanglePartitioningProvider<'a> {
    pub fn new(
        network: &'a RoadNetwork,
        lat_min: f32,
        lat_max: f32,
        lon_min: f32,
        lon_max: f32,
    ) -> Self {
        RectanglePartitioningProvider {
            network,
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    pub fn is_inside_rectangle(&self, node: &RoadNode) -> bool {
        node.latitude() >= self.lat_min
            && node.latitude() <= self.lat_max
            && node.longitude() >= self.lon_min
            && node.longitude() <= self.lon_max
    }
}

impl PartitioningProvider for RectanglePartitioningProvider<'_> {
    fn partitioning(&self) -> Vec<FxHashSet<NodeId>> {
        let mut inside = FxHashSet::default();
        let mut outside = FxHashSet::default();
        for node in self.network.road_nodes() {
            if self.is_inside_rectangle(&node) {
                inside.insert(node.id());
            } else {
                outside.insert(node.id());
            }
        }
        vec![inside, outside]
    }
}
