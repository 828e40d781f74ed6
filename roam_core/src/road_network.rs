use fxhash::FxHashMap;
use tracing::warn;

use crate::error::NetworkError;
use crate::geo::{self, GeoPoint};
use crate::graph::PathNetwork;
use crate::road_type::RoadType;
use crate::scc;
use crate::types::NodeId;

/// A node of a road network together with its geographic position. The
/// position is fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadNode {
    id: NodeId,
    position: GeoPoint,
}

impl RoadNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn position(&self) -> GeoPoint {
        self.position
    }

    pub fn latitude(&self) -> f32 {
        self.position.lat
    }

    pub fn longitude(&self) -> f32 {
        self.position.lon
    }
}

/// An ordered polyline of road node ids with a type and a one-way flag,
/// as an OSM way describes it.
#[derive(Debug, Clone)]
pub struct Road {
    id: i64,
    nodes: Vec<NodeId>,
    road_type: RoadType,
    one_way: bool,
}

impl Road {
    pub fn new(id: i64, nodes: Vec<NodeId>, road_type: RoadType, one_way: bool) -> Self {
        Road {
            id,
            nodes,
            road_type,
            one_way,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn road_type(&self) -> RoadType {
        self.road_type
    }

    pub fn one_way(&self) -> bool {
        self.one_way
    }
}

/// A path network of roads and road crossings. Edge costs are travel
/// times in seconds, derived from the equirectangular distance between
/// the endpoints and the road type's reference speed.
///
/// The embedded [`PathNetwork`] is only mutated through roads and road
/// nodes, so every node has a position and every edge a road-derived
/// cost.
#[derive(Debug, Default, Clone)]
pub struct RoadNetwork {
    network: PathNetwork,
    positions: FxHashMap<NodeId, GeoPoint>,
}

impl RoadNetwork {
    pub fn new() -> Self {
        RoadNetwork::default()
    }

    /// Adds a road node. Returns whether the id was new; the position of
    /// an existing node is left untouched.
    pub fn add_road_node(&mut self, id: NodeId, lat: f32, lon: f32) -> bool {
        let added = self.network.add_node(id);
        if added {
            self.positions.insert(id, GeoPoint::new(lat, lon));
        }
        added
    }

    pub fn road_node(&self, id: NodeId) -> Option<RoadNode> {
        self.positions
            .get(&id)
            .map(|&position| RoadNode { id, position })
    }

    /// Adds all edges of `road`: pairwise along the polyline and, when the
    /// road is not one-way, pairwise in reverse as well.
    ///
    /// A road with fewer than 2 nodes is dropped with a warning. Node
    /// pairs at identical coordinates are silently skipped. Referencing a
    /// node that was never added fails with [`NetworkError::UnknownNode`].
    pub fn add_road(&mut self, road: &Road) -> Result<(), NetworkError> {
        if road.nodes().len() < 2 {
            warn!(
                road = road.id(),
                "a road must contain at least 2 road nodes, dropping it"
            );
            return Ok(());
        }

        for pair in road.nodes().windows(2) {
            self.add_road_segment(pair[0], pair[1], road.road_type())?;
        }
        if !road.one_way() {
            for pair in road.nodes().windows(2) {
                self.add_road_segment(pair[1], pair[0], road.road_type())?;
            }
        }
        Ok(())
    }

    fn add_road_segment(
        &mut self,
        source: NodeId,
        destination: NodeId,
        road_type: RoadType,
    ) -> Result<(), NetworkError> {
        let from = self
            .positions
            .get(&source)
            .copied()
            .ok_or(NetworkError::UnknownNode(source))?;
        let to = self
            .positions
            .get(&destination)
            .copied()
            .ok_or(NetworkError::UnknownNode(destination))?;

        let distance = from.distance(&to);
        if distance == 0.0 {
            return Ok(());
        }

        let travel_time = geo::travel_time(distance, road_type.average_speed_kmh());
        self.network.add_edge(source, destination, travel_time)?;
        Ok(())
    }

    /// The underlying graph, for running shortest-path computations.
    pub fn graph(&self) -> &PathNetwork {
        &self.network
    }

    pub fn size(&self) -> usize {
        self.network.size()
    }

    pub fn edge_count(&self) -> usize {
        self.network.edge_count()
    }

    /// All road nodes, in the graph's node iteration order.
    pub fn road_nodes(&self) -> impl Iterator<Item = RoadNode> + '_ {
        self.network.nodes().map(|id| RoadNode {
            id,
            position: self.positions[&id],
        })
    }

    /// The road node nearest to the given position, by a linear scan with
    /// the equirectangular distance. Ties keep the first node encountered.
    pub fn nearest_road_node(&self, lat: f32, lon: f32) -> Result<RoadNode, NetworkError> {
        let mut nearest: Option<(f32, RoadNode)> = None;
        for node in self.road_nodes() {
            let distance = geo::distance_equirect(lat, lon, node.latitude(), node.longitude());
            if nearest.map_or(true, |(best, _)| distance < best) {
                nearest = Some((distance, node));
            }
        }
        nearest
            .map(|(_, node)| node)
            .ok_or(NetworkError::EmptyNetwork)
    }

    /// Removes every node outside the largest strongly connected
    /// component.
    pub fn reduce_to_largest_scc(&mut self) {
        scc::reduce_to_largest_scc(&mut self.network);
        let network = &self.network;
        self.positions.retain(|&id, _| network.contains_node(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::dijkstra::Dijkstra;
    use crate::routing::ShortestPath;
    use crate::test_network_utils::test_network;

    #[test]
    fn a_motorway_road_gets_a_travel_time_cost() {
        let network = test_network::motorway_pair();
        assert_eq!(network.size(), 2);
        // Forward and reverse direction.
        assert_eq!(network.edge_count(), 2);

        let dijkstra = Dijkstra::new(network.graph());
        let cost = dijkstra.cost(1, 2).unwrap();
        assert!((cost - 299.3).abs() < 2.0, "got {cost}");
        assert_eq!(dijkstra.cost(2, 1), Some(cost));
    }

    #[test]
    fn a_one_way_road_has_no_reverse_edges() {
        let network = test_network::one_way_pair();
        let dijkstra = Dijkstra::new(network.graph());
        assert!(dijkstra.path(1, 2).is_some());
        assert!(dijkstra.path(2, 1).is_none());
    }

    #[test]
    fn polylines_expand_pairwise() {
        let mut network = RoadNetwork::new();
        network.add_road_node(1, 49.20, 6.95);
        network.add_road_node(2, 49.21, 6.97);
        network.add_road_node(3, 49.22, 6.99);
        network
            .add_road(&Road::new(10, vec![1, 2, 3], RoadType::Secondary, false))
            .unwrap();
        assert_eq!(network.edge_count(), 4);
    }

    #[test]
    fn pairs_at_identical_coordinates_are_skipped() {
        let mut network = RoadNetwork::new();
        network.add_road_node(1, 49.20, 6.95);
        network.add_road_node(2, 49.20, 6.95);
        network.add_road_node(3, 49.22, 6.99);
        network
            .add_road(&Road::new(10, vec![1, 2, 3], RoadType::Residential, false))
            .unwrap();
        // Only the 2<->3 pair has a distance.
        assert_eq!(network.edge_count(), 2);
    }

    #[test]
    fn short_roads_are_dropped() {
        let mut network = RoadNetwork::new();
        network.add_road_node(1, 49.20, 6.95);
        network
            .add_road(&Road::new(10, vec![1], RoadType::Primary, false))
            .unwrap();
        assert_eq!(network.edge_count(), 0);
    }

    #[test]
    fn roads_over_unknown_nodes_fail() {
        let mut network = RoadNetwork::new();
        network.add_road_node(1, 49.20, 6.95);
        let result = network.add_road(&Road::new(10, vec![1, 99], RoadType::Primary, true));
        assert!(matches!(result, Err(NetworkError::UnknownNode(99))));
    }

    #[test]
    fn duplicate_road_nodes_keep_their_first_position() {
        let mut network = RoadNetwork::new();
        assert!(network.add_road_node(1, 49.20, 6.95));
        assert!(!network.add_road_node(1, 50.00, 7.50));
        let node = network.road_node(1).unwrap();
        assert_eq!(node.latitude(), 49.20);
    }

    #[test]
    fn nearest_node_is_found_by_scanning() {
        let network = test_network::motorway_pair();
        let nearest = network.nearest_road_node(49.21, 6.96).unwrap();
        assert_eq!(nearest.id(), 1);
        let nearest = network.nearest_road_node(49.26, 7.04).unwrap();
        assert_eq!(nearest.id(), 2);
    }

    #[test]
    fn nearest_node_on_an_empty_network_fails() {
        let network = RoadNetwork::new();
        assert!(matches!(
            network.nearest_road_node(49.0, 7.0),
            Err(NetworkError::EmptyNetwork)
        ));
    }

    #[test]
    fn scc_reduction_prunes_positions() {
        let mut network = RoadNetwork::new();
        network.add_road_node(1, 49.20, 6.95);
        network.add_road_node(2, 49.25, 7.05);
        network.add_road_node(3, 49.30, 7.10);
        network
            .add_road(&Road::new(10, vec![1, 2], RoadType::Motorway, false))
            .unwrap();
        network
            .add_road(&Road::new(11, vec![2, 3], RoadType::Motorway, true))
            .unwrap();

        network.reduce_to_largest_scc();

        assert_eq!(network.size(), 2);
        assert!(network.road_node(3).is_none());
        assert_eq!(network.road_nodes().count(), 2);
    }
}
